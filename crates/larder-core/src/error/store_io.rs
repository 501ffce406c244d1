use super::Error;

/// Error from the row store collaborator.
#[derive(Debug)]
pub(super) struct StoreIoError {
    pub(super) inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for StoreIoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for StoreIoError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        // Display the error and walk its source chain
        write!(f, "store error: {}", self.inner)?;
        let mut source = self.inner.source();
        while let Some(err) = source {
            write!(f, ": {}", err)?;
            source = err.source();
        }
        Ok(())
    }
}

impl Error {
    /// Creates an error from a store-boundary failure.
    ///
    /// This is the preferred way to convert store-specific errors (rusqlite
    /// errors and the like) into larder errors.
    pub fn store_io(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::StoreIo(StoreIoError {
            inner: Box::new(err),
        }))
    }

    /// Returns `true` if this error (or any cause) is a store error.
    pub fn is_store_io(&self) -> bool {
        self.chain_is(|kind| matches!(kind, super::ErrorKind::StoreIo(_)))
    }
}
