use super::Error;

/// Error when a deleted object is saved or deleted again.
#[derive(Debug)]
pub(super) struct UseAfterDeleteError {
    pub(super) model: Box<str>,
}

impl std::error::Error for UseAfterDeleteError {}

impl core::fmt::Display for UseAfterDeleteError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "use after delete: {}", self.model)
    }
}

impl Error {
    /// Creates a use after delete error.
    pub fn use_after_delete(model: impl Into<Box<str>>) -> Error {
        Error::from(super::ErrorKind::UseAfterDelete(UseAfterDeleteError {
            model: model.into(),
        }))
    }

    /// Returns `true` if this error (or any cause) is a use after delete
    /// error.
    pub fn is_use_after_delete(&self) -> bool {
        self.chain_is(|kind| matches!(kind, super::ErrorKind::UseAfterDelete(_)))
    }
}
