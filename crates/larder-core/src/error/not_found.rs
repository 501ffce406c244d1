use super::Error;

/// Error when a row lookup by identity returns nothing.
#[derive(Debug)]
pub(super) struct NotFoundError {
    pub(super) context: Box<str>,
}

impl std::error::Error for NotFoundError {}

impl core::fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "not found: {}", self.context)
    }
}

impl Error {
    /// Creates a not found error.
    pub fn not_found(context: impl Into<Box<str>>) -> Error {
        Error::from(super::ErrorKind::NotFound(NotFoundError {
            context: context.into(),
        }))
    }

    /// Returns `true` if this error (or any cause) is a not found error.
    pub fn is_not_found(&self) -> bool {
        self.chain_is(|kind| matches!(kind, super::ErrorKind::NotFound(_)))
    }
}
