use super::Error;

/// Error when two declared fields normalize to the same storage column.
#[derive(Debug)]
pub(super) struct AmbiguousFieldError {
    pub(super) context: Box<str>,
}

impl std::error::Error for AmbiguousFieldError {}

impl core::fmt::Display for AmbiguousFieldError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "ambiguous field: {}", self.context)
    }
}

impl Error {
    /// Creates an ambiguous field error.
    pub fn ambiguous_field(context: impl Into<Box<str>>) -> Error {
        Error::from(super::ErrorKind::AmbiguousField(AmbiguousFieldError {
            context: context.into(),
        }))
    }

    /// Returns `true` if this error (or any cause) is an ambiguous field
    /// error.
    pub fn is_ambiguous_field(&self) -> bool {
        self.chain_is(|kind| matches!(kind, super::ErrorKind::AmbiguousField(_)))
    }
}
