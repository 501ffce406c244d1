use super::Error;

/// Error when an accessor names a field the model does not declare.
#[derive(Debug)]
pub(super) struct UnknownFieldError {
    pub(super) field: Box<str>,
}

impl std::error::Error for UnknownFieldError {}

impl core::fmt::Display for UnknownFieldError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unknown field: `{}`", self.field)
    }
}

impl Error {
    /// Creates an unknown field error.
    pub fn unknown_field(field: impl Into<Box<str>>) -> Error {
        Error::from(super::ErrorKind::UnknownField(UnknownFieldError {
            field: field.into(),
        }))
    }

    /// Returns `true` if this error (or any cause) is an unknown field error.
    pub fn is_unknown_field(&self) -> bool {
        self.chain_is(|kind| matches!(kind, super::ErrorKind::UnknownField(_)))
    }
}
