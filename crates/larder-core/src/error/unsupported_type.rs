use super::Error;

/// Error when a value cannot be represented for its declared kind: a value
/// shape that does not match the kind, a non-finite number, or duplicate keys
/// in a keyed collection.
#[derive(Debug)]
pub(super) struct UnsupportedTypeError {
    pub(super) context: Box<str>,
}

impl std::error::Error for UnsupportedTypeError {}

impl core::fmt::Display for UnsupportedTypeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unsupported type: {}", self.context)
    }
}

impl Error {
    /// Creates an unsupported type error.
    pub fn unsupported_type(context: impl Into<Box<str>>) -> Error {
        Error::from(super::ErrorKind::UnsupportedType(UnsupportedTypeError {
            context: context.into(),
        }))
    }

    /// Returns `true` if this error (or any cause) is an unsupported type
    /// error.
    pub fn is_unsupported_type(&self) -> bool {
        self.chain_is(|kind| matches!(kind, super::ErrorKind::UnsupportedType(_)))
    }
}
