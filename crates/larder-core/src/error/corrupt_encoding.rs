use super::Error;

/// Error when decode receives a wire value whose tag is incompatible with the
/// declared kind, or a malformed byte buffer.
#[derive(Debug)]
pub(super) struct CorruptEncodingError {
    pub(super) context: Box<str>,
}

impl std::error::Error for CorruptEncodingError {}

impl core::fmt::Display for CorruptEncodingError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "corrupt encoding: {}", self.context)
    }
}

impl Error {
    /// Creates a corrupt encoding error.
    pub fn corrupt_encoding(context: impl Into<Box<str>>) -> Error {
        Error::from(super::ErrorKind::CorruptEncoding(CorruptEncodingError {
            context: context.into(),
        }))
    }

    /// Returns `true` if this error (or any cause) is a corrupt encoding
    /// error.
    pub fn is_corrupt_encoding(&self) -> bool {
        self.chain_is(|kind| matches!(kind, super::ErrorKind::CorruptEncoding(_)))
    }
}
