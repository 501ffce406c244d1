use super::Error;

/// Error when a link record or object reference points at an identity that no
/// longer has a row.
#[derive(Debug)]
pub(super) struct DanglingReferenceError {
    pub(super) context: Box<str>,
}

impl std::error::Error for DanglingReferenceError {}

impl core::fmt::Display for DanglingReferenceError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "dangling reference: {}", self.context)
    }
}

impl Error {
    /// Creates a dangling reference error.
    pub fn dangling_reference(context: impl Into<Box<str>>) -> Error {
        Error::from(super::ErrorKind::DanglingReference(
            DanglingReferenceError {
                context: context.into(),
            },
        ))
    }

    /// Returns `true` if this error (or any cause) is a dangling reference
    /// error.
    pub fn is_dangling_reference(&self) -> bool {
        self.chain_is(|kind| matches!(kind, super::ErrorKind::DanglingReference(_)))
    }
}
