use super::Error;

/// Error when a fixed-size byte field's length does not match its declared
/// size.
#[derive(Debug)]
pub(super) struct SizeMismatchError {
    pub(super) expected: usize,
    pub(super) actual: usize,
}

impl std::error::Error for SizeMismatchError {}

impl core::fmt::Display for SizeMismatchError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "size mismatch: expected {} bytes, got {}",
            self.expected, self.actual
        )
    }
}

impl Error {
    /// Creates a size mismatch error.
    pub fn size_mismatch(expected: usize, actual: usize) -> Error {
        Error::from(super::ErrorKind::SizeMismatch(SizeMismatchError {
            expected,
            actual,
        }))
    }

    /// Returns `true` if this error (or any cause) is a size mismatch error.
    pub fn is_size_mismatch(&self) -> bool {
        self.chain_is(|kind| matches!(kind, super::ErrorKind::SizeMismatch(_)))
    }
}
