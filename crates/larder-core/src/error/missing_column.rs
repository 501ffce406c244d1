use super::Error;

/// Error when a stored field's column is absent from a row read back from the
/// store.
#[derive(Debug)]
pub(super) struct MissingColumnError {
    pub(super) column: Box<str>,
}

impl std::error::Error for MissingColumnError {}

impl core::fmt::Display for MissingColumnError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "missing column: `{}`", self.column)
    }
}

impl Error {
    /// Creates a missing column error.
    pub fn missing_column(column: impl Into<Box<str>>) -> Error {
        Error::from(super::ErrorKind::MissingColumn(MissingColumnError {
            column: column.into(),
        }))
    }

    /// Returns `true` if this error (or any cause) is a missing column error.
    pub fn is_missing_column(&self) -> bool {
        self.chain_is(|kind| matches!(kind, super::ErrorKind::MissingColumn(_)))
    }
}
