use super::Error;

/// One-off error built from format arguments.
#[derive(Debug)]
pub(super) struct AdhocError {
    pub(super) message: Box<str>,
}

impl std::error::Error for AdhocError {}

impl core::fmt::Display for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error {
    /// Creates an ad-hoc error from format arguments. Prefer the `err!` and
    /// `bail!` macros over calling this directly.
    pub fn from_args(args: core::fmt::Arguments<'_>) -> Error {
        Error::from(super::ErrorKind::Adhoc(AdhocError {
            message: match args.as_str() {
                Some(s) => s.into(),
                None => args.to_string().into(),
            },
        }))
    }
}
