use super::Error;

/// Error when a link record or reference memo names a model that was never
/// registered.
#[derive(Debug)]
pub(super) struct UnknownModelError {
    pub(super) model: Box<str>,
}

impl std::error::Error for UnknownModelError {}

impl core::fmt::Display for UnknownModelError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unknown model: `{}`", self.model)
    }
}

impl Error {
    /// Creates an unknown model error.
    pub fn unknown_model(model: impl Into<Box<str>>) -> Error {
        Error::from(super::ErrorKind::UnknownModel(UnknownModelError {
            model: model.into(),
        }))
    }

    /// Returns `true` if this error (or any cause) is an unknown model error.
    pub fn is_unknown_model(&self) -> bool {
        self.chain_is(|kind| matches!(kind, super::ErrorKind::UnknownModel(_)))
    }
}
