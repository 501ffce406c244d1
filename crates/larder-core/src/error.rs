mod adhoc;
mod ambiguous_field;
mod corrupt_encoding;
mod dangling_reference;
mod missing_column;
mod not_found;
mod size_mismatch;
mod store_io;
mod unknown_field;
mod unknown_model;
mod unsupported_type;
mod use_after_delete;

use adhoc::AdhocError;
use ambiguous_field::AmbiguousFieldError;
use corrupt_encoding::CorruptEncodingError;
use dangling_reference::DanglingReferenceError;
use missing_column::MissingColumnError;
use not_found::NotFoundError;
use size_mismatch::SizeMismatchError;
use std::sync::Arc;
use store_io::StoreIoError;
use unknown_field::UnknownFieldError;
use unknown_model::UnknownModelError;
use unsupported_type::UnsupportedTypeError;
use use_after_delete::UseAfterDeleteError;

/// Returns early with an ad-hoc [`Error`] built from format arguments.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Creates an ad-hoc [`Error`] from format arguments.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error that can occur in Larder.
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added context
    /// is shown first, followed by earlier context, ending with the root
    /// cause.
    #[inline(always)]
    pub fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let mut err = consequent;
        if err.inner.is_none() {
            err = Error::from(ErrorKind::Unknown);
        }
        let inner = err.inner.as_mut().unwrap();
        assert!(
            inner.cause.is_none(),
            "consequent error must not already have a cause"
        );
        Arc::get_mut(inner).unwrap().cause = Some(self);
        err
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }

    /// Returns `true` if this error, or any cause in its chain, satisfies the
    /// given kind predicate.
    fn chain_is(&self, predicate: impl Fn(&ErrorKind) -> bool) -> bool {
        self.chain().any(|err| predicate(err.kind()))
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::StoreIo(err) => Some(err),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f.debug_struct("Error").field("kind", &"None").finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Adhoc(AdhocError),
    UnsupportedType(UnsupportedTypeError),
    CorruptEncoding(CorruptEncodingError),
    SizeMismatch(SizeMismatchError),
    AmbiguousField(AmbiguousFieldError),
    MissingColumn(MissingColumnError),
    DanglingReference(DanglingReferenceError),
    NotFound(NotFoundError),
    UseAfterDelete(UseAfterDeleteError),
    UnknownField(UnknownFieldError),
    UnknownModel(UnknownModelError),
    StoreIo(StoreIoError),
    Unknown,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            UnsupportedType(err) => core::fmt::Display::fmt(err, f),
            CorruptEncoding(err) => core::fmt::Display::fmt(err, f),
            SizeMismatch(err) => core::fmt::Display::fmt(err, f),
            AmbiguousField(err) => core::fmt::Display::fmt(err, f),
            MissingColumn(err) => core::fmt::Display::fmt(err, f),
            DanglingReference(err) => core::fmt::Display::fmt(err, f),
            NotFound(err) => core::fmt::Display::fmt(err, f),
            UseAfterDelete(err) => core::fmt::Display::fmt(err, f),
            UnknownField(err) => core::fmt::Display::fmt(err, f),
            UnknownModel(err) => core::fmt::Display::fmt(err, f),
            StoreIo(err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown larder error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner { kind, cause: None })),
        }
    }
}

/// Trait for types that can be converted into an Error.
pub trait IntoError {
    /// Converts this type into an Error.
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}
