mod adapter_unavailable;
mod adhoc;
mod invalid_configuration;
mod invalid_type_argument;
mod read_only_member;
mod reentrant_configuration;
mod type_conversion;
mod unknown_member;
mod unmapped_value;

use adapter_unavailable::AdapterUnavailable;
use adhoc::AdhocError;
use invalid_configuration::InvalidConfiguration;
use invalid_type_argument::InvalidTypeArgument;
use read_only_member::ReadOnlyMember;
use reentrant_configuration::ReentrantConfiguration;
use std::sync::Arc;
use type_conversion::TypeConversionError;
use unknown_member::UnknownMember;
use unmapped_value::UnmappedValue;

/// Returns early with an ad-hoc [`Error`](crate::Error) built from a format
/// string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Builds an ad-hoc [`Error`](crate::Error) from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error that can occur while configuring or running a mapping.
///
/// The error is a single pointer wide and cheap to clone, which lets a failed
/// one-time configuration be cached and handed to every later caller.
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
        let kind = match consequent.inner {
            Some(inner) => match Arc::try_unwrap(inner) {
                Ok(inner) => {
                    assert!(
                        inner.cause.is_none(),
                        "consequent error must not already have a cause"
                    );
                    inner.kind
                }
                // Shared consequent; keep its message, drop its identity.
                Err(shared) => ErrorKind::Adhoc(AdhocError::new(shared.kind.to_string())),
            },
            None => ErrorKind::Unknown,
        };

        Error {
            inner: Some(Arc::new(ErrorInner {
                kind,
                cause: Some(self),
            })),
        }
    }

    /// Iterates this error followed by each of its causes.
    pub fn chain(&self) -> impl Iterator<Item = &Error> {
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

    /// Returns `true` if `self` and `other` are the same error instance.
    pub fn ptr_eq(&self, other: &Error) -> bool {
        match (&self.inner, &other.inner) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
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
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    AdapterUnavailable(AdapterUnavailable),
    InvalidConfiguration(InvalidConfiguration),
    InvalidTypeArgument(InvalidTypeArgument),
    ReadOnlyMember(ReadOnlyMember),
    ReentrantConfiguration(ReentrantConfiguration),
    TypeConversion(TypeConversionError),
    UnknownMember(UnknownMember),
    UnmappedValue(UnmappedValue),
    Unknown,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            AdapterUnavailable(err) => core::fmt::Display::fmt(err, f),
            InvalidConfiguration(err) => core::fmt::Display::fmt(err, f),
            InvalidTypeArgument(err) => core::fmt::Display::fmt(err, f),
            ReadOnlyMember(err) => core::fmt::Display::fmt(err, f),
            ReentrantConfiguration(err) => core::fmt::Display::fmt(err, f),
            TypeConversion(err) => core::fmt::Display::fmt(err, f),
            UnknownMember(err) => core::fmt::Display::fmt(err, f),
            UnmappedValue(err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown morph error"),
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

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

impl From<std::num::ParseIntError> for Error {
    fn from(err: std::num::ParseIntError) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

impl From<std::num::ParseFloatError> for Error {
    fn from(err: std::num::ParseFloatError) -> Error {
        Error::from(anyhow::Error::from(err))
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_size() {
        assert_eq!(
            core::mem::size_of::<usize>(),
            core::mem::size_of::<Error>()
        );
    }

    #[test]
    fn error_from_args() {
        let err = Error::from_args(format_args!("test error: {}", 42));
        assert_eq!(err.to_string(), "test error: 42");
    }

    #[test]
    fn error_chain_display() {
        let root = Error::from_args(format_args!("root cause"));
        let mid = Error::from_args(format_args!("middle context"));
        let top = Error::from_args(format_args!("top context"));

        let chained = root.context(mid).context(top);
        assert_eq!(
            chained.to_string(),
            "top context: middle context: root cause"
        );
    }

    #[test]
    fn context_with_shared_consequent() {
        let consequent = err!("while mapping");
        let _keep = consequent.clone();

        let err = err!("boom").context(consequent);
        assert_eq!(err.to_string(), "while mapping: boom");
    }

    #[test]
    fn anyhow_bridge() {
        let our_err: Error = anyhow::anyhow!("something failed").into();
        assert_eq!(our_err.to_string(), "something failed");
    }

    #[test]
    fn parse_error_bridge() {
        let parse_err = "abc".parse::<i32>().unwrap_err();
        let our_err: Error = parse_err.into();
        assert!(our_err.to_string().contains("invalid digit"));
    }

    #[test]
    fn clones_share_identity() {
        let err = err!("cached");
        let clone = err.clone();
        assert!(err.ptr_eq(&clone));
        assert!(!err.ptr_eq(&err!("cached")));
    }

    #[test]
    fn invalid_configuration_lists_diagnostics() {
        let err = Error::invalid_configuration(vec![
            "mapping for 'Bar.a' from 'Foo' not provided".to_string(),
            "mapping for 'Bar.b' from 'Foo' not provided".to_string(),
        ]);
        assert!(err.is_invalid_configuration());
        assert_eq!(
            err.to_string(),
            "mapping configuration is invalid\n\
             mapping for 'Bar.a' from 'Foo' not provided\n\
             mapping for 'Bar.b' from 'Foo' not provided"
        );
        assert_eq!(err.diagnostics().map(<[_]>::len), Some(2));
    }

    #[test]
    fn invalid_type_argument_display() {
        let err = Error::invalid_type_argument("T", "type must be an enum");
        assert!(err.is_invalid_type_argument());
        assert_eq!(
            err.to_string(),
            "invalid type argument `T`: type must be an enum"
        );
    }

    #[test]
    fn reentrant_configuration_display() {
        let err = Error::reentrant_configuration("adapter Foo -> Bar");
        assert!(err.is_reentrant_configuration());
        assert_eq!(
            err.to_string(),
            "re-entrant configuration of adapter Foo -> Bar"
        );
    }
}
