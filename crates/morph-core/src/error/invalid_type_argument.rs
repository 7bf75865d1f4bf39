use super::Error;

/// Error when a mapper is instantiated with type arguments it cannot work
/// with, for example an enumeration mapper over a non-enum type.
///
/// Raised when the mapper is constructed, never while mapping.
#[derive(Debug)]
pub(super) struct InvalidTypeArgument {
    argument: Box<str>,
    message: Box<str>,
}

impl std::error::Error for InvalidTypeArgument {}

impl core::fmt::Display for InvalidTypeArgument {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "invalid type argument `{}`: {}",
            self.argument, self.message
        )
    }
}

impl Error {
    /// Creates an invalid type argument error.
    pub fn invalid_type_argument(
        argument: impl Into<String>,
        message: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::InvalidTypeArgument(InvalidTypeArgument {
            argument: argument.into().into(),
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid type argument error.
    pub fn is_invalid_type_argument(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidTypeArgument(_))
    }
}
