use super::Error;

/// Error when an enumeration value has no configured mapping.
#[derive(Debug)]
pub(super) struct UnmappedValue {
    value: Box<str>,
    ty: Box<str>,
}

impl std::error::Error for UnmappedValue {}

impl core::fmt::Display for UnmappedValue {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "no mapping for value '{}' of type '{}'", self.value, self.ty)
    }
}

impl Error {
    pub fn unmapped_value(value: impl Into<String>, ty: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnmappedValue(UnmappedValue {
            value: value.into().into(),
            ty: ty.into().into(),
        }))
    }

    /// Returns `true` if this error is an unmapped enumeration value error.
    pub fn is_unmapped_value(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnmappedValue(_))
    }
}
