use super::Error;

#[derive(Debug)]
pub(super) struct UnknownMember {
    model: &'static str,
    index: usize,
}

impl std::error::Error for UnknownMember {}

impl core::fmt::Display for UnknownMember {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "'{}' has no member at index {}", self.model, self.index)
    }
}

impl Error {
    /// Creates an error for a member index that is out of range for a model.
    pub fn unknown_member(model: &'static str, index: usize) -> Error {
        Error::from(super::ErrorKind::UnknownMember(UnknownMember { model, index }))
    }

    /// Returns `true` if this error is an unknown member error.
    pub fn is_unknown_member(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnknownMember(_))
    }
}
