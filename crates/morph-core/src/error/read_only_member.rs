use super::Error;

#[derive(Debug)]
pub(super) struct ReadOnlyMember {
    model: &'static str,
    member: Box<str>,
}

impl std::error::Error for ReadOnlyMember {}

impl core::fmt::Display for ReadOnlyMember {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "member '{}.{}' has no setter", self.model, self.member)
    }
}

impl Error {
    /// Creates an error for an attempt to set a member that has no instance
    /// setter.
    pub fn read_only_member(model: &'static str, member: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::ReadOnlyMember(ReadOnlyMember {
            model,
            member: member.into().into(),
        }))
    }

    /// Returns `true` if this error is a read-only member error.
    pub fn is_read_only_member(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ReadOnlyMember(_))
    }
}
