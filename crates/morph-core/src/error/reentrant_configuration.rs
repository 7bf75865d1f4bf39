use super::Error;

/// Error when configuring a mapper requires the result of configuring that
/// same mapper.
#[derive(Debug)]
pub(super) struct ReentrantConfiguration {
    subject: Box<str>,
}

impl std::error::Error for ReentrantConfiguration {}

impl core::fmt::Display for ReentrantConfiguration {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "re-entrant configuration of {}", self.subject)
    }
}

impl Error {
    pub fn reentrant_configuration(subject: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::ReentrantConfiguration(
            ReentrantConfiguration {
                subject: subject.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is a re-entrant configuration error.
    pub fn is_reentrant_configuration(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ReentrantConfiguration(_))
    }
}
