use super::Error;

/// Error when no adapter can be built for a pair of types.
///
/// This occurs when the source is not a reflected model, or the target is
/// not a view trait, so there is nothing a convention-based adapter could
/// be generated from.
#[derive(Debug)]
pub(super) struct AdapterUnavailable {
    source: &'static str,
    target: &'static str,
    reason: Box<str>,
}

impl std::error::Error for AdapterUnavailable {}

impl core::fmt::Display for AdapterUnavailable {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "cannot adapt '{}' to '{}': {}",
            self.source, self.target, self.reason
        )
    }
}

impl Error {
    pub fn adapter_unavailable(
        source: &'static str,
        target: &'static str,
        reason: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::AdapterUnavailable(AdapterUnavailable {
            source,
            target,
            reason: reason.into().into(),
        }))
    }

    /// Returns `true` if this error is an adapter unavailable error.
    pub fn is_adapter_unavailable(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::AdapterUnavailable(_))
    }
}
