use super::Error;

/// Error when a mapping configuration fails validation.
///
/// Every problem found is kept as a separate diagnostic line. The order is
/// stable: target members in declaration order, then bindings naming
/// members that do not exist, in the order they were configured.
#[derive(Debug)]
pub(super) struct InvalidConfiguration {
    diagnostics: Box<[String]>,
}

impl std::error::Error for InvalidConfiguration {}

impl core::fmt::Display for InvalidConfiguration {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("mapping configuration is invalid")?;

        for diagnostic in &self.diagnostics[..] {
            f.write_str("\n")?;
            f.write_str(diagnostic)?;
        }

        Ok(())
    }
}

impl Error {
    /// Creates an aggregated validation error from a list of diagnostics.
    pub fn invalid_configuration(diagnostics: impl IntoIterator<Item = String>) -> Error {
        Error::from(super::ErrorKind::InvalidConfiguration(InvalidConfiguration {
            diagnostics: diagnostics.into_iter().collect(),
        }))
    }

    /// Returns `true` if this error is an aggregated validation error.
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidConfiguration(_))
    }

    /// Returns the individual diagnostics of a validation error.
    ///
    /// Returns `None` for any other kind of error.
    pub fn diagnostics(&self) -> Option<&[String]> {
        match self.kind() {
            super::ErrorKind::InvalidConfiguration(err) => Some(&err.diagnostics),
            _ => None,
        }
    }
}
