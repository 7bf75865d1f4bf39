use super::{candidates, Configuration, Convention};
use crate::enumeration::DynEnumMapper;
use morph_core::{Result, Value};

use std::sync::Arc;

/// Translates between two different enum types by variant name.
///
/// Every variant of the target enum must be reachable from the source enum.
/// Members whose enums cannot be translated are left unbound.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnumMatch;

impl Convention for EnumMatch {
    fn apply(&self, config: &mut dyn Configuration) -> Result<()> {
        for candidate in candidates(config) {
            let (from, to) = (&candidate.source.ty, &candidate.target.ty);

            if to.is_assignable_from(from)
                || from.unwrap_option().as_enum().is_none()
                || to.unwrap_option().as_enum().is_none()
            {
                continue;
            }

            // A nullable target still accepts the non-nullable translation
            let to = if from.is_option() { to } else { to.unwrap_option() };

            let mapper = match DynEnumMapper::new(from, to).and_then(|mapper| {
                mapper.validate()?;
                Ok(mapper)
            }) {
                Ok(mapper) => Arc::new(mapper),
                Err(err) => {
                    tracing::trace!(
                        target_member = candidate.target.name,
                        error = %err,
                        "skipping enum translation"
                    );
                    continue;
                }
            };

            tracing::trace!(
                target_member = candidate.target.name,
                source_member = candidate.source.name,
                "bound by enum translation"
            );

            config.bind_source_member(
                candidate.target.name,
                candidate.source_index,
                Some(Arc::new(move |value: Value| mapper.map_value(value))),
            );
        }

        Ok(())
    }
}
