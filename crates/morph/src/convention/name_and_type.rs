use super::{candidates, Configuration, Convention};
use morph_core::Result;

/// Binds a target member to the source member of the same name when the
/// source value can be stored as is.
#[derive(Debug, Default, Clone, Copy)]
pub struct NameAndTypeMatch;

impl Convention for NameAndTypeMatch {
    fn apply(&self, config: &mut dyn Configuration) -> Result<()> {
        for candidate in candidates(config) {
            if !candidate.target.ty.is_assignable_from(&candidate.source.ty) {
                continue;
            }

            tracing::trace!(
                target_member = candidate.target.name,
                source_member = candidate.source.name,
                "bound by name and type"
            );

            config.bind_source_member(candidate.target.name, candidate.source_index, None);
        }

        Ok(())
    }
}
