use super::{candidates, Configuration, Convention};
use crate::Conversions;
use morph_core::{Result, Value};

use std::sync::Arc;

/// Binds a target member to the source member of the same name through a
/// type conversion.
#[derive(Debug, Clone)]
pub struct Convertible {
    conversions: Conversions,
}

impl Convertible {
    pub fn new(conversions: Conversions) -> Convertible {
        Convertible { conversions }
    }
}

impl Convention for Convertible {
    fn apply(&self, config: &mut dyn Configuration) -> Result<()> {
        for candidate in candidates(config) {
            let (from, to) = (&candidate.source.ty, &candidate.target.ty);

            if to.is_assignable_from(from) {
                continue;
            }

            let Some(converter) = self.conversions.find(from, to) else {
                continue;
            };

            tracing::trace!(
                target_member = candidate.target.name,
                source_member = candidate.source.name,
                %from,
                %to,
                "bound by conversion"
            );

            let to = to.clone();
            config.bind_source_member(
                candidate.target.name,
                candidate.source_index,
                Some(Arc::new(move |value: Value| converter.convert(value, &to))),
            );
        }

        Ok(())
    }
}
