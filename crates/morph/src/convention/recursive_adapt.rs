use super::{candidates, Configuration, Convention};
use crate::{DynAdapt, Locator};
use morph_core::{err, Error, Result, Type, Value};

use std::sync::Arc;

/// Adapts a nested model member to a nested view member with an adapter
/// resolved through a [`Locator`].
///
/// A member whose adapter cannot be resolved or does not validate is left
/// unbound. If nothing else binds it, validation of the outer adapter
/// reports it.
#[derive(Debug, Clone)]
pub struct RecursiveAdapt {
    locator: Locator,
}

impl RecursiveAdapt {
    pub fn new(locator: Locator) -> RecursiveAdapt {
        RecursiveAdapt { locator }
    }

    fn resolve(&self, source: &Type, target: &Type) -> Result<Arc<dyn DynAdapt>> {
        let (Some(source), Some(target)) = (
            source.unwrap_option().as_object(),
            target.unwrap_option().as_object(),
        ) else {
            return Err(err!("not an object member"));
        };

        let adapter = self.locator.resolve(source, target)?;

        // The adapter is being configured further up the stack; its plan
        // is validated there.
        if !adapter.is_configuring() {
            adapter.validate()?;
        }

        Ok(adapter)
    }
}

impl Convention for RecursiveAdapt {
    fn apply(&self, config: &mut dyn Configuration) -> Result<()> {
        for candidate in candidates(config) {
            let (from, to) = (&candidate.source.ty, &candidate.target.ty);

            if to.is_assignable_from(from) || !to.is_view() || !from.is_model() {
                continue;
            }

            // A null source has nowhere to go in a non-optional view member.
            if from.is_option() && !to.is_option() {
                continue;
            }

            let adapter = match self.resolve(from, to) {
                Ok(adapter) => adapter,
                Err(err) => {
                    tracing::debug!(
                        target_member = candidate.target.name,
                        source_member = candidate.source.name,
                        error = %err,
                        "skipping recursive adaptation"
                    );
                    continue;
                }
            };

            tracing::trace!(
                target_member = candidate.target.name,
                source_member = candidate.source.name,
                "bound by recursive adaptation"
            );

            config.bind_source_member(
                candidate.target.name,
                candidate.source_index,
                Some(Arc::new(move |value: Value| match value {
                    Value::Null => Ok(Value::Null),
                    Value::Object(object) => adapter.adapt(&object),
                    value => Err(Error::type_conversion(value, adapter.target().name)),
                })),
            );
        }

        Ok(())
    }
}
