use crate::plan::Plan;
use morph_core::{err, Adapted, Getter, Result, Schema, Value};

use std::sync::Arc;

/// The executable form of an adapter plan: one getter per view member.
pub(crate) struct CompiledAdapter<S: ?Sized> {
    target: &'static Schema,
    getters: Arc<[Getter<S>]>,
}

impl<S: ?Sized + 'static> CompiledAdapter<S> {
    pub(crate) fn compile(plan: &Plan<S, ()>) -> Result<CompiledAdapter<S>> {
        plan.verify()?;

        let target = plan.target();
        let getters = target
            .members
            .iter()
            .map(|member| match plan.value(member.name) {
                Some(binding) => binding.compute.clone(),
                None => {
                    let (view, name) = (target.name, member.name);
                    let missing: Getter<S> = Arc::new(move |_: &S| -> Result<Value> {
                        Err(err!("no binding for '{}.{}'", view, name))
                    });
                    missing
                }
            })
            .collect();

        Ok(CompiledAdapter { target, getters })
    }

    /// Builds the object behind a view. No getter runs until a member is
    /// read.
    pub(crate) fn create(&self, source: Arc<S>) -> Adapted<S> {
        Adapted::new(source, self.target, self.getters.clone())
    }
}
