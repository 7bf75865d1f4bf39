use crate::plan::{ActionBinding, ActionFn, Plan, ValueFn};
use morph_core::{Model, Result};

/// The executable form of a mapper plan.
pub(crate) struct CompiledMap<S, T> {
    /// Target member index and the binding computing its value, in plan
    /// order
    assignments: Vec<(usize, ValueFn<S>)>,

    /// Named actions in plan order, then global actions
    actions: Vec<ActionFn<S, T>>,
}

impl<S, T: Model> CompiledMap<S, T> {
    pub(crate) fn compile(plan: &Plan<S, T>) -> Result<CompiledMap<S, T>> {
        plan.verify()?;

        let target = plan.target();
        let mut assignments = vec![];

        for (name, binding) in plan.values() {
            for index in target.indices_of(name) {
                // Members without an instance setter passed validation only
                // because an action was configured for them last.
                if target.members[index].has_instance_setter() {
                    assignments.push((index, binding.compute.clone()));
                }
            }
        }

        let actions = plan
            .actions()
            .filter_map(|(_, binding)| match binding {
                ActionBinding::Invoke(action) => Some(action.clone()),
                ActionBinding::Ignore => None,
            })
            .chain(plan.global_actions().iter().cloned())
            .collect();

        Ok(CompiledMap {
            assignments,
            actions,
        })
    }

    pub(crate) fn run(&self, source: &S, target: &mut T) -> Result<()> {
        for (index, compute) in &self.assignments {
            target.set(*index, compute(source)?)?;
        }

        for action in &self.actions {
            action(target, source)?;
        }

        Ok(())
    }
}
