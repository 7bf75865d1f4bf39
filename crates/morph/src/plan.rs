mod config;
pub use config::{AdapterConfig, MapperConfig, MemberBinder, ViewMemberBinder};

pub(crate) mod verify;

use crate::convention::{Configuration, Transform};
use morph_core::schema::Policy;
use morph_core::{Getter, Model, Result, Schema, Type};

use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;

/// Computes a member value from the source.
pub type ValueFn<S> = Getter<S>;

/// Mutates the target using the source.
pub type ActionFn<S, T> = Arc<dyn Fn(&mut T, &S) -> Result<()> + Send + Sync>;

/// Binds a member to a value computed from the source.
pub struct ValueBinding<S: ?Sized> {
    pub(crate) compute: ValueFn<S>,

    /// Type of the computed value, when known at configuration time
    pub(crate) ty: Option<Type>,
}

pub enum ActionBinding<S: ?Sized, T: ?Sized> {
    /// Run the action after all values are assigned
    Invoke(ActionFn<S, T>),

    /// The member is intentionally left alone
    Ignore,
}

/// Which table received the latest binding for a member name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BindingKind {
    Value,
    Action,
}

/// Member bindings for one source/target pair, built during configuration
/// and frozen once compiled.
///
/// Value and action bindings are kept in separate tables. Within a table the
/// latest binding for a name replaces the earlier one but keeps its
/// position.
pub struct Plan<S: ?Sized, T: ?Sized> {
    source: &'static Schema,
    target: &'static Schema,
    policy: Policy,
    values: IndexMap<String, ValueBinding<S>>,
    actions: IndexMap<String, ActionBinding<S, T>>,
    global_actions: Vec<ActionFn<S, T>>,
    latest: HashMap<String, BindingKind>,
}

impl<S: ?Sized, T: ?Sized> Plan<S, T> {
    pub(crate) fn new(source: &'static Schema, target: &'static Schema, policy: Policy) -> Self {
        Plan {
            source,
            target,
            policy,
            values: IndexMap::new(),
            actions: IndexMap::new(),
            global_actions: vec![],
            latest: HashMap::new(),
        }
    }

    pub fn source(&self) -> &'static Schema {
        self.source
    }

    pub fn target(&self) -> &'static Schema {
        self.target
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub(crate) fn set_value(&mut self, member: String, binding: ValueBinding<S>) {
        self.latest.insert(member.clone(), BindingKind::Value);
        self.values.insert(member, binding);
    }

    pub(crate) fn set_action(&mut self, member: String, binding: ActionBinding<S, T>) {
        self.latest.insert(member.clone(), BindingKind::Action);
        self.actions.insert(member, binding);
    }

    pub(crate) fn add_global_action(&mut self, action: ActionFn<S, T>) {
        self.global_actions.push(action);
    }

    pub(crate) fn values(&self) -> impl Iterator<Item = (&str, &ValueBinding<S>)> {
        self.values.iter().map(|(name, binding)| (&name[..], binding))
    }

    pub(crate) fn actions(&self) -> impl Iterator<Item = (&str, &ActionBinding<S, T>)> {
        self.actions.iter().map(|(name, binding)| (&name[..], binding))
    }

    pub(crate) fn global_actions(&self) -> &[ActionFn<S, T>] {
        &self.global_actions
    }

    pub(crate) fn value(&self, member: &str) -> Option<&ValueBinding<S>> {
        self.values.get(member)
    }

    pub(crate) fn has_value(&self, member: &str) -> bool {
        self.values.contains_key(member)
    }

    /// True if a named action, including an ignore, covers `member`.
    pub(crate) fn has_action(&self, member: &str) -> bool {
        self.actions.contains_key(member)
    }

    pub(crate) fn latest(&self, member: &str) -> Option<BindingKind> {
        self.latest.get(member).copied()
    }

    /// True if either table has a binding for `member`.
    pub fn is_bound(&self, member: &str) -> bool {
        self.has_value(member) || self.has_action(member)
    }
}

impl<S: ?Sized + Model, T: ?Sized> Configuration for Plan<S, T> {
    fn source(&self) -> &'static Schema {
        self.source
    }

    fn target(&self) -> &'static Schema {
        self.target
    }

    fn policy(&self) -> Policy {
        self.policy
    }

    fn is_bound(&self, member: &str) -> bool {
        Plan::is_bound(self, member)
    }

    fn bind_source_member(&mut self, target: &str, source: usize, transform: Option<Transform>) {
        let binding = match transform {
            None => ValueBinding {
                compute: Arc::new(move |s: &S| s.get(source)),
                ty: self.source.member(source).map(|member| member.ty.clone()),
            },
            Some(transform) => ValueBinding {
                compute: Arc::new(move |s: &S| transform(s.get(source)?)),
                ty: None,
            },
        };

        self.set_value(target.to_string(), binding);
    }
}

impl<S: ?Sized> Clone for ValueBinding<S> {
    fn clone(&self) -> Self {
        ValueBinding {
            compute: self.compute.clone(),
            ty: self.ty.clone(),
        }
    }
}
