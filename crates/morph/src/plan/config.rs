use super::{ActionBinding, Plan, ValueBinding};
use crate::convention::{Configuration, Transform};
use crate::mapper::Map;

use morph_core::schema::Policy;
use morph_core::{Member, Model, Object, Result, Schema, Value};
use std::sync::Arc;

/// Custom configuration of a mapper, applied after conventions.
///
/// ```ignore
/// config.member("full_name").from(|p: &Person| format!("{} {}", p.first, p.last));
/// config.member("audit").by_ignoring();
/// config.member("first").and("last").by_invoking(|t: &mut Row, p: &Person| {
///     t.first = p.first.clone();
///     t.last = p.last.clone();
///     Ok(())
/// });
/// ```
pub struct MapperConfig<S, T> {
    plan: Plan<S, T>,
}

impl<S: Model, T: Model> MapperConfig<S, T> {
    pub(crate) fn new() -> Self {
        MapperConfig {
            plan: Plan::new(S::schema(), T::schema(), Policy::Mapper),
        }
    }
}

impl<S: 'static, T: 'static> MapperConfig<S, T> {
    /// Starts a binding for the target member `name`.
    pub fn member(&mut self, name: impl Into<String>) -> MemberBinder<'_, S, T> {
        MemberBinder {
            plan: &mut self.plan,
            name: name.into(),
        }
    }

    /// Adds an action that runs on every mapping, after all member
    /// bindings. It does not count as a binding for any member.
    pub fn invoke(&mut self, action: impl Fn(&mut T, &S) -> Result<()> + Send + Sync + 'static) {
        self.plan.add_global_action(Arc::new(action));
    }

    pub fn source_schema(&self) -> &'static Schema {
        self.plan.source()
    }

    pub fn target_schema(&self) -> &'static Schema {
        self.plan.target()
    }

    pub fn is_bound(&self, member: &str) -> bool {
        self.plan.is_bound(member)
    }

    pub(crate) fn into_plan(self) -> Plan<S, T> {
        self.plan
    }
}

/// Binds one target member of a mapper.
pub struct MemberBinder<'a, S, T> {
    plan: &'a mut Plan<S, T>,
    name: String,
}

impl<'a, S: 'static, T: 'static> MemberBinder<'a, S, T> {
    /// Assigns the value returned by `f`.
    pub fn from<M: Member>(self, f: impl Fn(&S) -> M + Send + Sync + 'static) {
        self.plan.set_value(
            self.name,
            ValueBinding {
                compute: Arc::new(move |source: &S| Ok(f(source).into_value())),
                ty: Some(M::ty()),
            },
        );
    }

    /// Assigns the value returned by `f`, propagating its error.
    pub fn from_result<M: Member>(self, f: impl Fn(&S) -> Result<M> + Send + Sync + 'static) {
        self.plan.set_value(
            self.name,
            ValueBinding {
                compute: Arc::new(move |source: &S| f(source).map(M::into_value)),
                ty: Some(M::ty()),
            },
        );
    }

    /// Assigns a dynamically typed value.
    pub fn from_value(self, f: impl Fn(&S) -> Result<Value> + Send + Sync + 'static) {
        self.plan.set_value(
            self.name,
            ValueBinding {
                compute: Arc::new(f),
                ty: None,
            },
        );
    }

    /// Runs `action` instead of assigning the member.
    pub fn by_invoking(self, action: impl Fn(&mut T, &S) -> Result<()> + Send + Sync + 'static) {
        self.plan
            .set_action(self.name, ActionBinding::Invoke(Arc::new(action)));
    }

    /// Leaves the member untouched.
    pub fn by_ignoring(self) {
        self.plan.set_action(self.name, ActionBinding::Ignore);
    }

    /// Maps a nested object with another mapper into a fresh `NT`.
    ///
    /// A `None` from `accessor` assigns `Null` without running the nested
    /// mapper.
    pub fn by_delegating_to<NS, NT>(
        self,
        accessor: impl Fn(&S) -> Option<Arc<NS>> + Send + Sync + 'static,
        mapper: impl Map<NS, NT> + 'static,
    ) where
        NS: Send + Sync + 'static,
        NT: Object + Default,
    {
        self.plan.set_value(
            self.name,
            ValueBinding {
                compute: Arc::new(move |source: &S| -> Result<Value> {
                    let Some(nested) = accessor(source) else {
                        return Ok(Value::Null);
                    };

                    let mut target = NT::default();
                    mapper.map(&nested, &mut target)?;
                    Ok(Arc::new(target).into_value())
                }),
                ty: Some(<Arc<NT> as Member>::ty()),
            },
        );
    }

    /// Marks this member as covered, and continues with `name`.
    ///
    /// Used to let a single action set several members:
    /// `member("a").and("b").by_invoking(..)` ignores `a` and binds the
    /// action to `b`.
    pub fn and(self, name: impl Into<String>) -> MemberBinder<'a, S, T> {
        self.plan.set_action(self.name, ActionBinding::Ignore);
        MemberBinder {
            plan: self.plan,
            name: name.into(),
        }
    }
}

/// Custom configuration of an adapter, applied after conventions.
pub struct AdapterConfig<S: ?Sized> {
    plan: Plan<S, ()>,
}

impl<S: ?Sized + Model> AdapterConfig<S> {
    pub(crate) fn new(source: &'static Schema, target: &'static Schema) -> Self {
        AdapterConfig {
            plan: Plan::new(source, target, Policy::Adapter),
        }
    }

    /// Starts a binding for the view member `name`.
    pub fn member(&mut self, name: impl Into<String>) -> ViewMemberBinder<'_, S> {
        ViewMemberBinder {
            plan: &mut self.plan,
            name: name.into(),
        }
    }

    pub fn source_schema(&self) -> &'static Schema {
        self.plan.source()
    }

    pub fn target_schema(&self) -> &'static Schema {
        self.plan.target()
    }

    pub fn is_bound(&self, member: &str) -> bool {
        self.plan.is_bound(member)
    }

    pub(crate) fn into_plan(self) -> Plan<S, ()> {
        self.plan
    }
}

/// Binds one member of an adapted view.
pub struct ViewMemberBinder<'a, S: ?Sized> {
    plan: &'a mut Plan<S, ()>,
    name: String,
}

impl<S: ?Sized + 'static> ViewMemberBinder<'_, S> {
    /// The getter returns the value computed by `f`.
    pub fn from<M: Member>(self, f: impl Fn(&S) -> M + Send + Sync + 'static) {
        self.plan.set_value(
            self.name,
            ValueBinding {
                compute: Arc::new(move |source: &S| Ok(f(source).into_value())),
                ty: Some(M::ty()),
            },
        );
    }

    pub fn from_result<M: Member>(self, f: impl Fn(&S) -> Result<M> + Send + Sync + 'static) {
        self.plan.set_value(
            self.name,
            ValueBinding {
                compute: Arc::new(move |source: &S| f(source).map(M::into_value)),
                ty: Some(M::ty()),
            },
        );
    }

    pub fn from_value(self, f: impl Fn(&S) -> Result<Value> + Send + Sync + 'static) {
        self.plan.set_value(
            self.name,
            ValueBinding {
                compute: Arc::new(f),
                ty: None,
            },
        );
    }
}

impl<S: Model, T: 'static> Configuration for MapperConfig<S, T> {
    fn source(&self) -> &'static Schema {
        self.plan.source()
    }

    fn target(&self) -> &'static Schema {
        self.plan.target()
    }

    fn policy(&self) -> Policy {
        self.plan.policy()
    }

    fn is_bound(&self, member: &str) -> bool {
        self.plan.is_bound(member)
    }

    fn bind_source_member(&mut self, target: &str, source: usize, transform: Option<Transform>) {
        self.plan.bind_source_member(target, source, transform);
    }
}

impl<S: ?Sized + Model> Configuration for AdapterConfig<S> {
    fn source(&self) -> &'static Schema {
        self.plan.source()
    }

    fn target(&self) -> &'static Schema {
        self.plan.target()
    }

    fn policy(&self) -> Policy {
        self.plan.policy()
    }

    fn is_bound(&self, member: &str) -> bool {
        self.plan.is_bound(member)
    }

    fn bind_source_member(&mut self, target: &str, source: usize, transform: Option<Transform>) {
        self.plan.bind_source_member(target, source, transform);
    }
}
