use super::{BindingKind, Plan};
use morph_core::schema::{MemberDescriptor, Policy, Setter};
use morph_core::{Error, Result};

struct Verify<'a, S: ?Sized, T: ?Sized> {
    plan: &'a Plan<S, T>,
    diagnostics: Vec<String>,
}

impl<S: ?Sized, T: ?Sized> Plan<S, T> {
    /// Checks that every target member has a binding suited to it.
    ///
    /// Collects every problem before failing, so the error lists all of them
    /// in target member order. Has no side effects and may be called any
    /// number of times.
    pub fn verify(&self) -> Result<()> {
        let diagnostics = Verify {
            plan: self,
            diagnostics: vec![],
        }
        .verify();

        if diagnostics.is_empty() {
            Ok(())
        } else {
            Err(Error::invalid_configuration(diagnostics))
        }
    }
}

impl<S: ?Sized, T: ?Sized> Verify<'_, S, T> {
    fn verify(mut self) -> Vec<String> {
        for member in &self.plan.target().members {
            match self.plan.policy() {
                Policy::Adapter => self.verify_view_member(member),
                Policy::Mapper => self.verify_model_member(member),
            }

            self.verify_binding_type(member);
        }

        self.verify_bound_names_exist();
        self.diagnostics
    }

    fn verify_view_member(&mut self, member: &MemberDescriptor) {
        if member.is_settable() {
            self.report(format!(
                "adapter target member '{}.{}' must not be settable",
                self.target_name(),
                member.name
            ));
        } else if !self.plan.has_value(member.name) {
            self.report(format!(
                "mapping for '{}.{}' from '{}' not provided",
                self.target_name(),
                member.name,
                self.source_name()
            ));
        }
    }

    fn verify_model_member(&mut self, member: &MemberDescriptor) {
        let (target, source) = (self.target_name(), self.source_name());

        match member.setter {
            Setter::Instance => {
                if !self.plan.has_value(member.name) && !self.plan.has_action(member.name) {
                    self.report(format!(
                        "a mapping was not provided for target member '{}.{}' from source '{}'",
                        target, member.name, source
                    ));
                }
            }
            setter => {
                let qualifier = if setter == Setter::Static {
                    "static "
                } else {
                    ""
                };

                match self.plan.latest(member.name) {
                    Some(BindingKind::Value) => {
                        let reason = if setter == Setter::Static {
                            "the target member setter is static"
                        } else {
                            "the target member has no public instance setter"
                        };

                        self.report(format!(
                            "a mapping was provided as an assignment for target member '{}.{}' but {}",
                            target, member.name, reason
                        ));
                    }
                    Some(BindingKind::Action) => {}
                    None => self.report(format!(
                        "a mapping was not provided for {}read-only target member '{}.{}' from source '{}'",
                        qualifier, target, member.name, source
                    )),
                }
            }
        }
    }

    /// Typed bindings must produce something the member can hold.
    fn verify_binding_type(&mut self, member: &MemberDescriptor) {
        let Some(ty) = self
            .plan
            .value(member.name)
            .and_then(|binding| binding.ty.as_ref())
        else {
            return;
        };

        if !member.ty.is_assignable_from(ty) {
            self.report(format!(
                "mapping for '{}.{}' produces '{}' but the member type is '{}'",
                self.target_name(),
                member.name,
                ty,
                member.ty
            ));
        }
    }

    fn verify_bound_names_exist(&mut self) {
        let target = self.plan.target();

        let mut unknown = vec![];

        for name in self
            .plan
            .values()
            .map(|(name, _)| name)
            .chain(self.plan.actions().map(|(name, _)| name))
        {
            if !target.has_member(name) && !unknown.contains(&name) {
                unknown.push(name);
            }
        }

        for name in unknown {
            self.report(format!(
                "a mapping was provided for unknown target member '{}.{}'",
                target.name, name
            ));
        }
    }

    fn report(&mut self, diagnostic: String) {
        self.diagnostics.push(diagnostic);
    }

    fn target_name(&self) -> &'static str {
        self.plan.target().name
    }

    fn source_name(&self) -> &'static str {
        self.plan.source().name
    }
}

#[cfg(test)]
mod tests {
    use super::super::{ActionBinding, ActionFn, ValueBinding};
    use super::*;
    use morph_core::{Schema, Type, Value};
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, OnceLock};

    fn source() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::model(
                "Source",
                vec![MemberDescriptor::new("a", Type::String)],
            )
        })
    }

    fn target() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::model(
                "Target",
                vec![
                    MemberDescriptor::new("a", Type::String),
                    MemberDescriptor::new("b", Type::I32),
                    MemberDescriptor::new("c", Type::I32).getter_only(),
                    MemberDescriptor::new("d", Type::I32).static_setter(),
                ],
            )
        })
    }

    fn value(ty: Option<Type>) -> ValueBinding<()> {
        ValueBinding {
            compute: Arc::new(|_: &()| Ok(Value::Null)),
            ty,
        }
    }

    fn noop() -> ActionFn<(), ()> {
        Arc::new(|_: &mut (), _: &()| Ok(()))
    }

    fn diagnostics(plan: &Plan<(), ()>) -> Vec<String> {
        match plan.verify() {
            Ok(()) => vec![],
            Err(err) => err.diagnostics().unwrap().to_vec(),
        }
    }

    #[test]
    fn reports_every_unbound_member_in_order() {
        let plan = Plan::<(), ()>::new(source(), target(), Policy::Mapper);

        assert_eq!(
            diagnostics(&plan),
            [
                "a mapping was not provided for target member 'Target.a' from source 'Source'",
                "a mapping was not provided for target member 'Target.b' from source 'Source'",
                "a mapping was not provided for read-only target member 'Target.c' from source 'Source'",
                "a mapping was not provided for static read-only target member 'Target.d' from source 'Source'",
            ]
        );
    }

    #[test]
    fn actions_and_ignores_cover_members() {
        let mut plan = Plan::<(), ()>::new(source(), target(), Policy::Mapper);
        plan.set_value("a".into(), value(Some(Type::String)));
        plan.set_action("b".into(), ActionBinding::Invoke(noop()));
        plan.set_action("c".into(), ActionBinding::Ignore);
        plan.set_action("d".into(), ActionBinding::Ignore);

        assert!(plan.verify().is_ok());
        assert!(plan.verify().is_ok());
    }

    #[test]
    fn global_actions_cover_nothing() {
        let mut plan = Plan::<(), ()>::new(source(), target(), Policy::Mapper);
        plan.set_value("a".into(), value(None));
        plan.set_action("c".into(), ActionBinding::Ignore);
        plan.set_action("d".into(), ActionBinding::Ignore);
        plan.add_global_action(noop());

        assert_eq!(
            diagnostics(&plan),
            ["a mapping was not provided for target member 'Target.b' from source 'Source'"]
        );
    }

    #[test]
    fn assignments_to_read_only_members() {
        let mut plan = Plan::<(), ()>::new(source(), target(), Policy::Mapper);
        plan.set_value("a".into(), value(None));
        plan.set_value("b".into(), value(None));
        plan.set_value("c".into(), value(None));
        plan.set_value("d".into(), value(None));

        assert_eq!(
            diagnostics(&plan),
            [
                "a mapping was provided as an assignment for target member 'Target.c' but the target member has no public instance setter",
                "a mapping was provided as an assignment for target member 'Target.d' but the target member setter is static",
            ]
        );
    }

    #[test]
    fn latest_kind_decides_for_read_only_members() {
        let mut plan = Plan::<(), ()>::new(source(), target(), Policy::Mapper);
        plan.set_value("a".into(), value(None));
        plan.set_value("b".into(), value(None));
        plan.set_value("c".into(), value(None));
        plan.set_action("c".into(), ActionBinding::Ignore);
        plan.set_action("d".into(), ActionBinding::Ignore);

        assert!(plan.verify().is_ok());
    }

    #[test]
    fn typed_binding_mismatch_and_unknown_members() {
        let mut plan = Plan::<(), ()>::new(source(), target(), Policy::Mapper);
        plan.set_value("a".into(), value(Some(Type::I64)));
        plan.set_value("b".into(), value(Some(Type::I32)));
        plan.set_action("c".into(), ActionBinding::Ignore);
        plan.set_action("d".into(), ActionBinding::Ignore);
        plan.set_value("zzz".into(), value(None));
        plan.set_action("zzz".into(), ActionBinding::Ignore);

        assert_eq!(
            diagnostics(&plan),
            [
                "mapping for 'Target.a' produces 'i64' but the member type is 'String'",
                "a mapping was provided for unknown target member 'Target.zzz'",
            ]
        );
    }

    #[test]
    fn adapter_policy() {
        let mut plan = Plan::<(), ()>::new(source(), target(), Policy::Adapter);
        plan.set_value("c".into(), value(None));

        assert_eq!(
            diagnostics(&plan),
            [
                "adapter target member 'Target.a' must not be settable",
                "adapter target member 'Target.b' must not be settable",
                "adapter target member 'Target.d' must not be settable",
            ]
        );
    }
}
