use super::{MemberDescriptor, Schema};

/// Selects which target members take part in a mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Every member of a view. Adapters build read-only objects, so a
    /// settable member is a validation error rather than being skipped.
    Adapter,

    /// Members with an instance setter.
    Mapper,
}

impl Schema {
    /// Target members eligible under `policy`, in declaration order.
    pub fn eligible_members(
        &self,
        policy: Policy,
    ) -> impl Iterator<Item = (usize, &MemberDescriptor)> + '_ {
        self.members
            .iter()
            .enumerate()
            .filter(move |(_, member)| match policy {
                Policy::Adapter => true,
                Policy::Mapper => member.has_instance_setter(),
            })
    }

    /// Members that can be read from a source instance.
    pub fn source_members(&self) -> impl Iterator<Item = (usize, &MemberDescriptor)> + '_ {
        self.members
            .iter()
            .enumerate()
            .filter(|(_, member)| member.readable)
    }

    /// Finds the readable member matching `name`.
    ///
    /// An exact match wins. Without one, a single case-insensitive match is
    /// used. Several exact matches, or several case-insensitive ones, are
    /// ambiguous and yield `None`.
    pub fn find_matching(&self, name: &str) -> Option<(usize, &MemberDescriptor)> {
        let mut exact = self.source_members().filter(|(_, member)| member.name == name);

        match (exact.next(), exact.next()) {
            (Some(found), None) => return Some(found),
            (Some(_), Some(_)) => return None,
            _ => {}
        }

        let mut folded = self
            .source_members()
            .filter(|(_, member)| eq_ignore_case(member.name, name));

        match (folded.next(), folded.next()) {
            (Some(found), None) => Some(found),
            _ => None,
        }
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Type;
    use pretty_assertions::assert_eq;

    fn schema(names: &[&'static str]) -> Schema {
        Schema::model(
            "Source",
            names
                .iter()
                .map(|&name| MemberDescriptor::new(name, Type::String))
                .collect(),
        )
    }

    #[test]
    fn exact_match_preferred() {
        let schema = schema(&["foo", "Foo"]);
        assert_eq!(schema.find_matching("Foo").map(|(i, _)| i), Some(1));
    }

    #[test]
    fn case_insensitive_fallback() {
        let schema = schema(&["foo"]);
        assert_eq!(schema.find_matching("Foo").map(|(i, _)| i), Some(0));
    }

    #[test]
    fn ambiguous_case_insensitive() {
        let schema = schema(&["Foo", "FOO"]);
        assert!(schema.find_matching("foo").is_none());
    }

    #[test]
    fn duplicate_exact_names_do_not_match() {
        let schema = schema(&["name", "name"]);
        assert!(schema.find_matching("name").is_none());
    }

    #[test]
    fn unreadable_members_are_not_sources() {
        let schema = Schema::model(
            "Source",
            vec![MemberDescriptor::new("secret", Type::String).setter_only()],
        );
        assert!(schema.find_matching("secret").is_none());
    }

    #[test]
    fn mapper_policy_requires_instance_setter() {
        let schema = Schema::model(
            "Target",
            vec![
                MemberDescriptor::new("a", Type::I32),
                MemberDescriptor::new("b", Type::I32).getter_only(),
                MemberDescriptor::new("c", Type::I32).static_setter(),
            ],
        );

        let mapper: Vec<_> = schema
            .eligible_members(Policy::Mapper)
            .map(|(_, m)| m.name)
            .collect();
        assert_eq!(mapper, ["a"]);
        assert_eq!(schema.eligible_members(Policy::Adapter).count(), 3);
    }
}
