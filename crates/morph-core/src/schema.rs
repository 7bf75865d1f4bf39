mod inventory;
pub use inventory::Policy;

mod member;
pub use member::{MemberDescriptor, Setter};

/// Member inventory of a reflected model or view.
#[derive(Debug)]
pub struct Schema {
    /// Name of the type, as written in diagnostics
    pub name: &'static str,

    pub kind: SchemaKind,

    /// Members in declaration order. For views, inherited members come
    /// first.
    pub members: Vec<MemberDescriptor>,

    /// Views this view extends, directly or transitively, with the position
    /// of their first member in `members`.
    pub extends: Vec<Extends>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    /// A struct with readable and possibly writable members
    Model,

    /// A trait whose members are getters implemented by adapters
    View,
}

#[derive(Debug, Clone, Copy)]
pub struct Extends {
    pub schema: &'static Schema,
    pub offset: usize,
}

impl Schema {
    pub fn model(name: &'static str, members: Vec<MemberDescriptor>) -> Schema {
        Schema {
            name,
            kind: SchemaKind::Model,
            members,
            extends: vec![],
        }
    }

    /// Builds a view schema. Members of `extends` are flattened in front of
    /// the view's own members.
    pub fn view(
        name: &'static str,
        extends: &[&'static Schema],
        own: Vec<MemberDescriptor>,
    ) -> Schema {
        let mut members = vec![];
        let mut flattened = vec![];

        for schema in extends {
            let offset = members.len();

            flattened.push(Extends { schema, offset });
            flattened.extend(schema.extends.iter().map(|nested| Extends {
                schema: nested.schema,
                offset: offset + nested.offset,
            }));

            members.extend(schema.members.iter().cloned());
        }

        members.extend(own);

        Schema {
            name,
            kind: SchemaKind::View,
            members,
            extends: flattened,
        }
    }

    pub fn is_model(&self) -> bool {
        self.kind == SchemaKind::Model
    }

    pub fn is_view(&self) -> bool {
        self.kind == SchemaKind::View
    }

    pub fn member(&self, index: usize) -> Option<&MemberDescriptor> {
        self.members.get(index)
    }

    /// Indices of every member named exactly `name`. More than one only when
    /// a view redeclares an inherited member.
    pub fn indices_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.members
            .iter()
            .enumerate()
            .filter(move |(_, member)| member.name == name)
            .map(|(index, _)| index)
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.indices_of(name).next().is_some()
    }

    /// Translates a member index of `view` into an index of this schema.
    pub fn translate(&self, view: &Schema, index: usize) -> Option<usize> {
        if core::ptr::eq(self, view) {
            return Some(index);
        }

        self.extends
            .iter()
            .find(|extends| core::ptr::eq(extends.schema, view))
            .map(|extends| extends.offset + index)
    }
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Type;
    use std::sync::OnceLock;

    fn address() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::view(
                "Address",
                &[],
                vec![
                    MemberDescriptor::new("street", Type::String).getter_only(),
                    MemberDescriptor::new("city", Type::String).getter_only(),
                ],
            )
        })
    }

    fn located() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::view(
                "Located",
                &[address()],
                vec![MemberDescriptor::new("zip", Type::String).getter_only()],
            )
        })
    }

    fn shipping() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::view(
                "Shipping",
                &[located()],
                vec![MemberDescriptor::new("carrier", Type::String).getter_only()],
            )
        })
    }

    #[test]
    fn view_flattens_inherited_members_first() {
        let names: Vec<_> = shipping().members.iter().map(|m| m.name).collect();
        assert_eq!(names, ["street", "city", "zip", "carrier"]);
    }

    #[test]
    fn translate_through_transitive_extends() {
        let schema = shipping();
        assert_eq!(schema.translate(schema, 3), Some(3));
        assert_eq!(schema.translate(located(), 2), Some(2));
        assert_eq!(schema.translate(address(), 1), Some(1));

        assert_eq!(address().translate(shipping(), 0), None);
    }
}
