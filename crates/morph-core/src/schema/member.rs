use crate::value::Type;

/// A property-like member of a reflected type.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberDescriptor {
    /// Member name used for matching
    pub name: &'static str,

    /// Declared type of the member
    pub ty: Type,

    /// True if the member has a public getter
    pub readable: bool,

    pub setter: Setter,
}

/// How a member can be assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setter {
    /// Assignable on each instance
    Instance,

    /// Assignment is shared by the type, not the instance
    Static,

    /// Not assignable
    None,
}

impl MemberDescriptor {
    /// A readable member with an instance setter.
    pub fn new(name: &'static str, ty: Type) -> MemberDescriptor {
        MemberDescriptor {
            name,
            ty,
            readable: true,
            setter: Setter::Instance,
        }
    }

    pub fn getter_only(mut self) -> MemberDescriptor {
        self.setter = Setter::None;
        self
    }

    pub fn static_setter(mut self) -> MemberDescriptor {
        self.setter = Setter::Static;
        self
    }

    pub fn setter_only(mut self) -> MemberDescriptor {
        self.readable = false;
        self
    }

    pub fn is_settable(&self) -> bool {
        self.setter != Setter::None
    }

    pub fn has_instance_setter(&self) -> bool {
        self.setter == Setter::Instance
    }
}
