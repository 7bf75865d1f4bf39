use super::{EnumSchema, ObjectDescriptor, ObjectKind};

/// Semantic type of a member.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Bool,
    Char,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    String,

    /// A reflected field-less enum
    Enum(&'static EnumSchema),

    /// Nullable form of the inner type
    Option(Box<Type>),

    /// A list of values of the inner type
    List(Box<Type>),

    /// A shared reference (`Arc<T>`) to a reflected object
    Object(&'static ObjectDescriptor),
}

impl Type {
    pub fn option(inner: Type) -> Type {
        Type::Option(Box::new(inner))
    }

    pub fn list(item: Type) -> Type {
        Type::List(Box::new(item))
    }

    pub fn is_option(&self) -> bool {
        matches!(self, Type::Option(_))
    }

    /// Strips one level of `Option`, if any.
    pub fn unwrap_option(&self) -> &Type {
        match self {
            Type::Option(inner) => inner,
            ty => ty,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Type::String)
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Type::I8
                | Type::I16
                | Type::I32
                | Type::I64
                | Type::U8
                | Type::U16
                | Type::U32
                | Type::U64
        )
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Type::F32 | Type::F64)
    }

    pub fn is_numeric(&self) -> bool {
        self.is_integer() || self.is_float()
    }

    /// Value types are copied rather than referenced. Everything except
    /// objects and lists.
    pub fn is_value_type(&self) -> bool {
        match self {
            Type::Object(_) | Type::List(_) => false,
            Type::Option(inner) => inner.is_value_type(),
            _ => true,
        }
    }

    pub fn as_enum(&self) -> Option<&'static EnumSchema> {
        match self {
            Type::Enum(schema) => Some(schema),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&'static ObjectDescriptor> {
        match self {
            Type::Object(descriptor) => Some(descriptor),
            _ => None,
        }
    }

    /// Returns `true` if this is a reflected model type, or `Option` of one.
    pub fn is_model(&self) -> bool {
        self.unwrap_option()
            .as_object()
            .is_some_and(|descriptor| matches!(descriptor.kind, ObjectKind::Model(_)))
    }

    /// Returns `true` if this is a view trait object type, or `Option` of
    /// one.
    pub fn is_view(&self) -> bool {
        self.unwrap_option()
            .as_object()
            .is_some_and(|descriptor| matches!(descriptor.kind, ObjectKind::View(_)))
    }

    /// Returns `true` if a value of type `source` can be stored in a member of
    /// this type as is.
    ///
    /// Types are assignable when equal, and a nullable type accepts values of
    /// its inner type.
    pub fn is_assignable_from(&self, source: &Type) -> bool {
        if self == source {
            return true;
        }

        match self {
            Type::Option(inner) => inner.is_assignable_from(source),
            _ => false,
        }
    }
}

impl core::fmt::Display for Type {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Type::Bool => f.write_str("bool"),
            Type::Char => f.write_str("char"),
            Type::I8 => f.write_str("i8"),
            Type::I16 => f.write_str("i16"),
            Type::I32 => f.write_str("i32"),
            Type::I64 => f.write_str("i64"),
            Type::U8 => f.write_str("u8"),
            Type::U16 => f.write_str("u16"),
            Type::U32 => f.write_str("u32"),
            Type::U64 => f.write_str("u64"),
            Type::F32 => f.write_str("f32"),
            Type::F64 => f.write_str("f64"),
            Type::String => f.write_str("String"),
            Type::Enum(schema) => f.write_str(schema.name),
            Type::Option(inner) => write!(f, "Option<{inner}>"),
            Type::List(item) => write!(f, "Vec<{item}>"),
            Type::Object(descriptor) => f.write_str(descriptor.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static COLOR: EnumSchema = EnumSchema::new("Color", &["Red", "Green"]);
    static SHADE: EnumSchema = EnumSchema::new("Shade", &["Red", "Green"]);

    #[test]
    fn option_accepts_inner_type() {
        assert!(Type::option(Type::I32).is_assignable_from(&Type::I32));
        assert!(!Type::I32.is_assignable_from(&Type::option(Type::I32)));
        assert!(!Type::I64.is_assignable_from(&Type::I32));
    }

    #[test]
    fn enums_compare_by_identity() {
        assert_eq!(Type::Enum(&COLOR), Type::Enum(&COLOR));
        assert_ne!(Type::Enum(&COLOR), Type::Enum(&SHADE));
    }

    #[test]
    fn display() {
        assert_eq!(Type::option(Type::Enum(&COLOR)).to_string(), "Option<Color>");
        assert_eq!(Type::list(Type::String).to_string(), "Vec<String>");
    }
}
