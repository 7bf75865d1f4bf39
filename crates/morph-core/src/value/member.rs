use super::{Object, ObjectRef, Type, Value};
use crate::{Error, Result};

use std::sync::Arc;

/// A Rust type that can be stored in, and read from, a mapped member.
///
/// Conversions are strict: `from_value` only accepts the variant produced by
/// `into_value` (and `Null` for `Option`). Conversions between different
/// types are the job of conventions.
pub trait Member: Sized + Send + Sync + 'static {
    /// Semantic type of the member.
    fn ty() -> Type;

    fn into_value(self) -> Value;

    fn from_value(value: Value) -> Result<Self>;
}

impl Member for bool {
    fn ty() -> Type {
        Type::Bool
    }

    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Bool(v) => Ok(v),
            value => Err(Error::type_conversion(value, "bool")),
        }
    }
}

impl Member for char {
    fn ty() -> Type {
        Type::Char
    }

    fn into_value(self) -> Value {
        Value::Char(self)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Char(v) => Ok(v),
            value => Err(Error::type_conversion(value, "char")),
        }
    }
}

impl Member for String {
    fn ty() -> Type {
        Type::String
    }

    fn into_value(self) -> Value {
        Value::String(self)
    }

    fn from_value(value: Value) -> Result<Self> {
        value.to_string_value()
    }
}

/// `None` is [`Value::Null`]. `Option<Option<T>>` does not round-trip, since
/// `Some(None)` reads back as `None`; the derives reject it.
impl<T: Member> Member for Option<T> {
    fn ty() -> Type {
        Type::option(T::ty())
    }

    fn into_value(self) -> Value {
        match self {
            Some(value) => value.into_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            value => T::from_value(value).map(Some),
        }
    }
}

impl<T: Member> Member for Vec<T> {
    fn ty() -> Type {
        Type::list(T::ty())
    }

    fn into_value(self) -> Value {
        Value::List(self.into_iter().map(T::into_value).collect())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            value => Err(Error::type_conversion(value, Self::ty())),
        }
    }
}

impl<T: ?Sized + Object> Member for Arc<T> {
    fn ty() -> Type {
        Type::Object(T::descriptor())
    }

    fn into_value(self) -> Value {
        Value::Object(ObjectRef::new(self))
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(object) => match object.downcast::<T>() {
                Some(object) => Ok(object),
                None => Err(Error::type_conversion(Value::Object(object), Self::ty())),
            },
            value => Err(Error::type_conversion(value, Self::ty())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_round_trips_null() {
        assert_eq!(Option::<String>::from_value(Value::Null).unwrap(), None);
        assert_eq!(None::<String>.into_value(), Value::Null);
    }

    #[test]
    fn strict_conversion() {
        let err = i64::from_value(Value::I32(1)).unwrap_err();
        assert!(err.is_type_conversion());
        assert_eq!(err.to_string(), "cannot convert I32 to i64");
    }

    #[test]
    fn list_reports_element_type() {
        assert_eq!(Vec::<Option<u8>>::ty().to_string(), "Vec<Option<u8>>");
        let err = Vec::<u8>::from_value(Value::Bool(true)).unwrap_err();
        assert_eq!(err.to_string(), "cannot convert Bool to Vec<u8>");
    }
}
