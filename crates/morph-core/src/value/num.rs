use super::{Member, Type, Value};
use crate::{Error, Result};

macro_rules! impl_num {
    (
        $(
            $variant:ident($ty:ty) $name:literal
        )*
    ) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }

            impl Member for $ty {
                fn ty() -> Type {
                    Type::$variant
                }

                fn into_value(self) -> Value {
                    Value::$variant(self)
                }

                fn from_value(value: Value) -> Result<Self> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        value => Err(Error::type_conversion(value, $name)),
                    }
                }
            }
        )*
    };
}

impl_num! {
    I8(i8) "i8"
    I16(i16) "i16"
    I32(i32) "i32"
    I64(i64) "i64"
    U8(u8) "u8"
    U16(u16) "u16"
    U32(u32) "u32"
    U64(u64) "u64"
    F32(f32) "f32"
    F64(f64) "f64"
}

impl Value {
    /// Widens an integer value. Returns `None` for anything else.
    pub fn to_i128(&self) -> Option<i128> {
        Some(match *self {
            Value::I8(v) => v.into(),
            Value::I16(v) => v.into(),
            Value::I32(v) => v.into(),
            Value::I64(v) => v.into(),
            Value::U8(v) => v.into(),
            Value::U16(v) => v.into(),
            Value::U32(v) => v.into(),
            Value::U64(v) => v.into(),
            _ => return None,
        })
    }

    /// Widens any numeric value to `f64`. Returns `None` for anything else.
    pub fn to_f64(&self) -> Option<f64> {
        match *self {
            Value::F32(v) => Some(v.into()),
            Value::F64(v) => Some(v),
            _ => self.to_i128().map(|v| v as f64),
        }
    }

    /// Builds an integer value of type `ty`, failing when `value` is out of
    /// range.
    pub fn from_i128(value: i128, ty: &Type) -> Result<Value> {
        macro_rules! narrow {
            ($variant:ident) => {
                value
                    .try_into()
                    .map(Value::$variant)
                    .map_err(|_| crate::err!("value {} is out of range for {}", value, ty))
            };
        }

        match ty {
            Type::I8 => narrow!(I8),
            Type::I16 => narrow!(I16),
            Type::I32 => narrow!(I32),
            Type::I64 => narrow!(I64),
            Type::U8 => narrow!(U8),
            Type::U16 => narrow!(U16),
            Type::U32 => narrow!(U32),
            Type::U64 => narrow!(U64),
            Type::F32 => Ok(Value::F32(value as f32)),
            Type::F64 => Ok(Value::F64(value as f64)),
            _ => Err(crate::err!("{} is not a numeric type", ty)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrowing_checks_range() {
        assert_eq!(Value::from_i128(200, &Type::U8).unwrap(), Value::U8(200));

        let err = Value::from_i128(300, &Type::U8).unwrap_err();
        assert_eq!(err.to_string(), "value 300 is out of range for u8");
    }

    #[test]
    fn widening() {
        assert_eq!(Value::I16(-4).to_i128(), Some(-4));
        assert_eq!(Value::U32(9).to_f64(), Some(9.0));
        assert_eq!(Value::from("9").to_i128(), None);
    }
}
