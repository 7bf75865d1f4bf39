use super::Converter;
use morph_core::value::ValueEnum;
use morph_core::{err, Error, Result, Type, Value};

/// Conversions between primitives, strings and enums.
///
/// Numbers convert to other numbers when the value fits. Scalars and enums
/// format to `String`, and `String` parses back into them (enums by variant
/// name).
///
/// A nullable target accepts a non-null source and passes `Null` through. A
/// nullable source is never converted into a non-nullable target.
pub(super) struct Builtin;

impl Converter for Builtin {
    fn can_convert(&self, from: &Type, to: &Type) -> bool {
        match (from, to) {
            (Type::Option(from), Type::Option(to)) => self.can_convert(from, to),
            (Type::Option(_), _) => false,
            (from, Type::Option(to)) => self.can_convert(from, to),
            (from, to) if from == to => false,
            (from, to) if from.is_numeric() && to.is_numeric() => true,
            (from, Type::String) => is_scalar(from),
            (Type::String, to) => is_scalar(to),
            _ => false,
        }
    }

    fn convert(&self, value: Value, to: &Type) -> Result<Value> {
        match (value, to) {
            (Value::Null, Type::Option(_)) => Ok(Value::Null),
            (value, Type::Option(inner)) => self.convert(value, inner),
            (value @ Value::Null, to) => Err(Error::type_conversion(value, to)),
            (Value::String(string), to) if !to.is_string() => parse(&string, to),
            (value, Type::String) => Ok(Value::String(value.to_string())),
            (value, to) if to.is_numeric() => numeric(value, to),
            (value, to) => Err(Error::type_conversion(value, to)),
        }
    }
}

fn is_scalar(ty: &Type) -> bool {
    matches!(ty, Type::Bool | Type::Char | Type::Enum(_)) || ty.is_numeric()
}

fn numeric(value: Value, to: &Type) -> Result<Value> {
    if let Some(int) = value.to_i128() {
        return Value::from_i128(int, to);
    }

    let Some(float) = value.to_f64() else {
        return Err(Error::type_conversion(value, to));
    };

    match to {
        Type::F32 => Ok(Value::F32(float as f32)),
        Type::F64 => Ok(Value::F64(float)),
        _ if float.is_finite() && float.fract() == 0.0 => Value::from_i128(float as i128, to),
        _ => Err(err!(
            "value {} cannot be converted to {} without loss",
            float,
            to
        )),
    }
}

fn parse(string: &str, to: &Type) -> Result<Value> {
    macro_rules! parse {
        ($variant:ident) => {
            string
                .trim()
                .parse()
                .map(Value::$variant)
                .map_err(|_| err!("cannot parse '{}' as {}", string, to))
        };
    }

    match to {
        Type::Bool => parse!(Bool),
        Type::I8 => parse!(I8),
        Type::I16 => parse!(I16),
        Type::I32 => parse!(I32),
        Type::I64 => parse!(I64),
        Type::U8 => parse!(U8),
        Type::U16 => parse!(U16),
        Type::U32 => parse!(U32),
        Type::U64 => parse!(U64),
        Type::F32 => parse!(F32),
        Type::F64 => parse!(F64),
        Type::Char => {
            let mut chars = string.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Value::Char(c)),
                _ => Err(err!("cannot parse '{}' as char", string)),
            }
        }
        Type::Enum(schema) => schema
            .variant_by_name(string.trim())
            .map(|variant| Value::Enum(ValueEnum::new(schema, variant)))
            .ok_or_else(|| err!("'{}' is not a variant of {}", string, schema.name)),
        _ => Err(Error::type_conversion(
            Value::String(string.to_string()),
            to,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morph_core::value::EnumSchema;

    static LEVEL: EnumSchema = EnumSchema::new("Level", &["Low", "High"]);

    #[test]
    fn can_convert_rules() {
        let b = Builtin;
        assert!(b.can_convert(&Type::I32, &Type::I64));
        assert!(b.can_convert(&Type::I32, &Type::String));
        assert!(b.can_convert(&Type::String, &Type::Enum(&LEVEL)));
        assert!(b.can_convert(&Type::I32, &Type::option(Type::String)));
        assert!(!b.can_convert(&Type::option(Type::I32), &Type::String));
        assert!(!b.can_convert(&Type::I32, &Type::I32));
        assert!(!b.can_convert(&Type::Bool, &Type::I32));
    }

    #[test]
    fn numeric_narrowing_is_checked() {
        let b = Builtin;
        assert_eq!(b.convert(Value::I64(5), &Type::U8).unwrap(), Value::U8(5));
        assert!(b.convert(Value::I64(-1), &Type::U8).is_err());
        assert_eq!(
            b.convert(Value::F64(3.0), &Type::I32).unwrap(),
            Value::I32(3)
        );

        let err = b.convert(Value::F64(3.5), &Type::I32).unwrap_err();
        assert_eq!(
            err.to_string(),
            "value 3.5 cannot be converted to i32 without loss"
        );
    }

    #[test]
    fn strings_and_enums() {
        let b = Builtin;
        assert_eq!(
            b.convert(Value::I32(42), &Type::String).unwrap(),
            Value::from("42")
        );
        assert_eq!(
            b.convert(Value::from("High"), &Type::Enum(&LEVEL)).unwrap(),
            Value::Enum(ValueEnum::new(&LEVEL, 1))
        );
        assert_eq!(
            b.convert(Value::Enum(ValueEnum::new(&LEVEL, 0)), &Type::String)
                .unwrap(),
            Value::from("Low")
        );

        let err = b.convert(Value::from("abc"), &Type::I32).unwrap_err();
        assert_eq!(err.to_string(), "cannot parse 'abc' as i32");
    }

    #[test]
    fn null_passes_through_nullable_targets() {
        let b = Builtin;
        assert_eq!(
            b.convert(Value::Null, &Type::option(Type::String)).unwrap(),
            Value::Null
        );
        assert!(b.convert(Value::Null, &Type::String).is_err());
    }
}
