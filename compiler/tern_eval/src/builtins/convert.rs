use tern_value::{conversion_failed, format_float, EvalResult, TypeTag, Value};

use crate::registry::Converter;

/// Stringifies absent and scalar values.
///
/// Absent becomes the empty string, so an unset binding interpolates as
/// nothing rather than aborting the template.
pub struct PrimitiveStringConverter;

impl Converter for PrimitiveStringConverter {
    fn name(&self) -> &'static str {
        "primitive-string"
    }

    fn can_convert(&self, from: TypeTag, to: TypeTag) -> bool {
        to == TypeTag::Str
            && matches!(
                from,
                TypeTag::Absent | TypeTag::Bool | TypeTag::Int | TypeTag::Float
            )
    }

    fn convert(&self, value: Value, to: TypeTag) -> EvalResult {
        let text = match value {
            Value::Absent => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(f) => format_float(f),
            other => {
                return Err(conversion_failed(
                    other.type_name(),
                    to.name(),
                    "not a primitive",
                ))
            }
        };
        Ok(Value::string(text))
    }
}

/// Numeric coercions between native types.
pub struct NumericConverter;

/// Floats in `[-2^63, 2^63)` convert to `i64` exactly when integral.
const I64_LOWER: f64 = -9_223_372_036_854_775_808.0;
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

impl NumericConverter {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "range and integrality are checked first"
    )]
    fn float_to_int(f: f64) -> EvalResult {
        if f.fract() != 0.0 || !(I64_LOWER..I64_UPPER).contains(&f) {
            return Err(conversion_failed(
                "float",
                "int",
                format!("{} is not an integer", format_float(f)),
            ));
        }
        Ok(Value::int(f as i64))
    }
}

impl Converter for NumericConverter {
    fn name(&self) -> &'static str {
        "numeric"
    }

    fn can_convert(&self, from: TypeTag, to: TypeTag) -> bool {
        matches!(
            (from, to),
            (TypeTag::Int, TypeTag::Float)
                | (TypeTag::Float, TypeTag::Int)
                | (TypeTag::Str, TypeTag::Int)
                | (TypeTag::Str, TypeTag::Float)
                | (TypeTag::Bool, TypeTag::Int)
        )
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "int to float widening follows host number semantics"
    )]
    fn convert(&self, value: Value, to: TypeTag) -> EvalResult {
        match (value, to) {
            (Value::Int(n), TypeTag::Float) => Ok(Value::Float(n as f64)),
            (Value::Float(f), TypeTag::Int) => Self::float_to_int(f),
            (Value::Str(s), TypeTag::Int) => s
                .trim()
                .parse::<i64>()
                .map(Value::int)
                .map_err(|err| conversion_failed("str", "int", err.to_string())),
            (Value::Str(s), TypeTag::Float) => s
                .trim()
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|err| conversion_failed("str", "float", err.to_string())),
            (Value::Bool(b), TypeTag::Int) => Ok(Value::int(i64::from(b))),
            (other, to) => Err(conversion_failed(
                other.type_name(),
                to.name(),
                "not a numeric conversion",
            )),
        }
    }
}
