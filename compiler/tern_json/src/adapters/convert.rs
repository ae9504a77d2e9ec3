use serde_json::Number;
use tern_eval::Converter;
use tern_value::{conversion_failed, format_float, EvalError, EvalResult, TypeTag, Value};

use crate::host::{decay, json_of, lift, JsonValue, JSON, KIND};

fn expect_json<'v>(value: &'v Value, to: TypeTag) -> Result<&'v serde_json::Value, EvalError> {
    json_of(value).ok_or_else(|| conversion_failed(value.type_name(), to.name(), "not a json value"))
}

/// JSON host value → string.
///
/// Strings are taken verbatim, numbers print like native floats, every
/// other shape renders as compact JSON.
pub struct JsonStringConverter;

impl Converter for JsonStringConverter {
    fn name(&self) -> &'static str {
        "json-string"
    }

    fn can_convert(&self, from: TypeTag, to: TypeTag) -> bool {
        from == JSON && to == TypeTag::Str
    }

    fn convert(&self, value: Value, to: TypeTag) -> EvalResult {
        let text = match expect_json(&value, to)? {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Number(n) => format_number(n),
            other => other.to_string(),
        };
        Ok(Value::string(text))
    }
}

fn format_number(n: &Number) -> String {
    match n.as_i64() {
        Some(i) => i.to_string(),
        None => format_float(n.as_f64().unwrap_or(f64::NAN)),
    }
}

/// JSON host number → int / float.
pub struct JsonNumberConverter;

impl Converter for JsonNumberConverter {
    fn name(&self) -> &'static str {
        "json-number"
    }

    fn can_convert(&self, from: TypeTag, to: TypeTag) -> bool {
        from == JSON && matches!(to, TypeTag::Int | TypeTag::Float)
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "integrality and range are checked first"
    )]
    fn convert(&self, value: Value, to: TypeTag) -> EvalResult {
        let json = expect_json(&value, to)?;
        let serde_json::Value::Number(n) = json else {
            return Err(conversion_failed(value.type_name(), to.name(), "not a number"));
        };
        let f = n.as_f64().unwrap_or(f64::NAN);
        match to {
            TypeTag::Float => Ok(Value::float(f)),
            _ => match n.as_i64() {
                Some(i) => Ok(Value::int(i)),
                None if f.fract() == 0.0 && f.abs() < 9_223_372_036_854_775_808.0 => {
                    Ok(Value::int(f as i64))
                }
                None => Err(conversion_failed(
                    "number",
                    to.name(),
                    format!("{} is not an integer", format_number(n)),
                )),
            },
        }
    }
}

/// JSON host array → native list of decayed elements.
pub struct JsonSequenceConverter;

impl Converter for JsonSequenceConverter {
    fn name(&self) -> &'static str {
        "json-sequence"
    }

    fn can_convert(&self, from: TypeTag, to: TypeTag) -> bool {
        from == JSON && to == TypeTag::List
    }

    fn convert(&self, value: Value, to: TypeTag) -> EvalResult {
        match expect_json(&value, to)? {
            serde_json::Value::Array(items) => {
                Ok(Value::list(items.iter().cloned().map(decay).collect()))
            }
            _ => Err(conversion_failed(value.type_name(), to.name(), "not an array")),
        }
    }
}

/// Any native value → JSON host value, through `lift`.
pub struct ToJsonConverter;

impl Converter for ToJsonConverter {
    fn name(&self) -> &'static str {
        "to-json"
    }

    fn can_convert(&self, from: TypeTag, to: TypeTag) -> bool {
        to == JSON && from != JSON
    }

    fn convert(&self, value: Value, _to: TypeTag) -> EvalResult {
        tracing::trace!(from = value.type_name(), "lifting to {KIND}");
        lift(&value).map(|json| Value::host(JsonValue::new(json)))
    }
}
