//! The JSON host object and the decay / lift boundary.

use std::any::Any;

use serde_json::Number;
use tern_eval::ParserContext;
use tern_value::{conversion_failed, type_mismatch, EvalError, HostObject, TypeTag, Value};

/// Host model name of JSON values.
pub const KIND: &str = "json";

/// Type tag of JSON host values, the target of value → host conversion.
pub const JSON: TypeTag = TypeTag::Host(KIND);

/// Largest magnitude below which every integral `f64` is an exact integer.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A `serde_json::Value` carried through the engine as an opaque host value.
#[derive(Clone, Debug, PartialEq)]
pub struct JsonValue(serde_json::Value);

impl JsonValue {
    pub fn new(json: serde_json::Value) -> Self {
        JsonValue(json)
    }

    pub fn as_json(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_json(self) -> serde_json::Value {
        self.0
    }
}

impl HostObject for JsonValue {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn type_name(&self) -> &'static str {
        match self.0 {
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "boolean",
            serde_json::Value::Number(_) => "number",
            serde_json::Value::String(_) => "string",
            serde_json::Value::Array(_) => "array",
            serde_json::Value::Object(_) => "object",
        }
    }

    fn host_eq(&self, other: &dyn HostObject) -> bool {
        other
            .as_any()
            .downcast_ref::<JsonValue>()
            .is_some_and(|other| other.0 == self.0)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The JSON behind `value`, if it is a JSON host value.
pub fn json_of(value: &Value) -> Option<&serde_json::Value> {
    match value {
        Value::Host(host) => host.downcast_ref::<JsonValue>().map(JsonValue::as_json),
        _ => None,
    }
}

/// Bring host data into the engine.
///
/// Strings, numbers and booleans become native values, `null` becomes
/// absent, arrays and objects stay opaque.
pub fn decay(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Absent,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => Value::float(n.as_f64().unwrap_or(f64::NAN)),
        serde_json::Value::String(s) => Value::string(s),
        other => Value::host(JsonValue(other)),
    }
}

/// JSON form of a native value.
///
/// Integral floats in the exact-integer range become JSON integers so
/// that a decayed `1` lifts back to `1`. This folds `-0.0` into `0`, as JSON
/// hosts serialize it. Non-finite floats become `null`.
pub fn lift(value: &Value) -> Result<serde_json::Value, EvalError> {
    Ok(match value {
        Value::Absent => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int(n) => serde_json::Value::from(*n),
        Value::Float(f) => lift_float(*f),
        Value::Str(s) => serde_json::Value::String(s.as_str().to_owned()),
        Value::List(items) => items
            .iter()
            .map(lift)
            .collect::<Result<Vec<_>, _>>()
            .map(serde_json::Value::Array)?,
        Value::Host(host) => match host.downcast_ref::<JsonValue>() {
            Some(json) => json.0.clone(),
            None => {
                return Err(conversion_failed(
                    host.type_name(),
                    KIND,
                    format!("{} host values have no JSON form", host.kind()),
                ))
            }
        },
    })
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "integrality and range are checked first"
)]
fn lift_float(f: f64) -> serde_json::Value {
    if f.fract() == 0.0 && f.abs() < MAX_SAFE_INTEGER {
        serde_json::Value::from(f as i64)
    } else {
        Number::from_f64(f).map_or(serde_json::Value::Null, serde_json::Value::Number)
    }
}

/// Convert `value` to JSON through the converter registry.
///
/// Converters registered ahead of the JSON adapters take priority over
/// `lift`.
pub fn to_json(parser: &ParserContext, value: Value) -> Result<serde_json::Value, EvalError> {
    let converted = parser.convert(value, JSON)?;
    json_of(&converted)
        .cloned()
        .ok_or_else(|| type_mismatch(KIND, converted.type_name()))
}
