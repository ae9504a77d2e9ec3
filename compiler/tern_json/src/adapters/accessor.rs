use tern_eval::{parse_index, Accessor};
use tern_value::{access_failed, type_mismatch, EvalResult, Value};

use crate::host::{decay, json_of, KIND};

/// Member access on JSON host values.
///
/// Objects resolve members by key, arrays answer `length` and decimal
/// indices. A missing member is an error, not absent.
pub struct JsonAccessor;

impl Accessor for JsonAccessor {
    fn name(&self) -> &'static str {
        "json"
    }

    fn can_access(&self, value: &Value) -> bool {
        json_of(value).is_some()
    }

    fn access(&self, value: &Value, name: &str) -> EvalResult {
        let json = json_of(value).ok_or_else(|| type_mismatch(KIND, value.type_name()))?;
        match json {
            serde_json::Value::Object(members) => members
                .get(name)
                .cloned()
                .map(decay)
                .ok_or_else(|| access_failed(name, "object", "no such member")),
            serde_json::Value::Array(items) if name == "length" => {
                Ok(Value::int(i64::try_from(items.len()).unwrap_or(i64::MAX)))
            }
            serde_json::Value::Array(items) => parse_index(name)
                .and_then(|index| items.get(index))
                .cloned()
                .map(decay)
                .ok_or_else(|| {
                    access_failed(
                        name,
                        "array",
                        format!("not an index below length {}", items.len()),
                    )
                }),
            _ => Err(access_failed(name, value.type_name(), "not an object")),
        }
    }
}
