use tern_eval::{IteratorProvider, ValueCursor};
use tern_value::{invalid_cursor, not_iterable, EvalError, EvalResult, HostValue, Value};

use crate::host::{decay, json_of, JsonValue};

/// Iterates JSON arrays, yielding decayed elements.
pub struct JsonArrayIterators;

impl IteratorProvider for JsonArrayIterators {
    fn name(&self) -> &'static str {
        "json-array"
    }

    fn can_iterate(&self, value: &Value) -> bool {
        matches!(json_of(value), Some(serde_json::Value::Array(_)))
    }

    fn iterator(&self, value: &Value) -> Result<Box<dyn ValueCursor>, EvalError> {
        match value {
            Value::Host(host) if self.can_iterate(value) => {
                Ok(Box::new(JsonArrayCursor::new(host.clone())))
            }
            other => Err(not_iterable(other.type_name())),
        }
    }
}

/// Cursor over a JSON array host value.
///
/// Holds its own handle to the host value; `visited` counts `next()` calls.
pub struct JsonArrayCursor {
    array: HostValue,
    visited: usize,
}

impl JsonArrayCursor {
    fn new(array: HostValue) -> Self {
        JsonArrayCursor { array, visited: 0 }
    }

    fn items(&self) -> &[serde_json::Value] {
        match self.array.downcast_ref::<JsonValue>().map(JsonValue::as_json) {
            Some(serde_json::Value::Array(items)) => items,
            _ => &[],
        }
    }
}

impl ValueCursor for JsonArrayCursor {
    fn more(&self) -> bool {
        self.visited < self.items().len()
    }

    fn next(&mut self) {
        if self.visited <= self.items().len() {
            self.visited = self.visited.saturating_add(1);
        }
    }

    fn current(&self) -> EvalResult {
        self.visited
            .checked_sub(1)
            .and_then(|index| self.items().get(index))
            .cloned()
            .map(decay)
            .ok_or_else(invalid_cursor)
    }
}
