use tern_value::{access_failed, invalid_cursor, not_iterable, EvalError, EvalResult, Heap, Value};

use crate::registry::{Accessor, IteratorProvider, ValueCursor};

/// Decimal element index: ASCII digits only, so `+1` and ` 1` are not
/// indices.
pub fn parse_index(name: &str) -> Option<usize> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name.parse().ok()
}

/// `length` and decimal indices (`items.0`) on native lists.
pub struct ListAccessor;

impl Accessor for ListAccessor {
    fn name(&self) -> &'static str {
        "list"
    }

    fn can_access(&self, value: &Value) -> bool {
        value.is::<Vec<Value>>()
    }

    fn access(&self, value: &Value, name: &str) -> EvalResult {
        let items = value.get::<Vec<Value>>()?;
        if name == "length" {
            return Ok(Value::int(i64::try_from(items.len()).unwrap_or(i64::MAX)));
        }
        let Some(index) = parse_index(name) else {
            return Err(access_failed(name, "list", "lists only have `length` and indices"));
        };
        items.get(index).cloned().ok_or_else(|| {
            access_failed(
                name,
                "list",
                format!("index out of bounds for length {}", items.len()),
            )
        })
    }
}

/// Iterates native lists.
pub struct ListIterators;

impl IteratorProvider for ListIterators {
    fn name(&self) -> &'static str {
        "list"
    }

    fn can_iterate(&self, value: &Value) -> bool {
        value.is::<Vec<Value>>()
    }

    fn iterator(&self, value: &Value) -> Result<Box<dyn ValueCursor>, EvalError> {
        match value {
            Value::List(items) => Ok(Box::new(ListCursor::new(items.clone()))),
            other => Err(not_iterable(other.type_name())),
        }
    }
}

/// Cursor over a shared list.
///
/// `visited` counts `next()` calls, so element `visited - 1` is current and
/// `0` means "before the first element".
pub struct ListCursor {
    items: Heap<Vec<Value>>,
    visited: usize,
}

impl ListCursor {
    pub fn new(items: Heap<Vec<Value>>) -> Self {
        ListCursor { items, visited: 0 }
    }
}

impl ValueCursor for ListCursor {
    fn more(&self) -> bool {
        self.visited < self.items.len()
    }

    fn next(&mut self) {
        if self.visited <= self.items.len() {
            self.visited = self.visited.saturating_add(1);
        }
    }

    fn current(&self) -> EvalResult {
        self.visited
            .checked_sub(1)
            .and_then(|index| self.items.get(index))
            .cloned()
            .ok_or_else(invalid_cursor)
    }
}
