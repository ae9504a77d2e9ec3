use super::*;
use pretty_assertions::assert_eq;
use tern_value::{access_failed, EvalErrorKind, EvalResult, TypeTag, Value};

/// Answers every member on strings with a fixed tag.
struct Tagged(&'static str);

impl Accessor for Tagged {
    fn name(&self) -> &'static str {
        self.0
    }

    fn can_access(&self, value: &Value) -> bool {
        matches!(value, Value::Str(_))
    }

    fn access(&self, _value: &Value, name: &str) -> EvalResult {
        if name == "missing" {
            return Err(access_failed(name, "str", "no such member"));
        }
        Ok(Value::string(format!("{}:{name}", self.0)))
    }
}

struct BoolToInt;

impl Converter for BoolToInt {
    fn name(&self) -> &'static str {
        "bool-to-int"
    }

    fn can_convert(&self, from: TypeTag, to: TypeTag) -> bool {
        from == TypeTag::Bool && to == TypeTag::Int
    }

    fn convert(&self, value: Value, _to: TypeTag) -> EvalResult {
        Ok(Value::int(i64::from(*value.get::<bool>()?)))
    }
}

/// Counts down from the held integer.
struct Countdown;

struct CountdownCursor {
    remaining: i64,
    current: Option<i64>,
}

impl ValueCursor for CountdownCursor {
    fn more(&self) -> bool {
        self.remaining > 0
    }

    fn next(&mut self) {
        if self.remaining > 0 {
            self.current = Some(self.remaining);
            self.remaining -= 1;
        } else {
            self.current = None;
        }
    }

    fn current(&self) -> EvalResult {
        self.current
            .map(Value::int)
            .ok_or_else(tern_value::invalid_cursor)
    }
}

impl IteratorProvider for Countdown {
    fn name(&self) -> &'static str {
        "countdown"
    }

    fn can_iterate(&self, value: &Value) -> bool {
        value.is::<i64>()
    }

    fn iterator(&self, value: &Value) -> Result<Box<dyn ValueCursor>, tern_value::EvalError> {
        Ok(Box::new(CountdownCursor {
            remaining: *value.get::<i64>()?,
            current: None,
        }))
    }
}

#[test]
fn test_first_registered_accessor_wins() {
    let mut registry = AccessorRegistry::new();
    registry.register(Tagged("first"));
    registry.register(Tagged("second"));

    assert_eq!(registry.len(), 2);
    let value = registry.access(&Value::string("x"), "name").unwrap();
    assert_eq!(value, Value::string("first:name"));
}

#[test]
fn test_accessor_dispatch_is_deterministic() {
    let mut registry = AccessorRegistry::new();
    registry.register(Tagged("only"));
    let subject = Value::string("x");

    let a = registry.access(&subject, "k").unwrap();
    let b = registry.access(&subject, "k").unwrap();
    assert_eq!(a, b);

    let e1 = registry.access(&subject, "missing").unwrap_err();
    let e2 = registry.access(&subject, "missing").unwrap_err();
    assert_eq!(e1.kind, e2.kind);
}

#[test]
fn test_access_unsupported_vs_failed() {
    let mut registry = AccessorRegistry::new();
    registry.register(Tagged("only"));

    let unsupported = registry.access(&Value::int(1), "k").unwrap_err();
    assert_eq!(
        unsupported.kind,
        EvalErrorKind::AccessUnsupported {
            type_name: "int".to_string()
        }
    );

    let failed = registry
        .access(&Value::string("x"), "missing")
        .unwrap_err();
    assert!(matches!(failed.kind, EvalErrorKind::AccessFailed { .. }));
}

#[test]
fn test_empty_accessor_registry() {
    let registry = AccessorRegistry::new();
    assert!(registry.is_empty());
    assert!(registry.find(&Value::Absent).is_none());
}

#[test]
fn test_convert_identity_skips_converters() {
    let registry = ConverterRegistry::new();
    let value = registry.convert(Value::int(4), TypeTag::Int).unwrap();
    assert_eq!(value, Value::int(4));
    assert!(registry.can_convert(TypeTag::Str, TypeTag::Str));
}

#[test]
fn test_convert_dispatch_and_unsupported() {
    let mut registry = ConverterRegistry::new();
    registry.register(BoolToInt);

    assert!(registry.can_convert(TypeTag::Bool, TypeTag::Int));
    assert!(!registry.can_convert(TypeTag::Int, TypeTag::Bool));
    assert_eq!(
        registry.convert(Value::Bool(true), TypeTag::Int).unwrap(),
        Value::int(1)
    );

    let err = registry.convert(Value::int(1), TypeTag::Bool).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::ConversionUnsupported {
            from: "int".to_string(),
            to: "bool".to_string(),
        }
    );
}

#[test]
fn test_cursor_protocol() {
    let mut registry = IteratorRegistry::new();
    registry.register(Countdown);

    let mut cursor = registry.iterator(&Value::int(3)).unwrap();
    assert!(matches!(
        cursor.current().unwrap_err().kind,
        EvalErrorKind::InvalidCursor
    ));

    let mut seen = Vec::new();
    while cursor.more() {
        ValueCursor::next(&mut *cursor);
        seen.push(cursor.current().unwrap());
    }
    assert_eq!(seen, vec![Value::int(3), Value::int(2), Value::int(1)]);
    assert!(!cursor.more());
}

#[test]
fn test_cursor_adapter_and_not_iterable() {
    let mut registry = IteratorRegistry::new();
    registry.register(Countdown);

    let items: Result<Vec<_>, _> = registry.iter(&Value::int(2)).unwrap().collect();
    assert_eq!(items.unwrap(), vec![Value::int(2), Value::int(1)]);

    assert!(!registry.can_iterate(&Value::string("abc")));
    let err = registry.iterator(&Value::string("abc")).err().unwrap();
    assert_eq!(
        err.kind,
        EvalErrorKind::NotIterable {
            type_name: "str".to_string()
        }
    );
}
