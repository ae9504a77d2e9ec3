//! The dynamic value container.
//!
//! # Heap Enforcement
//!
//! Strings and lists live behind `Heap<T>`, whose constructor is private to
//! this module. All heap values are created through `Value::` factory
//! methods, so clones share storage and a `Value` is cheap to pass around
//! the retriever tree.
//!
//! ```text
//! let s = Value::string("hello");               // OK
//! let xs = Value::list(vec![Value::int(1)]);    // OK
//! let s = Value::Str(Heap::new(...));           // ERROR: Heap::new is pub(super)
//! ```
//!
//! # Absence
//!
//! `Value::Absent` is only produced by `Value::default()` or by host decay
//! of a host null. Failed operations return errors, never `Absent`.

mod heap;
mod host;

use std::fmt;

pub use heap::Heap;
pub use host::{HostObject, HostValue};

use crate::errors::{type_mismatch, EvalError};
use crate::type_tag::TypeTag;

/// Runtime value flowing through retrievers and registries.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// No value. Distinct from a host null kept as an opaque host value.
    #[default]
    Absent,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Heap<String>),
    /// Native sequence, the target of host-array conversion.
    List(Heap<Vec<Value>>),
    /// Opaque host value; readable only through registry strategies.
    Host(HostValue),
}

// Factory Methods (ONLY way to construct heap values)

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    #[inline]
    pub fn float(f: f64) -> Self {
        Value::Float(f)
    }

    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    #[inline]
    pub fn host(object: impl HostObject) -> Self {
        Value::Host(HostValue::new(object))
    }
}

// Inspection

impl Value {
    /// Runtime type tag, used for converter dispatch.
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Absent => TypeTag::Absent,
            Value::Bool(_) => TypeTag::Bool,
            Value::Int(_) => TypeTag::Int,
            Value::Float(_) => TypeTag::Float,
            Value::Str(_) => TypeTag::Str,
            Value::List(_) => TypeTag::List,
            Value::Host(host) => TypeTag::Host(host.kind()),
        }
    }

    /// Runtime type name for diagnostics.
    ///
    /// Host values report their host-side type (e.g. `object`) rather than
    /// the host model's kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Host(host) => host.type_name(),
            other => other.type_tag().name(),
        }
    }

    #[inline]
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// Whether the active variant is exactly `T`. Never coerces.
    #[inline]
    pub fn is<T: ValueType>(&self) -> bool {
        T::peek(self).is_some()
    }

    /// Borrow the held `T`, or fail with a type mismatch.
    pub fn get<T: ValueType>(&self) -> Result<&T, EvalError> {
        T::peek(self).ok_or_else(|| type_mismatch(T::NAME, self.type_name()))
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

/// Rust types a `Value` variant can be downcast to.
pub trait ValueType: Sized {
    /// Type name reported in mismatch errors.
    const NAME: &'static str;

    fn peek(value: &Value) -> Option<&Self>;
}

impl ValueType for bool {
    const NAME: &'static str = "bool";

    fn peek(value: &Value) -> Option<&Self> {
        match value {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }
}

impl ValueType for i64 {
    const NAME: &'static str = "int";

    fn peek(value: &Value) -> Option<&Self> {
        match value {
            Value::Int(n) => Some(n),
            _ => None,
        }
    }
}

impl ValueType for f64 {
    const NAME: &'static str = "float";

    fn peek(value: &Value) -> Option<&Self> {
        match value {
            Value::Float(f) => Some(f),
            _ => None,
        }
    }
}

impl ValueType for String {
    const NAME: &'static str = "str";

    fn peek(value: &Value) -> Option<&Self> {
        match value {
            Value::Str(s) => Some(&**s),
            _ => None,
        }
    }
}

impl ValueType for Vec<Value> {
    const NAME: &'static str = "list";

    fn peek(value: &Value) -> Option<&Self> {
        match value {
            Value::List(items) => Some(&**items),
            _ => None,
        }
    }
}

impl ValueType for HostValue {
    const NAME: &'static str = "host value";

    fn peek(value: &Value) -> Option<&Self> {
        match value {
            Value::Host(host) => Some(host),
            _ => None,
        }
    }
}

// Conversions into Value (total)

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}

impl From<HostValue> for Value {
    fn from(host: HostValue) -> Self {
        Value::Host(host)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Absent, Into::into)
    }
}

/// Render a float the way dynamic hosts print numbers.
///
/// Integral values drop the fractional part (`1.0` → `1`), non-finite values
/// use `NaN` / `Infinity` / `-Infinity`, and `-0.0` prints as `0`.
/// Magnitudes in `[1e-6, 1e21)` use the shortest round-trip decimal form,
/// everything else the shortest exponent form with a signed exponent
/// (`1e+21`, `1.5e-7`).
pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f.is_infinite() {
        if f > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if f == 0.0 {
        "0".to_string()
    } else if (1e-6..1e21).contains(&f.abs()) {
        format!("{f}")
    } else {
        format_exponent(f)
    }
}

fn format_exponent(f: f64) -> String {
    let text = format!("{f:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => text,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent => write!(f, "absent"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{}", format_float(*x)),
            Value::Str(s) => write!(f, "\"{}\"", s.as_str()),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Host(host) => write!(f, "<{} {}>", host.kind(), host.type_name()),
        }
    }
}
