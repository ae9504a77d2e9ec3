//! Tern Value - the dynamic value container shared by every tern crate.
//!
//! This crate provides:
//! - `Value`: a closed tagged union over absent, bool, int, float, string,
//!   native list and opaque host values
//! - `HostValue` / `HostObject`: the escape hatch for foreign objects that
//!   only registry strategies know how to read
//! - `TypeTag`: runtime type names used by converter dispatch
//! - `EvalError` / `EvalErrorKind` / `EvalResult`: the fail-fast error model
//!
//! # Type inspection
//!
//! `Value::is::<T>()` reports whether the active variant is exactly `T`,
//! `Value::get::<T>()` downcasts or fails with a type mismatch. Neither
//! coerces; coercion is the converter registry's job.

mod errors;
mod type_tag;
mod value;

pub use errors::{
    access_failed, access_unsupported, arity_mismatch, conversion_failed, conversion_unsupported,
    function_not_found, host_boundary, invalid_cursor, missing_default, missing_extra,
    not_iterable, type_mismatch, EvalError, EvalErrorKind, EvalResult,
};
pub use type_tag::TypeTag;
pub use value::{format_float, Heap, HostObject, HostValue, Value, ValueType};
