//! Error types for retrieval, conversion and context construction.
//!
//! `EvalErrorKind` is the structured category; factory functions
//! (e.g. `access_failed()`) are the construction API and keep the
//! runtime type names and requested names together so diagnostics can be
//! rendered without inspecting the value again.
//!
//! Every core operation is fail-fast: the first error aborts the enclosing
//! evaluation and is returned to the caller unchanged, apart from notes
//! attached on the way out.

use crate::value::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
///
/// "Unsupported" variants mean no registered strategy applied; "Failed"
/// variants mean a strategy applied and then refused. The two are kept
/// apart so callers can tell a missing adapter from bad data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    /// Wrong variant requested from a `Value`.
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    // Access
    #[error("no accessor can read properties of {type_name}")]
    AccessUnsupported { type_name: String },
    #[error("cannot read property `{member}` of {type_name}: {reason}")]
    AccessFailed {
        member: String,
        type_name: String,
        reason: String,
    },

    // Conversion
    #[error("no converter from {from} to {to}")]
    ConversionUnsupported { from: String, to: String },
    #[error("cannot convert {from} to {to}: {reason}")]
    ConversionFailed {
        from: String,
        to: String,
        reason: String,
    },

    // Iteration
    #[error("{type_name} is not iterable")]
    NotIterable { type_name: String },
    #[error("cursor is not positioned on an element")]
    InvalidCursor,

    // Context
    #[error("no extra named `{name}` in invocation context")]
    MissingExtra { name: String },
    #[error("invocation context built without a default value")]
    MissingDefault,

    // Functions
    #[error("undefined function: {name}")]
    FunctionNotFound { name: String },
    #[error("{name} expects {expected} argument{}, got {got}", plural(.expected))]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    /// An opaque host operation failed; carries the host's own message.
    #[error("host error: {message}")]
    HostBoundary { message: String },
}

fn plural(count: &usize) -> &'static str {
    if *count == 1 {
        ""
    } else {
        "s"
    }
}

/// Evaluation error: a kind plus context notes added while unwinding.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}{}", render_notes(.notes))]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Secondary context, innermost first (e.g. "in call to `split`").
    pub notes: Vec<String>,
}

fn render_notes(notes: &[String]) -> String {
    notes.iter().map(|note| format!("\n  note: {note}")).collect()
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        Self {
            kind,
            notes: Vec::new(),
        }
    }

    /// Add a context note to this error.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn kind(&self) -> &EvalErrorKind {
        &self.kind
    }
}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        Self::from_kind(kind)
    }
}

// Value Errors

/// A `Value` did not hold the requested variant.
#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

// Access Errors

/// No registered accessor applies to the value.
#[cold]
pub fn access_unsupported(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::AccessUnsupported {
        type_name: type_name.to_string(),
    })
}

/// An accessor applied but could not produce the member.
#[cold]
pub fn access_failed(member: &str, type_name: &str, reason: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::AccessFailed {
        member: member.to_string(),
        type_name: type_name.to_string(),
        reason: reason.into(),
    })
}

// Conversion Errors

/// No registered converter handles the type pair.
#[cold]
pub fn conversion_unsupported(from: &str, to: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ConversionUnsupported {
        from: from.to_string(),
        to: to.to_string(),
    })
}

/// A converter applied but rejected the value.
#[cold]
pub fn conversion_failed(from: &str, to: &str, reason: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ConversionFailed {
        from: from.to_string(),
        to: to.to_string(),
        reason: reason.into(),
    })
}

// Iteration Errors

/// No registered iterator provider applies to the value.
#[cold]
pub fn not_iterable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotIterable {
        type_name: type_name.to_string(),
    })
}

/// `current()` called before the first `next()` or after exhaustion.
#[cold]
pub fn invalid_cursor() -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidCursor)
}

// Context Errors

/// Named extra not present in the invocation context.
#[cold]
pub fn missing_extra(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingExtra {
        name: name.to_string(),
    })
}

/// Invocation context built without `use_default`.
#[cold]
pub fn missing_default() -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingDefault)
}

// Function Errors

/// No function registered under `name`.
#[cold]
pub fn function_not_found(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::FunctionNotFound {
        name: name.to_string(),
    })
}

/// Wrong number of arguments at a call site.
#[cold]
pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

// Host Errors

/// Wrap a failure raised on the host side of the boundary.
#[cold]
pub fn host_boundary(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::HostBoundary {
        message: message.into(),
    })
}
