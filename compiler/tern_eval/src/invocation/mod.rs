//! Per-evaluation environment.
//!
//! An `InvocationContext` carries one default value and any number of named
//! extras for a single evaluation pass, plus a borrowed handle to the
//! `ParserContext` whose registries the retriever tree consults.

use rustc_hash::FxHashMap;
use tern_value::{missing_default, missing_extra, EvalError, Value};

use crate::context::ParserContext;

/// Immutable bindings for one evaluation pass.
///
/// May be reused for several sequential evaluations; nothing mutates it
/// once built.
pub struct InvocationContext<'p> {
    parser: &'p ParserContext,
    default: Value,
    extras: FxHashMap<String, Value>,
}

impl<'p> InvocationContext<'p> {
    pub fn builder(parser: &'p ParserContext) -> InvocationBuilder<'p> {
        InvocationBuilder::new(parser)
    }

    /// Registries used to resolve access, conversion and iteration.
    #[inline]
    pub fn parser(&self) -> &'p ParserContext {
        self.parser
    }

    #[inline]
    pub fn default_value(&self) -> &Value {
        &self.default
    }

    pub fn extra(&self, name: &str) -> Result<&Value, EvalError> {
        self.extras.get(name).ok_or_else(|| missing_extra(name))
    }

    pub fn has_extra(&self, name: &str) -> bool {
        self.extras.contains_key(name)
    }

    pub fn extras(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.extras.iter().map(|(name, value)| (name.as_str(), value))
    }
}

/// Builder for `InvocationContext`.
///
/// `use_default` is mandatory; `build` fails with a missing-default error
/// without it. Extras can be added in any order; adding a name twice keeps
/// the last value.
pub struct InvocationBuilder<'p> {
    parser: &'p ParserContext,
    default: Option<Value>,
    extras: FxHashMap<String, Value>,
}

impl<'p> InvocationBuilder<'p> {
    pub fn new(parser: &'p ParserContext) -> Self {
        Self {
            parser,
            default: None,
            extras: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn use_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extras.insert(name.into(), value.into());
        self
    }

    pub fn build(self) -> Result<InvocationContext<'p>, EvalError> {
        let default = self.default.ok_or_else(missing_default)?;
        Ok(InvocationContext {
            parser: self.parser,
            default,
            extras: self.extras,
        })
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
