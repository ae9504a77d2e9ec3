//! Two-phase functions: bind at compile time, call at evaluation time.
//!
//! The compiler resolves a call site by name and calls
//! `Function::bind(name, parent, args)`, which returns a retriever. Nothing
//! runs until that retriever is evaluated, so context-dependent or
//! side-effecting behavior happens once per evaluation, not once per
//! compilation.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use tern_value::{arity_mismatch, function_not_found, EvalError, EvalResult, Value};

use crate::invocation::InvocationContext;
use crate::retriever::{SharedRetriever, ValueRetriever};

/// A named function registered in a `ParserContext`.
pub trait Function: Send + Sync {
    /// Bind a call site. May reject it (e.g. wrong argument count), but
    /// must not evaluate `parent` or `args`.
    fn bind(
        &self,
        name: &str,
        parent: SharedRetriever,
        args: Vec<SharedRetriever>,
    ) -> Result<SharedRetriever, EvalError>;
}

/// Name → function table.
#[derive(Default)]
pub struct FunctionRegistry {
    functions: FxHashMap<String, Box<dyn Function>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `function` under `name`, replacing any previous entry.
    ///
    /// Returns `true` if an entry was replaced.
    pub fn register(&mut self, name: impl Into<String>, function: impl Function + 'static) -> bool {
        let name = name.into();
        let replaced = self.functions.insert(name.clone(), Box::new(function));
        if replaced.is_some() {
            tracing::debug!(%name, "replaced function");
        } else {
            tracing::debug!(%name, "registered function");
        }
        replaced.is_some()
    }

    pub fn get(&self, name: &str) -> Option<&dyn Function> {
        self.functions.get(name).map(|function| &**function)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Resolve and bind a call site.
    #[tracing::instrument(level = "trace", skip(self, parent, args), fields(argc = args.len()))]
    pub fn bind(
        &self,
        name: &str,
        parent: SharedRetriever,
        args: Vec<SharedRetriever>,
    ) -> Result<SharedRetriever, EvalError> {
        let function = self.get(name).ok_or_else(|| function_not_found(name))?;
        function.bind(name, parent, args)
    }

    /// Registered names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

/// Signature of a native function body: context, parent value, argument
/// values.
pub type NativeFn =
    dyn for<'a, 'p> Fn(&'a InvocationContext<'p>, Value, Vec<Value>) -> EvalResult + Send + Sync;

/// A function implemented in Rust.
#[derive(Clone)]
pub struct NativeFunction {
    arity: Option<usize>,
    body: Arc<NativeFn>,
}

impl NativeFunction {
    pub fn new(
        body: impl for<'a, 'p> Fn(&'a InvocationContext<'p>, Value, Vec<Value>) -> EvalResult
            + Send
            + Sync
            + 'static,
    ) -> Self {
        NativeFunction {
            arity: None,
            body: Arc::new(body),
        }
    }

    /// Require exactly `arity` arguments at bind time.
    #[must_use]
    pub fn with_arity(mut self, arity: usize) -> Self {
        self.arity = Some(arity);
        self
    }
}

impl Function for NativeFunction {
    fn bind(
        &self,
        name: &str,
        parent: SharedRetriever,
        args: Vec<SharedRetriever>,
    ) -> Result<SharedRetriever, EvalError> {
        if let Some(expected) = self.arity {
            if args.len() != expected {
                return Err(arity_mismatch(name, expected, args.len()));
            }
        }
        Ok(SharedRetriever::new(CallRetriever {
            name: name.to_string(),
            parent,
            args,
            body: Arc::clone(&self.body),
        }))
    }
}

/// Call node for a bound native function.
///
/// Evaluation order: parent, then arguments left to right, then the body.
pub struct CallRetriever {
    name: String,
    parent: SharedRetriever,
    args: Vec<SharedRetriever>,
    body: Arc<NativeFn>,
}

impl CallRetriever {
    fn call(&self, ctx: &InvocationContext<'_>) -> EvalResult {
        let parent = self.parent.retrieve_nested(ctx)?;
        let args = self
            .args
            .iter()
            .map(|arg| arg.retrieve_nested(ctx))
            .collect::<Result<Vec<_>, _>>()?;
        (self.body)(ctx, parent, args)
    }
}

impl ValueRetriever for CallRetriever {
    #[tracing::instrument(level = "trace", skip_all, fields(function = %self.name))]
    fn retrieve(&self, ctx: &InvocationContext<'_>) -> EvalResult {
        self.call(ctx)
            .map_err(|err| err.with_note(format!("in call to `{}`", self.name)))
    }
}

impl fmt::Debug for CallRetriever {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallRetriever")
            .field("name", &self.name)
            .field("parent", &self.parent)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}
