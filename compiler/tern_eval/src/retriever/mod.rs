//! Value retrievers: the lazily evaluated nodes of a compiled expression.
//!
//! An external compiler turns `parent.child.name` into a chain of
//! `PropertyRetriever`s rooted at a `DefaultRetriever`; a call site becomes
//! whatever node the bound `Function` returns. The tree is immutable and
//! evaluated any number of times against different invocation contexts.
//!
//! # Ownership
//!
//! Nodes hold their children through `SharedRetriever` (an `Arc`), so a tree
//! can be shared across threads and dropped as a unit. Nodes never own the
//! `ParserContext`; registries are reached through the invocation context's
//! borrowed handle at evaluation time.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use tern_stack::ensure_sufficient_stack;
use tern_value::{EvalResult, Value};

use crate::invocation::InvocationContext;

/// A node that produces a value from an invocation context.
///
/// `retrieve` never mutates the context. Any side effects belong to the
/// function a call node was bound to.
pub trait ValueRetriever: Send + Sync + fmt::Debug {
    fn retrieve(&self, ctx: &InvocationContext<'_>) -> EvalResult;
}

/// Shared handle to a retriever node.
#[derive(Clone)]
pub struct SharedRetriever(Arc<dyn ValueRetriever>);

impl SharedRetriever {
    pub fn new(retriever: impl ValueRetriever + 'static) -> Self {
        SharedRetriever(Arc::new(retriever))
    }

    /// A constant.
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::new(LiteralRetriever {
            value: value.into(),
        })
    }

    /// The context's default value.
    pub fn default_value() -> Self {
        Self::new(DefaultRetriever)
    }

    /// The context's extra named `name`.
    pub fn extra(name: impl Into<String>) -> Self {
        Self::new(ExtraRetriever { name: name.into() })
    }

    /// `self.name`, resolved through the accessor registry.
    #[must_use]
    pub fn property(self, name: impl Into<String>) -> Self {
        Self::new(PropertyRetriever {
            parent: self,
            name: name.into(),
        })
    }

    /// `self.a.b.c` for `path = ["a", "b", "c"]`.
    #[must_use]
    pub fn path<S: Into<String>>(self, path: impl IntoIterator<Item = S>) -> Self {
        path.into_iter()
            .fold(self, |node, segment| node.property(segment))
    }

    /// Evaluate a child node with stack growth, for use inside `retrieve`.
    pub fn retrieve_nested(&self, ctx: &InvocationContext<'_>) -> EvalResult {
        ensure_sufficient_stack(|| self.0.retrieve(ctx))
    }
}

impl Deref for SharedRetriever {
    type Target = dyn ValueRetriever;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

impl fmt::Debug for SharedRetriever {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

/// Yields a compile-time constant.
#[derive(Debug)]
pub struct LiteralRetriever {
    value: Value,
}

impl ValueRetriever for LiteralRetriever {
    fn retrieve(&self, _ctx: &InvocationContext<'_>) -> EvalResult {
        Ok(self.value.clone())
    }
}

/// Yields the context's default value.
#[derive(Debug)]
pub struct DefaultRetriever;

impl ValueRetriever for DefaultRetriever {
    fn retrieve(&self, ctx: &InvocationContext<'_>) -> EvalResult {
        Ok(ctx.default_value().clone())
    }
}

/// Yields a named extra; fails when the context lacks it.
#[derive(Debug)]
pub struct ExtraRetriever {
    name: String,
}

impl ValueRetriever for ExtraRetriever {
    fn retrieve(&self, ctx: &InvocationContext<'_>) -> EvalResult {
        ctx.extra(&self.name).cloned()
    }
}

/// Evaluates its parent, then reads `name` through the accessor registry.
#[derive(Debug)]
pub struct PropertyRetriever {
    parent: SharedRetriever,
    name: String,
}

impl ValueRetriever for PropertyRetriever {
    fn retrieve(&self, ctx: &InvocationContext<'_>) -> EvalResult {
        let parent = self.parent.retrieve_nested(ctx)?;
        ctx.parser().access(&parent, &self.name)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
