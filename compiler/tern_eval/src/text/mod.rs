//! Compiled interpolation templates.
//!
//! `"Hello {name}!"` compiles to `[Literal("Hello "), Value(extra name),
//! Literal("!")]`. Constructing the text evaluates value fragments in order
//! and stringifies each through the converter registry.

use tern_value::{EvalError, Value};

use crate::context::ParserContext;
use crate::invocation::InvocationContext;
use crate::retriever::SharedRetriever;

/// One piece of a template.
#[derive(Clone, Debug)]
pub enum Fragment {
    Literal(String),
    Value(SharedRetriever),
}

/// Ordered fragment list; fragment order is output order.
#[derive(Clone, Debug, Default)]
pub struct TextConstructor {
    fragments: Vec<Fragment>,
}

impl TextConstructor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fragments(fragments: impl IntoIterator<Item = Fragment>) -> Self {
        let mut text = Self::new();
        for fragment in fragments {
            match fragment {
                Fragment::Literal(s) => text.push_literal(s),
                Fragment::Value(retriever) => text.push_value(retriever),
            }
        }
        text
    }

    /// Append literal text, merging with a preceding literal.
    pub fn push_literal(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        if let Some(Fragment::Literal(last)) = self.fragments.last_mut() {
            last.push_str(&text);
        } else {
            self.fragments.push(Fragment::Literal(text));
        }
    }

    pub fn push_value(&mut self, retriever: SharedRetriever) {
        self.fragments.push(Fragment::Value(retriever));
    }

    #[must_use]
    pub fn literal(mut self, text: impl Into<String>) -> Self {
        self.push_literal(text);
        self
    }

    #[must_use]
    pub fn value(mut self, retriever: SharedRetriever) -> Self {
        self.push_value(retriever);
        self
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Whether the template has no value fragments.
    pub fn is_constant(&self) -> bool {
        self.fragments
            .iter()
            .all(|fragment| matches!(fragment, Fragment::Literal(_)))
    }

    /// Build the text. The first failing fragment aborts construction.
    #[tracing::instrument(level = "trace", skip_all, fields(fragments = self.fragments.len()))]
    pub fn construct(&self, ctx: &InvocationContext<'_>) -> Result<String, EvalError> {
        let mut out = String::new();
        for (index, fragment) in self.fragments.iter().enumerate() {
            match fragment {
                Fragment::Literal(text) => out.push_str(text),
                Fragment::Value(retriever) => {
                    let text = retriever
                        .retrieve_nested(ctx)
                        .and_then(|value| ctx.parser().stringify(value))
                        .map_err(|err| err.with_note(format!("in template fragment {index}")))?;
                    out.push_str(&text);
                }
            }
        }
        Ok(out)
    }

    /// Build the text with `default` as the only binding.
    pub fn construct_with(
        &self,
        parser: &ParserContext,
        default: impl Into<Value>,
    ) -> Result<String, EvalError> {
        let ctx = parser.invocation().use_default(default).build()?;
        self.construct(&ctx)
    }
}
