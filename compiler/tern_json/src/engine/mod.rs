//! Host-facing entry point for JSON hosts.

use tern_eval::{
    InvocationContext, ParserContext, SharedParserContext, SharedRetriever, TextConstructor,
};
use tern_value::EvalError;

use crate::function::HostFunction;
use crate::host::{decay, to_json};

/// A shared parser context preloaded with built-ins and JSON adapters.
///
/// Inputs are decayed into the default value; results are converted back
/// to JSON. Evaluation holds a recursive read lock on the context: a host
/// function may evaluate on the engine that is running it, but must not
/// register functions on it.
#[derive(Clone, Debug)]
pub struct Engine {
    ctx: SharedParserContext,
}

impl Engine {
    pub fn new() -> Self {
        let mut ctx = ParserContext::with_builtins();
        crate::install(&mut ctx);
        Engine {
            ctx: SharedParserContext::new(ctx),
        }
    }

    /// The underlying context, for registering further strategies.
    pub fn context(&self) -> &SharedParserContext {
        &self.ctx
    }

    /// Register a host function; returns `true` if it replaced one.
    pub fn register_function(
        &self,
        name: impl Into<String>,
        body: impl Fn(&[serde_json::Value]) -> Result<serde_json::Value, String>
            + Send
            + Sync
            + 'static,
    ) -> bool {
        self.ctx
            .write()
            .register_function(name, HostFunction::new(body))
    }

    /// Resolve and bind a call site.
    pub fn bind(
        &self,
        name: &str,
        parent: SharedRetriever,
        args: Vec<SharedRetriever>,
    ) -> Result<SharedRetriever, EvalError> {
        self.ctx.read().bind(name, parent, args)
    }

    /// Evaluate `retriever` with `input` as the default value.
    pub fn retrieve(
        &self,
        retriever: &SharedRetriever,
        input: serde_json::Value,
    ) -> Result<serde_json::Value, EvalError> {
        self.retrieve_with(retriever, input, std::iter::empty::<(String, serde_json::Value)>())
    }

    /// Evaluate `retriever` with `input` as the default value and `extras`
    /// as named bindings.
    pub fn retrieve_with<K: Into<String>>(
        &self,
        retriever: &SharedRetriever,
        input: serde_json::Value,
        extras: impl IntoIterator<Item = (K, serde_json::Value)>,
    ) -> Result<serde_json::Value, EvalError> {
        let parser = self.ctx.read();
        let ctx = invocation(&parser, input, extras)?;
        let value = retriever.retrieve(&ctx)?;
        to_json(&parser, value)
    }

    /// Build `template` with `input` as the default value.
    pub fn construct(
        &self,
        template: &TextConstructor,
        input: serde_json::Value,
    ) -> Result<String, EvalError> {
        let parser = self.ctx.read();
        template.construct_with(&parser, decay(input))
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

fn invocation<'p, K: Into<String>>(
    parser: &'p ParserContext,
    input: serde_json::Value,
    extras: impl IntoIterator<Item = (K, serde_json::Value)>,
) -> Result<InvocationContext<'p>, EvalError> {
    extras
        .into_iter()
        .fold(parser.invocation().use_default(decay(input)), |builder, (name, value)| {
            builder.with(name, decay(value))
        })
        .build()
}
