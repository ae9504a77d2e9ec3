//! Functions implemented by the host over JSON.
//!
//! A host function receives `[default, parent, args...]`, each converted to
//! JSON through the converter registry, and returns JSON that is decayed
//! back into the engine. Errors are plain messages and surface as host
//! boundary errors.

use std::fmt;
use std::sync::Arc;

use tern_eval::{Function, InvocationContext, SharedRetriever, ValueRetriever};
use tern_value::{host_boundary, EvalError, EvalResult};

use crate::host::{decay, to_json};

/// Signature of a host function body.
pub type HostFn =
    dyn Fn(&[serde_json::Value]) -> Result<serde_json::Value, String> + Send + Sync;

/// A `Function` backed by a host closure.
#[derive(Clone)]
pub struct HostFunction {
    body: Arc<HostFn>,
}

impl HostFunction {
    pub fn new(
        body: impl Fn(&[serde_json::Value]) -> Result<serde_json::Value, String>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        HostFunction {
            body: Arc::new(body),
        }
    }
}

impl Function for HostFunction {
    fn bind(
        &self,
        name: &str,
        parent: SharedRetriever,
        args: Vec<SharedRetriever>,
    ) -> Result<SharedRetriever, EvalError> {
        Ok(SharedRetriever::new(HostCallRetriever {
            name: name.to_string(),
            parent,
            args,
            body: Arc::clone(&self.body),
        }))
    }
}

/// Call node for a bound host function.
///
/// Evaluation order: parent, arguments left to right, conversion to JSON,
/// then the host body.
pub struct HostCallRetriever {
    name: String,
    parent: SharedRetriever,
    args: Vec<SharedRetriever>,
    body: Arc<HostFn>,
}

impl HostCallRetriever {
    fn call(&self, ctx: &InvocationContext<'_>) -> EvalResult {
        let parent = self.parent.retrieve_nested(ctx)?;
        let args = self
            .args
            .iter()
            .map(|arg| arg.retrieve_nested(ctx))
            .collect::<Result<Vec<_>, _>>()?;

        let parser = ctx.parser();
        let mut argv = Vec::with_capacity(args.len() + 2);
        argv.push(to_json(parser, ctx.default_value().clone())?);
        argv.push(to_json(parser, parent)?);
        for arg in args {
            argv.push(to_json(parser, arg)?);
        }

        let out = (self.body)(&argv).map_err(host_boundary)?;
        Ok(decay(out))
    }
}

impl ValueRetriever for HostCallRetriever {
    #[tracing::instrument(level = "trace", skip_all, fields(function = %self.name))]
    fn retrieve(&self, ctx: &InvocationContext<'_>) -> EvalResult {
        self.call(ctx)
            .map_err(|err| err.with_note(format!("in call to `{}`", self.name)))
    }
}

impl fmt::Debug for HostCallRetriever {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostCallRetriever")
            .field("name", &self.name)
            .field("parent", &self.parent)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}
