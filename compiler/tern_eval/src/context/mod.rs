//! The parser context: every registry the compiler and evaluator consult.
//!
//! A `ParserContext` is configured once, by registering built-in and
//! host-specific strategies, and then only read. Registration takes
//! `&mut self` and evaluation borrows `&self` through each
//! `InvocationContext`, so the borrow checker keeps the two phases apart.
//! Hosts that must register after handing the context out use
//! `SharedParserContext`.

mod shared;

use std::fmt;

use tern_value::{EvalError, EvalResult, TypeTag, Value};

pub use shared::SharedParserContext;

use crate::builtins;
use crate::function::{Function, FunctionRegistry};
use crate::invocation::InvocationBuilder;
use crate::registry::{
    Accessor, AccessorRegistry, Converter, ConverterRegistry, Cursor, IteratorProvider,
    IteratorRegistry, ValueCursor,
};
use crate::retriever::SharedRetriever;

/// Owner of the accessor, converter, iterator and function registries.
#[derive(Default)]
pub struct ParserContext {
    accessors: AccessorRegistry,
    converters: ConverterRegistry,
    iterators: IteratorRegistry,
    functions: FunctionRegistry,
}

impl ParserContext {
    /// An empty context with no strategies at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context preloaded with the native strategies: primitive
    /// stringification, numeric conversions, list access and iteration.
    pub fn with_builtins() -> Self {
        let mut ctx = Self::new();
        builtins::install(&mut ctx);
        ctx
    }

    // Registration

    pub fn register_accessor(&mut self, accessor: impl Accessor + 'static) {
        self.accessors.register(accessor);
    }

    pub fn register_converter(&mut self, converter: impl Converter + 'static) {
        self.converters.register(converter);
    }

    pub fn register_iterator_provider(&mut self, provider: impl IteratorProvider + 'static) {
        self.iterators.register(provider);
    }

    /// Register `function` under `name`; returns `true` if it replaced one.
    pub fn register_function(
        &mut self,
        name: impl Into<String>,
        function: impl Function + 'static,
    ) -> bool {
        self.functions.register(name, function)
    }

    // Registries

    pub fn accessors(&self) -> &AccessorRegistry {
        &self.accessors
    }

    pub fn converters(&self) -> &ConverterRegistry {
        &self.converters
    }

    pub fn iterators(&self) -> &IteratorRegistry {
        &self.iterators
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    // Dispatch

    pub fn access(&self, value: &Value, name: &str) -> EvalResult {
        self.accessors.access(value, name)
    }

    pub fn convert(&self, value: Value, to: TypeTag) -> EvalResult {
        self.converters.convert(value, to)
    }

    /// Convert to a Rust string through the converter registry.
    pub fn stringify(&self, value: Value) -> Result<String, EvalError> {
        match self.convert(value, TypeTag::Str)? {
            Value::Str(s) => Ok(s.as_str().to_owned()),
            other => other.get::<String>().cloned(),
        }
    }

    pub fn can_iterate(&self, value: &Value) -> bool {
        self.iterators.can_iterate(value)
    }

    pub fn iterator(&self, value: &Value) -> Result<Box<dyn ValueCursor>, EvalError> {
        self.iterators.iterator(value)
    }

    pub fn iter(&self, value: &Value) -> Result<Cursor, EvalError> {
        self.iterators.iter(value)
    }

    /// Resolve and bind a call site (compile time).
    pub fn bind(
        &self,
        name: &str,
        parent: SharedRetriever,
        args: Vec<SharedRetriever>,
    ) -> Result<SharedRetriever, EvalError> {
        self.functions.bind(name, parent, args)
    }

    // Evaluation

    /// Start building an invocation context bound to this parser context.
    pub fn invocation(&self) -> InvocationBuilder<'_> {
        InvocationBuilder::new(self)
    }

    /// Evaluate `retriever` with `default` as the only binding.
    pub fn retrieve_with(&self, retriever: &SharedRetriever, default: impl Into<Value>) -> EvalResult {
        let ctx = self.invocation().use_default(default).build()?;
        retriever.retrieve(&ctx)
    }
}

impl fmt::Debug for ParserContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserContext")
            .field("accessors", &self.accessors.len())
            .field("converters", &self.converters.len())
            .field("iterators", &self.iterators.len())
            .field("functions", &self.functions.len())
            .finish()
    }
}
