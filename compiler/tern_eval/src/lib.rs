//! Tern Eval - strategy registries and lazy evaluation for tern expressions.
//!
//! An external compiler turns expression text into a tree of
//! `SharedRetriever` nodes and template text into a `TextConstructor`.
//! Evaluating either needs:
//!
//! - a `ParserContext`: the accessor, converter, iterator and function
//!   registries, configured once and then only read
//! - an `InvocationContext`: one default value plus named extras for a
//!   single evaluation pass
//!
//! Host models plug in by registering strategies; nothing in this crate
//! knows about any particular host object representation.

mod builtins;
mod context;
mod function;
mod invocation;
mod registry;
mod retriever;
mod text;

pub use builtins::{
    install as install_builtins, parse_index, ListAccessor, ListCursor, ListIterators,
    NumericConverter, PrimitiveStringConverter,
};
pub use context::{ParserContext, SharedParserContext};
pub use function::{CallRetriever, Function, FunctionRegistry, NativeFn, NativeFunction};
pub use invocation::{InvocationBuilder, InvocationContext};
pub use registry::{
    Accessor, AccessorRegistry, Converter, ConverterRegistry, Cursor, IteratorProvider,
    IteratorRegistry, ValueCursor,
};
pub use retriever::{
    DefaultRetriever, ExtraRetriever, LiteralRetriever, PropertyRetriever, SharedRetriever,
    ValueRetriever,
};
pub use text::{Fragment, TextConstructor};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set, and only the first call has any
/// effect. Library code never calls this; hosts and tests opt in.
///
/// ```bash
/// RUST_LOG=tern_eval=debug cargo test -p tern_json
/// RUST_LOG=tern_eval::registry=trace cargo test
/// ```
pub fn init_tracing() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{fmt, EnvFilter};

    TRACING_INIT.call_once(|| {
        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .with(EnvFilter::from_default_env())
            .init();
    });
}
