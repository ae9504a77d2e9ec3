//! Tern JSON - `serde_json` as the host data model.
//!
//! Host data crosses into the engine through `decay` (scalars become native
//! values, objects and arrays stay opaque) and back out through the
//! converter registry's value → JSON conversion. This crate provides:
//!
//! - `JsonValue`: the opaque host object wrapping a `serde_json::Value`
//! - the JSON accessor, converters and iterator provider, registered by
//!   `install`
//! - `HostFunction`: functions implemented over JSON arguments
//! - `Engine`: a ready-to-use shared context for JSON hosts

mod adapters;
mod engine;
mod function;
mod host;

pub use adapters::{
    JsonAccessor, JsonArrayCursor, JsonArrayIterators, JsonNumberConverter,
    JsonSequenceConverter, JsonStringConverter, ToJsonConverter,
};
pub use engine::Engine;
pub use function::{HostCallRetriever, HostFn, HostFunction};
pub use host::{decay, json_of, lift, to_json, JsonValue, JSON, KIND};

use tern_eval::ParserContext;

/// Register the JSON accessor, converters and iterator provider on `ctx`.
///
/// Built-ins registered earlier keep priority; the JSON strategies only
/// apply to JSON host values and to conversions targeting them.
pub fn install(ctx: &mut ParserContext) {
    tracing::debug!("installing json host adapters");
    ctx.register_accessor(JsonAccessor);
    ctx.register_converter(JsonStringConverter);
    ctx.register_converter(JsonNumberConverter);
    ctx.register_converter(JsonSequenceConverter);
    ctx.register_converter(ToJsonConverter);
    ctx.register_iterator_provider(JsonArrayIterators);
}
