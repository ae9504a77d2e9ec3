//! Native strategies available without any host adapter.
//!
//! - `PrimitiveStringConverter`: absent/bool/int/float → str
//! - `NumericConverter`: int ↔ float, str → int/float, bool → int
//! - `ListAccessor`: `length` and decimal indices on native lists
//! - `ListIterators`: cursors over native lists

mod convert;
mod list;

pub use convert::{NumericConverter, PrimitiveStringConverter};
pub use list::{parse_index, ListAccessor, ListCursor, ListIterators};

use crate::context::ParserContext;

/// Register every native strategy on `ctx`.
pub fn install(ctx: &mut ParserContext) {
    ctx.register_accessor(ListAccessor);
    ctx.register_converter(PrimitiveStringConverter);
    ctx.register_converter(NumericConverter);
    ctx.register_iterator_provider(ListIterators);
}
