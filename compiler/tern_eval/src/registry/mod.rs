//! Strategy registries for property access, conversion and iteration.
//!
//! Each registry is an ordered chain of small strategies, each a predicate
//! plus an action. Dispatch walks the chain in registration order and hands
//! the call to the first strategy whose predicate accepts it; later
//! strategies are never consulted, even if the chosen one then fails.
//!
//! Host models plug in by registering their own strategies; the core never
//! branches on a host type.

mod accessor;
mod converter;
mod iterator;

pub use accessor::{Accessor, AccessorRegistry};
pub use converter::{Converter, ConverterRegistry};
pub use iterator::{Cursor, IteratorProvider, IteratorRegistry, ValueCursor};

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
