//! Registry strategies for JSON host values.

mod accessor;
mod convert;
mod iter;

pub use accessor::JsonAccessor;
pub use convert::{JsonNumberConverter, JsonSequenceConverter, JsonStringConverter, ToJsonConverter};
pub use iter::{JsonArrayCursor, JsonArrayIterators};
