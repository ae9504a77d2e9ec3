//! Thread-safe shared parser context.

use std::fmt;
use std::sync::Arc;

use super::ParserContext;

/// `ParserContext` behind `Arc<RwLock>`.
///
/// For hosts that hand the context to several owners and still register
/// functions afterwards. Evaluate under `read()`; the guard derefs to
/// `&ParserContext`, so invocation contexts borrow from it as usual.
///
/// Read guards are recursive: a host function may evaluate on the same
/// context while its caller holds a guard, even with a writer queued.
pub struct SharedParserContext(Arc<parking_lot::RwLock<ParserContext>>);

impl SharedParserContext {
    pub fn new(ctx: ParserContext) -> Self {
        SharedParserContext(Arc::new(parking_lot::RwLock::new(ctx)))
    }

    /// Shared access for evaluation. Does not wait behind queued writers
    /// when this thread already holds a read guard.
    pub fn read(&self) -> parking_lot::RwLockReadGuard<'_, ParserContext> {
        self.0.read_recursive()
    }

    /// Exclusive access for registration. Blocks until running evaluations
    /// release their read guards.
    pub fn write(&self) -> parking_lot::RwLockWriteGuard<'_, ParserContext> {
        self.0.write()
    }
}

impl Clone for SharedParserContext {
    fn clone(&self) -> Self {
        SharedParserContext(Arc::clone(&self.0))
    }
}

impl Default for SharedParserContext {
    fn default() -> Self {
        Self::new(ParserContext::with_builtins())
    }
}

impl fmt::Debug for SharedParserContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedParserContext({:?})", &*self.read())
    }
}
