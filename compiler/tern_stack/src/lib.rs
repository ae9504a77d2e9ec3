//! Stack growth guard for recursive evaluation.
//!
//! Retriever trees are evaluated recursively: a property chain
//! `a.b.c.d ...` produced by an external compiler nests one node per
//! segment, and a call node recurses into its parent and every argument.
//! Machine-generated templates can nest deeply enough to exhaust a thread's
//! default stack, so each recursive step goes through
//! [`ensure_sufficient_stack`].
//!
//! - **Native targets**: grows the stack on demand via `stacker`.
//! - **WASM targets**: plain call; the host engine owns the stack.
//!
//! ```text
//! fn retrieve(&self, ctx: &InvocationContext<'_>) -> EvalResult {
//!     let parent = ensure_sufficient_stack(|| self.parent.retrieve(ctx))?;
//!     ctx.parser().access(&parent, &self.name)
//! }
//! ```

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (1MB).
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM version: call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
