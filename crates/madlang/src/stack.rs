//! Stack growth for deeply recursive evaluation
//!
//! Every user function call recurses through the evaluator several times
//! (call, statement list, statement, expression). Wrapping the call in
//! [`ensure_sufficient_stack`] grows the native stack on demand, so the
//! configured call depth limit is what stops runaway recursion rather
//! than a host stack overflow.

/// Minimum stack space to keep available (100KB red zone).
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Ensure sufficient stack space is available before executing `f`.
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}
