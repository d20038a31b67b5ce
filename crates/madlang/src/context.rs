//! Evaluation context configuration

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Default limit on nested user function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

/// Configuration and cancellation state for an evaluation run.
///
/// The interrupt flag is shared, so a clone handed to another thread can
/// stop a runaway program; the evaluator checks it on every loop iteration
/// and every call.
#[derive(Debug, Clone)]
pub struct EvalContext {
    /// Maximum call depth before `StackOverflow` is reported
    pub max_call_depth: usize,

    /// Interrupt flag - set to true to abort evaluation
    pub interrupt: Arc<AtomicBool>,
}

impl Default for EvalContext {
    fn default() -> Self {
        Self {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            interrupt: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl EvalContext {
    /// Create a new context with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context with a custom call depth limit.
    pub fn with_max_call_depth(max_depth: usize) -> Self {
        Self {
            max_call_depth: max_depth,
            ..Default::default()
        }
    }

    /// Check if evaluation has been interrupted.
    pub fn is_interrupted(&self) -> bool {
        self.interrupt.load(Ordering::Relaxed)
    }

    /// Request interruption of evaluation.
    pub fn interrupt(&self) {
        self.interrupt.store(true, Ordering::Relaxed);
    }

    /// Reset the interrupt flag.
    pub fn reset_interrupt(&self) {
        self.interrupt.store(false, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_depth() {
        assert_eq!(EvalContext::new().max_call_depth, DEFAULT_MAX_CALL_DEPTH);
        assert_eq!(EvalContext::with_max_call_depth(7).max_call_depth, 7);
    }

    #[test]
    fn test_interrupt_is_shared_between_clones() {
        let ctx = EvalContext::new();
        let handle = ctx.clone();
        assert!(!ctx.is_interrupted());

        handle.interrupt();
        assert!(ctx.is_interrupted());

        ctx.reset_interrupt();
        assert!(!handle.is_interrupted());
    }
}
