//! RAII guard for the current-scope cursor

use std::ops::{Deref, DerefMut};

use tracing::trace;

use super::Evaluator;
use crate::console::Console;
use crate::environment::ScopeId;

/// Guard that makes a fresh scope current and restores the previous
/// cursor when dropped.
///
/// The restore runs on every exit path: normal completion, an error
/// propagated with `?`, or a `return` unwinding out of a block.
///
/// # Example
///
/// ```
/// use madlang::{BufferedConsole, Evaluator, Value};
///
/// let mut ev = Evaluator::with_console(BufferedConsole::new());
/// let global = ev.global_scope();
/// ev.declare("x", Value::Integer(1));
///
/// {
///     let mut guard = ev.scope_guard(global);
///     guard.declare("x", Value::Integer(2));
///     assert_eq!(guard.lookup("x").unwrap(), Value::Integer(2));
/// }
/// // guard dropped, cursor restored
/// assert_eq!(ev.current_scope(), global);
/// assert_eq!(ev.lookup("x").unwrap(), Value::Integer(1));
/// ```
pub struct ScopeGuard<'a, C: Console> {
    evaluator: &'a mut Evaluator<C>,
    previous: ScopeId,
    scope: ScopeId,
}

impl<C: Console> Evaluator<C> {
    /// Push a scope parented to `parent`, make it current, and return a
    /// guard that undoes both on drop.
    pub fn scope_guard(&mut self, parent: ScopeId) -> ScopeGuard<'_, C> {
        let scope = self.env.push_frame(parent);
        let previous = std::mem::replace(&mut self.current, scope);
        trace!(%scope, %parent, "enter scope");
        ScopeGuard {
            evaluator: self,
            previous,
            scope,
        }
    }
}

impl<'a, C: Console> ScopeGuard<'a, C> {
    /// The scope this guard owns.
    pub fn scope(&self) -> ScopeId {
        self.scope
    }
}

impl<'a, C: Console> Drop for ScopeGuard<'a, C> {
    fn drop(&mut self) {
        self.evaluator.current = self.previous;
        self.evaluator.env.pop_frame(self.scope);
        trace!(scope = %self.scope, "exit scope");
    }
}

impl<'a, C: Console> Deref for ScopeGuard<'a, C> {
    type Target = Evaluator<C>;

    fn deref(&self) -> &Self::Target {
        self.evaluator
    }
}

impl<'a, C: Console> DerefMut for ScopeGuard<'a, C> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.evaluator
    }
}
