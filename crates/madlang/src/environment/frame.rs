//! A single scope record in the environment arena

use indexmap::IndexMap;

use super::ScopeId;
use crate::value::Value;

/// One lexical scope: its own bindings plus a link to the enclosing scope.
#[derive(Debug, Clone, Default)]
pub(crate) struct Frame {
    /// Bindings declared directly in this scope, in declaration order
    pub(crate) bindings: IndexMap<String, Value>,

    /// Enclosing scope; `None` only for the global scope
    pub(crate) parent: Option<ScopeId>,

    /// Set when a function declared here (or in a descendant) captured
    /// this scope. Captured frames are reclaimed by collection instead of
    /// on exit.
    pub(crate) captured: bool,

    /// The block or call that created this frame is still running
    pub(crate) open: bool,

    /// Allocated, i.e. not on the free list
    pub(crate) live: bool,
}

impl Frame {
    /// A freshly allocated, open frame.
    pub(crate) fn new(parent: Option<ScopeId>) -> Self {
        Self {
            bindings: IndexMap::new(),
            parent,
            captured: false,
            open: true,
            live: true,
        }
    }

    /// Reopen a recycled slot.
    pub(crate) fn reset(&mut self, parent: ScopeId) {
        *self = Self::new(Some(parent));
    }

    /// Drop all bindings and mark the slot free.
    pub(crate) fn release(&mut self) {
        self.bindings.clear();
        self.parent = None;
        self.captured = false;
        self.open = false;
        self.live = false;
    }
}
