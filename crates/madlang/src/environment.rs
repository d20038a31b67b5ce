//! Runtime environment managing lexical scopes and their bindings

mod frame;
mod prelude;

use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::trace;

use frame::Frame;

use crate::error::EvalError;
use crate::value::{FunctionValue, Value};

/// Stable handle to one scope in an [`Environment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub(crate) usize);

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scope#{}", self.0)
    }
}

/// The runtime environment: an arena of scopes linked child-to-parent.
///
/// Scopes form a tree rooted at the global scope. A block's scope is
/// parented to the scope that was current when the block started; a call
/// frame is parented to the callee's closure. Lookup and assignment walk
/// outward to the nearest binding.
///
/// # Example
///
/// ```
/// use madlang::{Environment, Value};
///
/// let mut env = Environment::new();
/// let global = env.global();
/// env.declare(global, "x", Value::Integer(1));
///
/// // Enter a new scope
/// let inner = env.push_frame(global);
/// env.declare(inner, "x", Value::Integer(10)); // Shadows outer x
/// env.assign(inner, "x", Value::Integer(11)).unwrap();
///
/// assert_eq!(env.lookup(inner, "x").unwrap(), &Value::Integer(11));
///
/// // Exit scope
/// env.pop_frame(inner);
///
/// assert_eq!(env.lookup(global, "x").unwrap(), &Value::Integer(1));
/// ```
#[derive(Debug, Clone)]
pub struct Environment {
    /// Every scope ever allocated; released slots are recycled
    frames: Vec<Frame>,

    /// Released slots available for reuse
    free: Vec<usize>,

    /// Every function value created over a scope in this arena
    closures: Vec<(Weak<FunctionValue>, ScopeId)>,

    /// Captured frames closed since the last collection
    detached: usize,

    /// Collect once `detached` reaches this many
    collect_after: usize,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Create an environment holding only an empty global scope.
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::new(None)],
            free: Vec::new(),
            closures: Vec::new(),
            detached: 0,
            collect_after: 1,
        }
    }

    /// The root scope.
    pub fn global(&self) -> ScopeId {
        ScopeId(0)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Frame Management (Scope Entry/Exit)
    // ═══════════════════════════════════════════════════════════════════

    /// Allocate a new empty scope whose parent is `parent`.
    pub fn push_frame(&mut self, parent: ScopeId) -> ScopeId {
        match self.free.pop() {
            Some(slot) => {
                self.frames[slot].reset(parent);
                ScopeId(slot)
            }
            None => {
                self.frames.push(Frame::new(Some(parent)));
                ScopeId(self.frames.len() - 1)
            }
        }
    }

    /// Close a scope whose block or call has finished.
    ///
    /// An uncaptured scope is released at once. A captured scope stays
    /// allocated while a function value can still reach it, and is
    /// reclaimed by [`collect_garbage`](Self::collect_garbage) once none
    /// can. The global scope is never released.
    pub fn pop_frame(&mut self, scope: ScopeId) {
        if scope == self.global() {
            return;
        }
        let frame = &mut self.frames[scope.0];
        frame.open = false;
        if !frame.captured {
            frame.release();
            self.free.push(scope.0);
            return;
        }

        self.detached += 1;
        if self.detached >= self.collect_after {
            self.collect_garbage();
        }
    }

    /// Record that `func` closes over its scope: mark that scope and all
    /// of its ancestors as captured, and keep a weak handle so collection
    /// can tell whether the function is still held anywhere.
    pub fn capture(&mut self, func: &Rc<FunctionValue>) {
        self.closures.push((Rc::downgrade(func), func.closure));

        let mut cursor = Some(func.closure);
        while let Some(id) = cursor {
            let frame = &mut self.frames[id.0];
            if frame.captured {
                // Ancestors were marked by an earlier capture
                break;
            }
            frame.captured = true;
            cursor = frame.parent;
        }
    }

    /// Release every closed scope that no running block and no live
    /// function value can reach. Returns the number of scopes released.
    ///
    /// Roots are the global scope, every open scope, and the closure of
    /// every function value held outside the arena (more strong handles
    /// than bindings storing it). A closed scope that is only kept alive by
    /// the functions declared in it is released.
    pub fn collect_garbage(&mut self) -> usize {
        // How many bindings store each function value
        let mut stored: HashMap<*const FunctionValue, usize> = HashMap::new();
        for frame in self.frames.iter().filter(|frame| frame.live) {
            for value in frame.bindings.values() {
                if let Value::Function(func) = value {
                    *stored.entry(Rc::as_ptr(func)).or_default() += 1;
                }
            }
        }

        let mut pending: Vec<ScopeId> = self
            .frames
            .iter()
            .enumerate()
            .filter(|(_, frame)| frame.live && frame.open)
            .map(|(slot, _)| ScopeId(slot))
            .collect();
        pending.push(self.global());
        for (func, closure) in &self.closures {
            let held = stored.get(&func.as_ptr()).copied().unwrap_or(0);
            if func.strong_count() > held {
                pending.push(*closure);
            }
        }

        // Mark
        let mut reachable = vec![false; self.frames.len()];
        while let Some(id) = pending.pop() {
            if std::mem::replace(&mut reachable[id.0], true) {
                continue;
            }
            let frame = &self.frames[id.0];
            pending.extend(frame.parent);
            pending.extend(frame.bindings.values().filter_map(|value| match value {
                Value::Function(func) => Some(func.closure),
                _ => None,
            }));
        }

        // Sweep
        let mut released = 0;
        for (slot, frame) in self.frames.iter_mut().enumerate() {
            if frame.live && !reachable[slot] {
                frame.release();
                self.free.push(slot);
                released += 1;
            }
        }

        self.closures.retain(|(func, _)| func.strong_count() > 0);
        self.detached = 0;
        self.collect_after = self.live_frames().max(1);
        trace!(released, live = self.live_frames(), "collected scopes");
        released
    }

    /// Whether `scope` has been captured by a closure.
    pub fn is_captured(&self, scope: ScopeId) -> bool {
        self.frames[scope.0].captured
    }

    /// Enclosing scope of `scope`, `None` for the global scope.
    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.frames[scope.0].parent
    }

    /// Number of scopes on the chain from `scope` to the root, inclusive.
    pub fn depth(&self, scope: ScopeId) -> usize {
        self.chain(scope).count()
    }

    /// Number of scopes currently allocated (not on the free list).
    pub fn live_frames(&self) -> usize {
        self.frames.len() - self.free.len()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Declaration, Lookup, Assignment
    // ═══════════════════════════════════════════════════════════════════

    /// Bind `name` in `scope` itself, overwriting any binding of the same
    /// name in that scope. Enclosing bindings are shadowed, not touched.
    pub fn declare(&mut self, scope: ScopeId, name: impl Into<String>, value: Value) {
        self.frames[scope.0].bindings.insert(name.into(), value);
    }

    /// Value of the nearest binding of `name`, searching outward from `scope`.
    ///
    /// # Errors
    ///
    /// `UnboundReference` if no scope up to the root declares `name`.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Result<&Value, EvalError> {
        self.get(scope, name).ok_or_else(|| EvalError::unbound(name))
    }

    /// Like [`lookup`](Self::lookup) but returns `None` when unbound.
    pub fn get(&self, scope: ScopeId, name: &str) -> Option<&Value> {
        let owner = self.resolve(scope, name)?;
        self.frames[owner.0].bindings.get(name)
    }

    /// Overwrite the nearest binding of `name`, searching outward from `scope`.
    ///
    /// # Errors
    ///
    /// `UnboundReference` if no scope up to the root declares `name`.
    pub fn assign(&mut self, scope: ScopeId, name: &str, value: Value) -> Result<(), EvalError> {
        let owner = self
            .resolve(scope, name)
            .ok_or_else(|| EvalError::unbound(name))?;
        if let Some(slot) = self.frames[owner.0].bindings.get_mut(name) {
            *slot = value;
        }
        Ok(())
    }

    /// The scope holding the nearest binding of `name`.
    pub fn resolve(&self, scope: ScopeId, name: &str) -> Option<ScopeId> {
        self.chain(scope)
            .find(|id| self.frames[id.0].bindings.contains_key(name))
    }

    /// Check if `name` is declared directly in `scope`.
    pub fn contains_in_scope(&self, scope: ScopeId, name: &str) -> bool {
        self.frames[scope.0].bindings.contains_key(name)
    }

    /// Names declared directly in `scope`, in declaration order.
    pub fn names_in_scope(&self, scope: ScopeId) -> Vec<&str> {
        self.frames[scope.0]
            .bindings
            .keys()
            .map(String::as_str)
            .collect()
    }

    /// Iterate from `scope` outward to the root.
    fn chain(&self, scope: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(Some(scope), move |id| self.frames[id.0].parent)
    }
}
