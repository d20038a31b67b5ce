//! Callable value types: user functions and builtins

use std::fmt;
use std::rc::Rc;

use super::Value;
use crate::ast::FunctionDecl;
use crate::console::Console;
use crate::environment::ScopeId;
use crate::error::EvalError;

/// Signature of a native built-in. Built-ins get the evaluator's console so
/// `input` and `output` can be redirected.
pub type BuiltinFnPtr = fn(&mut dyn Console, &[Value]) -> Result<Value, EvalError>;

/// A user-defined function: its declaration plus the scope that was
/// current when the declaration executed.
#[derive(Clone)]
pub struct FunctionValue {
    /// The declaration, shared with the AST
    pub decl: Rc<FunctionDecl>,

    /// Scope captured at declaration time; call frames are parented here
    pub closure: ScopeId,
}

impl FunctionValue {
    /// Create a new function value
    pub fn new(decl: Rc<FunctionDecl>, closure: ScopeId) -> Self {
        Self { decl, closure }
    }

    /// Function name
    pub fn name(&self) -> &str {
        &self.decl.name
    }

    /// Number of declared parameters
    pub fn arity(&self) -> usize {
        self.decl.params.len()
    }

    /// Parameter names in declaration order
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.decl.params.iter().map(|p| p.name.as_str())
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue")
            .field("name", &self.decl.name)
            .field("arity", &self.arity())
            .field("closure", &self.closure)
            .finish()
    }
}

/// A built-in native function.
#[derive(Clone, Copy)]
pub struct BuiltinFn {
    /// Function name (for display/debugging)
    pub name: &'static str,

    /// Exact number of arguments accepted
    pub arity: usize,

    /// The native implementation
    pub func: BuiltinFnPtr,
}

impl fmt::Debug for BuiltinFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BuiltinFn({})", self.name)
    }
}
