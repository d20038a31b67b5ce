//! Value representation for runtime values

mod callable;
mod display;

pub use callable::{BuiltinFn, BuiltinFnPtr, FunctionValue};

use std::rc::Rc;

/// Runtime value representation for the Madlang interpreter.
///
/// Only `Integer` and `Boolean` are data; every operator checks for one of
/// those two and rejects everything else with a type mismatch. `Void` is
/// the "no value" result of statements, of functions that finish without
/// returning, and of variables declared without an initializer.
#[derive(Clone)]
pub enum Value {
    /// Fixed-width signed integer
    Integer(i64),

    /// Boolean: `true` or `false`
    Boolean(bool),

    /// No value
    Void,

    /// User-defined function with its captured scope
    Function(Rc<FunctionValue>),

    /// Built-in native function
    Builtin(BuiltinFn),
}

impl Value {
    /// Name of this value's kind, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "Integer",
            Value::Boolean(_) => "Boolean",
            Value::Void => "void",
            Value::Function(_) | Value::Builtin(_) => "function",
        }
    }

    /// The integer payload, if this is an `Integer`.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// The boolean payload, if this is a `Boolean`.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// True for user functions and built-ins.
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_) | Value::Builtin(_))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Void, Value::Void) => true,
            // Functions compare by identity
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => a.name == b.name,
            _ => false,
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}
