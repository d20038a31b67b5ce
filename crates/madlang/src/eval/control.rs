//! Control signal produced by statement execution

use crate::Value;

/// Outcome of executing a statement.
///
/// Statements do not produce values. They either finish and let the next
/// statement run, or they begin a non-local exit that unwinds every
/// enclosing block up to the nearest function call. Failures travel
/// separately in the `Err` side of the surrounding `Result`.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlFlow {
    /// Continue with the next statement.
    Normal,

    /// Return from the enclosing function with a value.
    Return {
        /// Value to return from the function
        value: Value,
    },
}

impl ControlFlow {
    /// Create a return.
    pub fn return_value(value: Value) -> Self {
        ControlFlow::Return { value }
    }

    /// True when this signal must stop the enclosing statement list.
    pub fn is_return(&self) -> bool {
        matches!(self, ControlFlow::Return { .. })
    }
}
