//! Error types for Madlang evaluation

use thiserror::Error;

/// Errors raised while evaluating a Madlang program.
///
/// The first three variants are the language-level failures. Every one of
/// them aborts the whole evaluation and unwinds to the driver; the language
/// has no construct for catching them.
#[derive(Error, Debug)]
pub enum EvalError {
    /// An operator, built-in, or call received a value of the wrong kind,
    /// or the wrong number of arguments.
    #[error("type mismatch: {message}")]
    TypeMismatch {
        /// What was expected and what was found
        message: String,
    },

    /// A name was read, assigned, or called without being declared in any
    /// enclosing scope, or the callee is not a function.
    #[error("unbound reference: `{name}`")]
    UnboundReference {
        /// The unresolved name
        name: String,
    },

    /// Division or modulo by zero.
    #[error("arithmetic error: {op} by zero")]
    ArithmeticFault {
        /// The faulting operator symbol (`/` or `%`)
        op: &'static str,
    },

    /// The call depth limit was reached.
    #[error("resource exhausted: call depth reached the limit of {max} nested calls")]
    StackOverflow {
        /// Calls already in progress when the next one was refused
        depth: usize,
        /// Configured maximum
        max: usize,
    },

    /// Evaluation was cancelled through the context's interrupt flag.
    #[error("evaluation interrupted")]
    Interrupted,

    /// A `return` escaped every function call and reached the driver.
    #[error("unexpected return")]
    UnexpectedReturn,

    /// Writing to or reading from the console failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl EvalError {
    /// Build a `TypeMismatch` from anything displayable.
    pub fn type_mismatch(message: impl Into<String>) -> Self {
        EvalError::TypeMismatch {
            message: message.into(),
        }
    }

    /// Build an `UnboundReference` for `name`.
    pub fn unbound(name: impl Into<String>) -> Self {
        EvalError::UnboundReference { name: name.into() }
    }

    /// True for conditions that indicate a defect in the evaluator rather
    /// than an error in the evaluated program.
    pub fn is_defect(&self) -> bool {
        matches!(self, EvalError::UnexpectedReturn)
    }
}

/// Result type alias for Madlang evaluation.
pub type Result<T> = std::result::Result<T, EvalError>;
