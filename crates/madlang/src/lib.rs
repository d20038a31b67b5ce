//! # Madlang
//!
//! A tree-walking evaluator for Madlang, a small statically-typed teaching
//! language with integers, booleans, block scoping, and first-class
//! closures.
//!
//! ## Architecture
//!
//! - **AST**: Program tree produced by an external front end (see [`ast`])
//! - **Environment**: Arena of lexical scopes with closure capture
//! - **Evaluator**: Walks the tree, tracks the current scope and call depth
//! - **Console**: Where the `input` and `output` built-ins read and write
//!
//! Programs run by executing their top-level statements in the global
//! scope and then calling the zero-argument function `main`.

#![warn(clippy::all)]

pub mod ast;
pub mod console;
pub mod context;
pub mod environment;
pub mod error;
pub mod eval;
pub mod evaluator;
pub mod stack;
pub mod value;

// Re-export main types
pub use console::{BufferedConsole, Console, StdConsole};
pub use context::EvalContext;
pub use environment::{Environment, ScopeId};
pub use error::{EvalError, Result};
pub use eval::{eval_expr, execute_stmts, ControlFlow, Evaluate, Execute};
pub use evaluator::{Evaluator, ScopeGuard};
pub use value::{BuiltinFn, BuiltinFnPtr, FunctionValue, Value};

/// Madlang version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
