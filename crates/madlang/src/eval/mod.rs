//! Expression and statement evaluation

pub mod assign;
pub mod binary;
pub mod call;
pub mod control;
pub mod function;
pub mod if_stmt;
pub mod local;
pub mod loops;
pub mod path;
pub mod return_stmt;
pub mod stmt;
pub mod unary;

use crate::ast::{Expr, Literal};
use crate::console::Console;
use crate::{EvalError, Evaluator, Value};

/// Trait for evaluating expression nodes to values.
///
/// This is the core abstraction for the tree-walking interpreter.
/// Each expression node type implements this trait.
pub trait Evaluate {
    /// Evaluate this node in the evaluator's current scope.
    fn eval<C: Console>(&self, ev: &mut Evaluator<C>) -> Result<Value, EvalError>;
}

/// Trait for executing statement nodes.
///
/// Statements produce no value; they report whether execution continues
/// normally or a `return` is unwinding toward the enclosing call.
pub trait Execute {
    /// Execute this node in the evaluator's current scope.
    fn execute<C: Console>(&self, ev: &mut Evaluator<C>) -> Result<ControlFlow, EvalError>;
}

// ═══════════════════════════════════════════════════════════════════════
// Main Expression Dispatcher
// ═══════════════════════════════════════════════════════════════════════

impl Evaluate for Expr {
    fn eval<C: Console>(&self, ev: &mut Evaluator<C>) -> Result<Value, EvalError> {
        match self {
            Expr::Literal(lit) => lit.eval(ev),
            Expr::Variable(expr) => expr.eval(ev),
            Expr::Unary(expr) => expr.eval(ev),
            Expr::Binary(expr) => expr.eval(ev),
            Expr::Call(expr) => expr.eval(ev),
        }
    }
}

impl Evaluate for Literal {
    fn eval<C: Console>(&self, _ev: &mut Evaluator<C>) -> Result<Value, EvalError> {
        Ok(self.to_value())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Convenience Functions
// ═══════════════════════════════════════════════════════════════════════

/// Evaluate an expression (convenience wrapper).
pub fn eval_expr<C: Console>(expr: &Expr, ev: &mut Evaluator<C>) -> Result<Value, EvalError> {
    expr.eval(ev)
}

// Re-export for use by other modules
pub use control::ControlFlow;
pub use stmt::execute_stmts;
