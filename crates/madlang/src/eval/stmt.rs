//! Statement evaluation

use crate::ast::{Stmt, StmtBlock};
use crate::console::Console;
use crate::{EvalError, Evaluator};

use super::control::ControlFlow;
use super::function::declare_function;
use super::return_stmt::eval_return;
use super::{Evaluate, Execute};

impl Execute for Stmt {
    fn execute<C: Console>(&self, ev: &mut Evaluator<C>) -> Result<ControlFlow, EvalError> {
        match self {
            Stmt::Var(stmt) => stmt.execute(ev),
            Stmt::Assign(stmt) => stmt.execute(ev),

            // Expression statement: evaluate for side effects, discard the value
            Stmt::Expression(expr) => {
                expr.eval(ev)?;
                Ok(ControlFlow::Normal)
            }

            Stmt::Block(block) => block.execute(ev),
            Stmt::If(stmt) => stmt.execute(ev),
            Stmt::While(stmt) => stmt.execute(ev),
            Stmt::Function(decl) => declare_function(decl, ev),
            Stmt::Return(expr) => eval_return(expr, ev),
        }
    }
}

impl Execute for StmtBlock {
    /// Run the statements in a fresh child of the current scope.
    fn execute<C: Console>(&self, ev: &mut Evaluator<C>) -> Result<ControlFlow, EvalError> {
        let parent = ev.current_scope();
        let mut scope = ev.scope_guard(parent);
        execute_stmts(&self.stmts, &mut *scope)
    }
}

/// Execute statements in order in the current scope (without managing
/// scope), stopping at the first `return`.
///
/// # Errors
///
/// Returns the first error raised by any statement.
pub fn execute_stmts<C: Console>(
    stmts: &[Stmt],
    ev: &mut Evaluator<C>,
) -> Result<ControlFlow, EvalError> {
    for stmt in stmts {
        let flow = stmt.execute(ev)?;
        if flow.is_return() {
            return Ok(flow);
        }
    }

    Ok(ControlFlow::Normal)
}
