//! Return statement evaluation

use crate::ast::Expr;
use crate::console::Console;
use crate::{EvalError, Evaluator};

use super::control::ControlFlow;
use super::Evaluate;

/// Evaluate the returned expression and start unwinding to the caller.
pub fn eval_return<C: Console>(
    expr: &Expr,
    ev: &mut Evaluator<C>,
) -> Result<ControlFlow, EvalError> {
    let value = expr.eval(ev)?;
    Ok(ControlFlow::Return { value })
}
