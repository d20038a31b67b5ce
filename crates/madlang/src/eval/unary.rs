//! Unary operation evaluation

use crate::ast::{ExprUnary, UnaryOp};
use crate::console::Console;
use crate::{EvalError, Evaluator, Value};

use super::Evaluate;

impl Evaluate for ExprUnary {
    fn eval<C: Console>(&self, ev: &mut Evaluator<C>) -> Result<Value, EvalError> {
        let operand = self.operand.eval(ev)?;
        apply_unary(self.op, operand)
    }
}

/// Apply a unary operator to an evaluated operand.
pub fn apply_unary(op: UnaryOp, operand: Value) -> Result<Value, EvalError> {
    match op {
        UnaryOp::Neg => eval_neg(operand),
        UnaryOp::Not => eval_not(operand),
    }
}

/// Evaluate arithmetic negation (`-x`). Wraps on `i64::MIN`.
fn eval_neg(operand: Value) -> Result<Value, EvalError> {
    match operand {
        Value::Integer(n) => Ok(Value::Integer(n.wrapping_neg())),
        other => Err(invalid_operand(UnaryOp::Neg, &other)),
    }
}

/// Evaluate logical negation (`!x`).
fn eval_not(operand: Value) -> Result<Value, EvalError> {
    match operand {
        Value::Boolean(b) => Ok(Value::Boolean(!b)),
        other => Err(invalid_operand(UnaryOp::Not, &other)),
    }
}

fn invalid_operand(op: UnaryOp, operand: &Value) -> EvalError {
    EvalError::type_mismatch(format!(
        "cannot apply `{}` to {}",
        op.symbol(),
        operand.type_name()
    ))
}
