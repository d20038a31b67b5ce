//! Binary operation evaluation

use crate::ast::{BinaryOp, Expr, ExprBinary};
use crate::console::Console;
use crate::{EvalError, Evaluator, Value};

use super::Evaluate;

impl Evaluate for ExprBinary {
    fn eval<C: Console>(&self, ev: &mut Evaluator<C>) -> Result<Value, EvalError> {
        // Short-circuit evaluation for && and ||
        if self.op.is_short_circuit() {
            return eval_logical(self.op, &self.left, &self.right, ev);
        }

        // Evaluate both operands, left first
        let left = self.left.eval(ev)?;
        let right = self.right.eval(ev)?;

        apply_binary(self.op, left, right)
    }
}

/// Apply a binary operator to two evaluated operands.
///
/// `&&` and `||` combine two already-evaluated Booleans; deciding whether
/// the right side is evaluated at all happens in `eval_logical`.
pub fn apply_binary(op: BinaryOp, left: Value, right: Value) -> Result<Value, EvalError> {
    match op {
        // Arithmetic
        BinaryOp::Add => integers(op, left, right).map(|(a, b)| Value::Integer(a.wrapping_add(b))),
        BinaryOp::Sub => integers(op, left, right).map(|(a, b)| Value::Integer(a.wrapping_sub(b))),
        BinaryOp::Mul => integers(op, left, right).map(|(a, b)| Value::Integer(a.wrapping_mul(b))),
        BinaryOp::Div => eval_div(left, right),
        BinaryOp::Mod => eval_rem(left, right),

        // Comparison
        BinaryOp::Lt => integers(op, left, right).map(|(a, b)| Value::Boolean(a < b)),
        BinaryOp::Le => integers(op, left, right).map(|(a, b)| Value::Boolean(a <= b)),
        BinaryOp::Gt => integers(op, left, right).map(|(a, b)| Value::Boolean(a > b)),
        BinaryOp::Ge => integers(op, left, right).map(|(a, b)| Value::Boolean(a >= b)),

        // Equality
        BinaryOp::Eq => eval_equal(op, left, right).map(Value::Boolean),
        BinaryOp::Ne => eval_equal(op, left, right).map(|eq| Value::Boolean(!eq)),

        // Logical, strict form
        BinaryOp::And => booleans(op, left, right).map(|(a, b)| Value::Boolean(a && b)),
        BinaryOp::Or => booleans(op, left, right).map(|(a, b)| Value::Boolean(a || b)),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Short-Circuit Logical Operators
// ═══════════════════════════════════════════════════════════════════════

/// Evaluate `&&` or `||`, skipping the right operand when the left one
/// already decides the result.
fn eval_logical<C: Console>(
    op: BinaryOp,
    left: &Expr,
    right: &Expr,
    ev: &mut Evaluator<C>,
) -> Result<Value, EvalError> {
    let lhs = left.eval(ev)?;
    let Some(decided) = lhs.as_boolean() else {
        return Err(non_boolean_operand(op, "left", &lhs));
    };

    match (op, decided) {
        (BinaryOp::And, false) => return Ok(Value::Boolean(false)), // Short-circuit
        (BinaryOp::Or, true) => return Ok(Value::Boolean(true)),    // Short-circuit
        _ => {}
    }

    let rhs = right.eval(ev)?;
    if rhs.as_boolean().is_none() {
        return Err(non_boolean_operand(op, "right", &rhs));
    }
    apply_binary(op, lhs, rhs)
}

fn non_boolean_operand(op: BinaryOp, side: &str, found: &Value) -> EvalError {
    EvalError::type_mismatch(format!(
        "{} operand of `{}` must be Boolean, found {}",
        side,
        op.symbol(),
        found.type_name()
    ))
}

// ═══════════════════════════════════════════════════════════════════════
// Arithmetic Operations
// ═══════════════════════════════════════════════════════════════════════

fn eval_div(left: Value, right: Value) -> Result<Value, EvalError> {
    let (a, b) = integers(BinaryOp::Div, left, right)?;
    if b == 0 {
        return Err(EvalError::ArithmeticFault { op: "/" });
    }
    Ok(Value::Integer(a.wrapping_div(b)))
}

fn eval_rem(left: Value, right: Value) -> Result<Value, EvalError> {
    let (a, b) = integers(BinaryOp::Mod, left, right)?;
    if b == 0 {
        return Err(EvalError::ArithmeticFault { op: "%" });
    }
    Ok(Value::Integer(a.wrapping_rem(b)))
}

// ═══════════════════════════════════════════════════════════════════════
// Operand Checks
// ═══════════════════════════════════════════════════════════════════════

fn integers(op: BinaryOp, left: Value, right: Value) -> Result<(i64, i64), EvalError> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok((a, b)),
        (left, right) => Err(invalid_operands(op, &left, &right)),
    }
}

fn booleans(op: BinaryOp, left: Value, right: Value) -> Result<(bool, bool), EvalError> {
    match (left, right) {
        (Value::Boolean(a), Value::Boolean(b)) => Ok((a, b)),
        (left, right) => Err(invalid_operands(op, &left, &right)),
    }
}

/// Equality is only defined between two values of the same data kind.
fn eval_equal(op: BinaryOp, left: Value, right: Value) -> Result<bool, EvalError> {
    match (&left, &right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(a == b),
        (Value::Boolean(a), Value::Boolean(b)) => Ok(a == b),
        _ => Err(invalid_operands(op, &left, &right)),
    }
}

fn invalid_operands(op: BinaryOp, left: &Value, right: &Value) -> EvalError {
    EvalError::type_mismatch(format!(
        "cannot apply `{}` to {} and {}",
        op.symbol(),
        left.type_name(),
        right.type_name()
    ))
}
