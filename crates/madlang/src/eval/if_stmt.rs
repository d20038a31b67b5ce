//! If statement evaluation

use crate::ast::StmtIf;
use crate::console::Console;
use crate::{EvalError, Evaluator, Value};

use super::control::ControlFlow;
use super::{Evaluate, Execute};

impl Execute for StmtIf {
    fn execute<C: Console>(&self, ev: &mut Evaluator<C>) -> Result<ControlFlow, EvalError> {
        // Condition must be boolean
        let cond = match self.cond.eval(ev)? {
            Value::Boolean(b) => b,
            other => {
                return Err(EvalError::type_mismatch(format!(
                    "`if` condition must be Boolean, found {}",
                    other.type_name()
                )));
            }
        };

        if cond {
            self.then_branch.execute(ev)
        } else if let Some(else_branch) = &self.else_branch {
            else_branch.execute(ev)
        } else {
            // No else branch
            Ok(ControlFlow::Normal)
        }
    }
}
