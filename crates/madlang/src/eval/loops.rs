//! While loop evaluation

use crate::ast::StmtWhile;
use crate::console::Console;
use crate::{EvalError, Evaluator, Value};

use super::control::ControlFlow;
use super::{Evaluate, Execute};

impl Execute for StmtWhile {
    fn execute<C: Console>(&self, ev: &mut Evaluator<C>) -> Result<ControlFlow, EvalError> {
        loop {
            // Check for interruption
            ev.check_interrupt()?;

            // Evaluate condition
            let cond = match self.cond.eval(ev)? {
                Value::Boolean(b) => b,
                other => {
                    return Err(EvalError::type_mismatch(format!(
                        "`while` condition must be Boolean, found {}",
                        other.type_name()
                    )));
                }
            };

            if !cond {
                return Ok(ControlFlow::Normal);
            }

            // A return inside the body leaves the loop and the function
            let flow = self.body.execute(ev)?;
            if flow.is_return() {
                return Ok(flow);
            }
        }
    }
}
