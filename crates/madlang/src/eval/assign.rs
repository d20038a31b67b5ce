//! Assignment statement evaluation

use crate::ast::StmtAssign;
use crate::console::Console;
use crate::{EvalError, Evaluator};

use super::control::ControlFlow;
use super::{Evaluate, Execute};

impl Execute for StmtAssign {
    /// Evaluate the right-hand side, then overwrite the nearest binding.
    ///
    /// # Errors
    ///
    /// `UnboundReference` if no enclosing scope declares the target.
    fn execute<C: Console>(&self, ev: &mut Evaluator<C>) -> Result<ControlFlow, EvalError> {
        let value = self.value.eval(ev)?;
        ev.assign(&self.name, value)?;
        Ok(ControlFlow::Normal)
    }
}
