//! Variable declaration evaluation

use crate::ast::StmtVar;
use crate::console::Console;
use crate::{EvalError, Evaluator, Value};

use super::control::ControlFlow;
use super::{Evaluate, Execute};

impl Execute for StmtVar {
    /// Evaluate the initializer, then bind the name in the current scope.
    /// Without an initializer the variable holds `Void` until assigned.
    fn execute<C: Console>(&self, ev: &mut Evaluator<C>) -> Result<ControlFlow, EvalError> {
        let value = match &self.init {
            Some(init) => init.eval(ev)?,
            None => Value::Void,
        };

        ev.declare(self.name.as_str(), value);
        Ok(ControlFlow::Normal)
    }
}
