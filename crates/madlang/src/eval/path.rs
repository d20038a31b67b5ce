//! Variable reference evaluation

use crate::ast::ExprVariable;
use crate::console::Console;
use crate::{EvalError, Evaluator, Value};

use super::Evaluate;

impl Evaluate for ExprVariable {
    fn eval<C: Console>(&self, ev: &mut Evaluator<C>) -> Result<Value, EvalError> {
        ev.lookup(&self.name)
    }
}
