//! Function declaration evaluation

use std::rc::Rc;

use crate::ast::FunctionDecl;
use crate::console::Console;
use crate::{EvalError, Evaluator, FunctionValue, Value};

use super::control::ControlFlow;

/// Bind a function value in the current scope, capturing that scope as
/// its closure.
///
/// The captured scope outlives the enclosing block or call for as long as
/// the function value is reachable.
pub fn declare_function<C: Console>(
    decl: &Rc<FunctionDecl>,
    ev: &mut Evaluator<C>,
) -> Result<ControlFlow, EvalError> {
    let closure = ev.current_scope();
    let func = Rc::new(FunctionValue::new(Rc::clone(decl), closure));
    ev.environment_mut().capture(&func);

    ev.declare(decl.name.as_str(), Value::Function(func));
    Ok(ControlFlow::Normal)
}
