//! Function call evaluation

use tracing::debug;

use crate::ast::ExprCall;
use crate::console::Console;
use crate::eval::control::ControlFlow;
use crate::stack::ensure_sufficient_stack;
use crate::{BuiltinFn, EvalError, Evaluator, FunctionValue, Value};

use super::stmt::execute_stmts;
use super::Evaluate;

impl Evaluate for ExprCall {
    fn eval<C: Console>(&self, ev: &mut Evaluator<C>) -> Result<Value, EvalError> {
        // Resolve the callee before touching the arguments
        let callee = ev.lookup(&self.callee)?;
        if !callee.is_callable() {
            return Err(EvalError::unbound(&self.callee));
        }

        // Arguments are evaluated left to right in the caller's scope
        let args: Vec<Value> = self
            .args
            .iter()
            .map(|arg| arg.eval(ev))
            .collect::<Result<Vec<_>, _>>()?;

        call_value(ev, &self.callee, callee, args)
    }
}

/// Call a Value as a function.
///
/// `name` is only used for diagnostics.
///
/// # Errors
///
/// Returns `UnboundReference` if the value is not callable.
/// Returns `TypeMismatch` if the argument count doesn't match.
pub fn call_value<C: Console>(
    ev: &mut Evaluator<C>,
    name: &str,
    callee: Value,
    args: Vec<Value>,
) -> Result<Value, EvalError> {
    match callee {
        Value::Function(func) => call_function(ev, &func, args),
        Value::Builtin(builtin) => call_builtin(ev, &builtin, args),
        _ => Err(EvalError::unbound(name)),
    }
}

/// Call a user-defined function.
fn call_function<C: Console>(
    ev: &mut Evaluator<C>,
    func: &FunctionValue,
    args: Vec<Value>,
) -> Result<Value, EvalError> {
    // Check arity
    if args.len() != func.arity() {
        return Err(arity_mismatch(func.name(), func.arity(), args.len()));
    }

    // Track call depth (stack overflow protection)
    ev.enter_call()?;
    debug!(function = func.name(), depth = ev.call_depth(), "call");

    let result = ensure_sufficient_stack(|| invoke(ev, func, args));

    ev.exit_call();
    result
}

/// Run the body in a fresh frame parented to the closure, not the caller.
fn invoke<C: Console>(
    ev: &mut Evaluator<C>,
    func: &FunctionValue,
    args: Vec<Value>,
) -> Result<Value, EvalError> {
    let mut frame = ev.scope_guard(func.closure);

    // Bind parameters to arguments
    for (param, arg) in func.param_names().zip(args) {
        frame.declare(param, arg);
    }

    // Handle return control flow
    match execute_stmts(&func.decl.body, &mut *frame)? {
        ControlFlow::Return { value } => Ok(value),
        ControlFlow::Normal => Ok(Value::Void),
    }
}

/// Call a built-in function.
fn call_builtin<C: Console>(
    ev: &mut Evaluator<C>,
    builtin: &BuiltinFn,
    args: Vec<Value>,
) -> Result<Value, EvalError> {
    if args.len() != builtin.arity {
        return Err(arity_mismatch(builtin.name, builtin.arity, args.len()));
    }

    (builtin.func)(ev.console_dyn(), &args)
}

fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::type_mismatch(format!(
        "`{}` expects {} argument(s), got {}",
        name, expected, got
    ))
}
