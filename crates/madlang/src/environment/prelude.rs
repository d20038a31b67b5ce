//! Built-in functions pre-declared in the global scope

use super::Environment;
use crate::console::Console;
use crate::error::EvalError;
use crate::value::{BuiltinFn, Value};

impl Environment {
    /// Create an environment whose global scope holds the built-ins.
    pub fn with_prelude() -> Self {
        let mut env = Self::new();
        env.load_prelude();
        env
    }

    /// Declare `output` and `input` in the global scope.
    pub fn load_prelude(&mut self) {
        self.define_builtin(BuiltinFn {
            name: "output",
            arity: 1,
            func: builtin_output,
        });

        self.define_builtin(BuiltinFn {
            name: "input",
            arity: 0,
            func: builtin_input,
        });
    }

    /// Register a built-in function in the global scope.
    pub fn define_builtin(&mut self, builtin: BuiltinFn) {
        let global = self.global();
        self.declare(global, builtin.name, Value::Builtin(builtin));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Built-in Function Implementations
// ═══════════════════════════════════════════════════════════════════════

fn builtin_output(console: &mut dyn Console, args: &[Value]) -> Result<Value, EvalError> {
    match args {
        [arg] => {
            let n = arg.as_integer().ok_or_else(|| {
                EvalError::type_mismatch(format!(
                    "`output` expects an Integer, found {}",
                    arg.type_name()
                ))
            })?;
            console.write_line(&n.to_string())?;
            Ok(Value::Void)
        }
        _ => Err(EvalError::type_mismatch(format!(
            "`output` expects 1 argument, got {}",
            args.len()
        ))),
    }
}

fn builtin_input(console: &mut dyn Console, args: &[Value]) -> Result<Value, EvalError> {
    if !args.is_empty() {
        return Err(EvalError::type_mismatch(format!(
            "`input` expects 0 arguments, got {}",
            args.len()
        )));
    }

    // A failed read is treated like absent input
    let line = console.read_line().ok().flatten().ok_or_else(|| {
        EvalError::type_mismatch("`input` reached end of input")
    })?;

    line.trim()
        .parse::<i64>()
        .map(Value::Integer)
        .map_err(|_| EvalError::type_mismatch(format!("`input` read non-integer {:?}", line)))
}
