//! Evaluator state and program driver
//!
//! An [`Evaluator`] owns the scope arena, the current-scope cursor, the
//! console used by built-ins, and the call-depth counter. The per-node
//! evaluation rules live in [`crate::eval`].

mod scope;

pub use scope::ScopeGuard;

use tracing::{debug, warn};

use crate::ast::{Expr, Program, Stmt};
use crate::console::{Console, StdConsole};
use crate::context::EvalContext;
use crate::environment::{Environment, ScopeId};
use crate::error::{EvalError, Result};
use crate::eval::{call, ControlFlow, Evaluate, Execute};
use crate::value::Value;

/// Tree-walking evaluator for Madlang programs.
///
/// # Example
///
/// ```
/// use madlang::ast::{Expr, Program, Stmt, VarType};
/// use madlang::{BufferedConsole, Evaluator};
///
/// let program = Program::new(vec![
///     Stmt::var("x", VarType::Int, Expr::int(10)),
///     Stmt::function(
///         "main",
///         vec![],
///         Some(VarType::Int),
///         vec![
///             Stmt::expr(Expr::call("output", vec![Expr::var("x")])),
///             Stmt::ret(Expr::int(0)),
///         ],
///     ),
/// ]);
///
/// let mut ev = Evaluator::with_console(BufferedConsole::new());
/// ev.run_program(&program).unwrap();
/// assert_eq!(ev.console().output(), ["10"]);
/// ```
pub struct Evaluator<C: Console = StdConsole> {
    env: Environment,
    current: ScopeId,
    console: C,
    ctx: EvalContext,
    call_depth: usize,
}

impl Evaluator<StdConsole> {
    /// Evaluator bound to the process's standard streams.
    pub fn new() -> Self {
        Self::with_console(StdConsole::new())
    }
}

impl Default for Evaluator<StdConsole> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Console> Evaluator<C> {
    /// Evaluator with the default context and the given console.
    pub fn with_console(console: C) -> Self {
        Self::with_context(console, EvalContext::default())
    }

    /// Evaluator with an explicit context.
    pub fn with_context(console: C, ctx: EvalContext) -> Self {
        let env = Environment::with_prelude();
        let current = env.global();
        Self {
            env,
            current,
            console,
            ctx,
            call_depth: 0,
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Accessors
    // ═══════════════════════════════════════════════════════════════════

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn global_scope(&self) -> ScopeId {
        self.env.global()
    }

    pub fn current_scope(&self) -> ScopeId {
        self.current
    }

    pub fn context(&self) -> &EvalContext {
        &self.ctx
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    pub fn into_console(self) -> C {
        self.console
    }

    /// Number of user function calls currently in progress.
    pub fn call_depth(&self) -> usize {
        self.call_depth
    }

    // ═══════════════════════════════════════════════════════════════════
    // Bindings in the current scope
    // ═══════════════════════════════════════════════════════════════════

    /// Declare `name` in the current scope.
    pub fn declare(&mut self, name: impl Into<String>, value: Value) {
        self.env.declare(self.current, name, value);
    }

    /// Assign through the chain starting at the current scope.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<()> {
        self.env.assign(self.current, name, value)
    }

    /// Resolve `name` starting at the current scope.
    pub fn lookup(&self, name: &str) -> Result<Value> {
        self.env.lookup(self.current, name).cloned()
    }

    /// Resolve `name` in the global scope only.
    pub fn global_value(&self, name: &str) -> Option<&Value> {
        // The global scope has no parent, so this never walks further
        self.env.get(self.env.global(), name)
    }

    /// Release scopes that no running block and no live function value
    /// can reach. Collection also runs on its own as captured scopes close.
    pub fn collect_garbage(&mut self) -> usize {
        self.env.collect_garbage()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Entry points
    // ═══════════════════════════════════════════════════════════════════

    /// Evaluate an expression in the current scope.
    pub fn eval_expr(&mut self, expr: &Expr) -> Result<Value> {
        expr.eval(self)
    }

    /// Execute one statement in the current scope.
    pub fn execute(&mut self, stmt: &Stmt) -> Result<ControlFlow> {
        stmt.execute(self)
    }

    /// Call the function bound to `name` with already-evaluated arguments.
    pub fn call_function(&mut self, name: &str, args: Vec<Value>) -> Result<Value> {
        let callee = self.lookup(name)?;
        call::call_value(self, name, callee, args)
    }

    /// Run a whole program: execute the top-level statements, then call
    /// the zero-argument `main` from the global scope.
    ///
    /// # Errors
    ///
    /// - `UnboundReference` if `main` is missing or not a function
    /// - `UnexpectedReturn` if a top-level statement produced a return
    /// - any failure raised while running `main`
    pub fn run_program(&mut self, program: &Program) -> Result<Value> {
        debug!(items = program.items.len(), "running program");

        for item in &program.items {
            if let ControlFlow::Return { .. } = self.execute(item)? {
                warn!("return signal reached the top level");
                return Err(EvalError::UnexpectedReturn);
            }
        }

        let main = self
            .global_value("main")
            .filter(|value| value.is_callable())
            .cloned()
            .ok_or_else(|| EvalError::unbound("main"))?;

        let result = call::call_value(self, "main", main, Vec::new())?;
        debug!(%result, "main finished");
        Ok(result)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Call bookkeeping
    // ═══════════════════════════════════════════════════════════════════

    /// Fail if the interrupt flag has been raised.
    pub(crate) fn check_interrupt(&self) -> Result<()> {
        if self.ctx.is_interrupted() {
            return Err(EvalError::Interrupted);
        }
        Ok(())
    }

    /// Enter a function call. Returns error if max depth exceeded.
    pub(crate) fn enter_call(&mut self) -> Result<()> {
        self.check_interrupt()?;
        if self.call_depth >= self.ctx.max_call_depth {
            return Err(EvalError::StackOverflow {
                depth: self.call_depth,
                max: self.ctx.max_call_depth,
            });
        }
        self.call_depth += 1;
        Ok(())
    }

    /// Exit a function call.
    pub(crate) fn exit_call(&mut self) {
        self.call_depth = self.call_depth.saturating_sub(1);
    }

    pub(crate) fn console_dyn(&mut self) -> &mut dyn Console {
        &mut self.console
    }

    pub(crate) fn environment_mut(&mut self) -> &mut Environment {
        &mut self.env
    }
}
