//! Whole-program tests: top-level statements, `main`, and console I/O

use madlang::ast::{BinaryOp, Expr, Param, Program, Stmt, VarType};
use madlang::*;
use pretty_assertions::assert_eq;

fn run(program: &Program) -> (std::result::Result<Value, EvalError>, Vec<String>) {
    run_with_input(program, Vec::<String>::new())
}

fn run_with_input(
    program: &Program,
    input: Vec<impl Into<String>>,
) -> (std::result::Result<Value, EvalError>, Vec<String>) {
    let mut ev = Evaluator::with_console(BufferedConsole::with_input(input));
    let result = ev.run_program(program);
    (result, ev.into_console().take_output())
}

fn output(expr: Expr) -> Stmt {
    Stmt::expr(Expr::call("output", vec![expr]))
}

fn main_fn(body: Vec<Stmt>) -> Stmt {
    Stmt::function("main", vec![], Some(VarType::Int), body)
}

// ═══════════════════════════════════════════════════════════════════════
// Output
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_basic_output_from_main() {
    // fn main(): int { output(42); return 0; }
    let program = Program::new(vec![main_fn(vec![
        output(Expr::int(42)),
        Stmt::ret(Expr::int(0)),
    ])]);

    let (result, out) = run(&program);
    assert_eq!(result.unwrap(), Value::Integer(0));
    assert_eq!(out, vec!["42"]);
}

#[test]
fn test_global_variable_visible_in_main() {
    // x: int = 10; fn main(): int { output(x); return 0; }
    let program = Program::new(vec![
        Stmt::var("x", VarType::Int, Expr::int(10)),
        main_fn(vec![output(Expr::var("x")), Stmt::ret(Expr::int(0))]),
    ]);

    let (result, out) = run(&program);
    assert!(result.is_ok());
    assert_eq!(out, vec!["10"]);
}

#[test]
fn test_recursive_factorial_output() {
    let factorial = Stmt::function(
        "factorial",
        vec![Param::new("n", VarType::Int)],
        Some(VarType::Int),
        vec![Stmt::if_else(
            Expr::binary(Expr::var("n"), BinaryOp::Le, Expr::int(1)),
            Stmt::block(vec![Stmt::ret(Expr::int(1))]),
            Some(Stmt::block(vec![Stmt::ret(Expr::binary(
                Expr::var("n"),
                BinaryOp::Mul,
                Expr::call(
                    "factorial",
                    vec![Expr::binary(Expr::var("n"), BinaryOp::Sub, Expr::int(1))],
                ),
            ))])),
        )],
    );
    let program = Program::new(vec![
        factorial,
        main_fn(vec![
            output(Expr::call("factorial", vec![Expr::int(5)])),
            Stmt::ret(Expr::int(0)),
        ]),
    ]);

    let (result, out) = run(&program);
    assert!(result.is_ok());
    assert_eq!(out, vec!["120"]);
}

#[test]
fn test_while_loop_output() {
    // fn main(): int { x: int = 5; while (x > 0) { output(x); x = x - 1; } return 0; }
    let program = Program::new(vec![main_fn(vec![
        Stmt::var("x", VarType::Int, Expr::int(5)),
        Stmt::while_loop(
            Expr::binary(Expr::var("x"), BinaryOp::Gt, Expr::int(0)),
            Stmt::block(vec![
                output(Expr::var("x")),
                Stmt::assign(
                    "x",
                    Expr::binary(Expr::var("x"), BinaryOp::Sub, Expr::int(1)),
                ),
            ]),
        ),
        Stmt::ret(Expr::int(0)),
    ])]);

    let (result, out) = run(&program);
    assert!(result.is_ok());
    assert_eq!(out, vec!["5", "4", "3", "2", "1"]);
}

#[test]
fn test_output_rejects_boolean() {
    let program = Program::new(vec![main_fn(vec![output(Expr::bool(true))])]);
    let (result, out) = run(&program);
    assert!(matches!(result, Err(EvalError::TypeMismatch { .. })));
    assert!(out.is_empty());
}

#[test]
fn test_output_before_failure_is_kept() {
    let program = Program::new(vec![main_fn(vec![
        output(Expr::int(1)),
        output(Expr::binary(Expr::int(10), BinaryOp::Div, Expr::int(0))),
        output(Expr::int(2)),
    ])]);

    let (result, out) = run(&program);
    assert!(matches!(result, Err(EvalError::ArithmeticFault { op: "/" })));
    assert_eq!(out, vec!["1"]);
}

#[test]
fn test_division_by_zero_reports_error() {
    let program = Program::new(vec![main_fn(vec![
        output(Expr::binary(Expr::int(10), BinaryOp::Div, Expr::int(0))),
        Stmt::ret(Expr::int(0)),
    ])]);

    let (result, out) = run(&program);
    let err = result.unwrap_err();
    assert!(!err.is_defect());
    assert_eq!(err.to_string(), "arithmetic error: / by zero");
    assert!(out.is_empty());
}

// ═══════════════════════════════════════════════════════════════════════
// Input
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_input_doubles_value() {
    // fn main(): int { output(input() * 2); return 0; }
    let program = Program::new(vec![main_fn(vec![
        output(Expr::binary(
            Expr::call("input", vec![]),
            BinaryOp::Mul,
            Expr::int(2),
        )),
        Stmt::ret(Expr::int(0)),
    ])]);

    let (result, out) = run_with_input(&program, vec!["21"]);
    assert!(result.is_ok());
    assert_eq!(out, vec!["42"]);
}

#[test]
fn test_input_accepts_surrounding_whitespace() {
    let program = Program::new(vec![main_fn(vec![output(Expr::call("input", vec![]))])]);
    let (result, out) = run_with_input(&program, vec!["  -7 "]);
    assert!(result.is_ok());
    assert_eq!(out, vec!["-7"]);
}

#[test]
fn test_input_reads_successive_lines() {
    let program = Program::new(vec![main_fn(vec![output(Expr::binary(
        Expr::call("input", vec![]),
        BinaryOp::Sub,
        Expr::call("input", vec![]),
    ))])]);

    let (result, out) = run_with_input(&program, vec!["10", "3"]);
    assert!(result.is_ok());
    assert_eq!(out, vec!["7"]);
}

#[test]
fn test_input_at_end_of_stream() {
    let program = Program::new(vec![main_fn(vec![output(Expr::call("input", vec![]))])]);
    let (result, _) = run(&program);
    assert!(matches!(result, Err(EvalError::TypeMismatch { .. })));
}

#[test]
fn test_input_not_a_number() {
    let program = Program::new(vec![main_fn(vec![output(Expr::call("input", vec![]))])]);
    let (result, _) = run_with_input(&program, vec!["twelve"]);
    assert!(matches!(result, Err(EvalError::TypeMismatch { .. })));
}

// ═══════════════════════════════════════════════════════════════════════
// Program Structure
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_top_level_runs_before_main() {
    let program = Program::new(vec![
        main_fn(vec![output(Expr::int(2))]),
        output(Expr::int(1)),
    ]);

    let (result, out) = run(&program);
    assert_eq!(result.unwrap(), Value::Void);
    assert_eq!(out, vec!["1", "2"]);
}

#[test]
fn test_missing_main() {
    let program = Program::new(vec![output(Expr::int(1))]);
    let (result, out) = run(&program);
    match result {
        Err(EvalError::UnboundReference { name }) => assert_eq!(name, "main"),
        other => panic!("Expected UnboundReference, got {:?}", other),
    }
    assert_eq!(out, vec!["1"]);
}

#[test]
fn test_main_with_parameters_is_arity_error() {
    let program = Program::new(vec![Stmt::function(
        "main",
        vec![Param::new("argc", VarType::Int)],
        Some(VarType::Int),
        vec![Stmt::ret(Expr::int(0))],
    )]);
    let (result, _) = run(&program);
    assert!(matches!(result, Err(EvalError::TypeMismatch { .. })));
}

#[test]
fn test_main_state_visible_afterwards() {
    let program = Program::new(vec![
        Stmt::var("total", VarType::Int, Expr::int(0)),
        main_fn(vec![Stmt::assign("total", Expr::int(99))]),
    ]);

    let mut ev = Evaluator::with_console(BufferedConsole::new());
    ev.run_program(&program).unwrap();
    assert_eq!(ev.global_value("total"), Some(&Value::Integer(99)));
}

#[test]
fn test_top_level_return_is_defect() {
    let program = Program::new(vec![Stmt::ret(Expr::int(0)), main_fn(vec![])]);
    let (result, _) = run(&program);
    let err = result.unwrap_err();
    assert!(matches!(err, EvalError::UnexpectedReturn));
    assert!(err.is_defect());
}
