//! Tests for if, while, blocks, and return

use madlang::ast::{BinaryOp, Expr, Stmt, VarType};
use madlang::*;

fn evaluator() -> Evaluator<BufferedConsole> {
    Evaluator::with_console(BufferedConsole::new())
}

fn run(ev: &mut Evaluator<BufferedConsole>, stmts: Vec<Stmt>) -> std::result::Result<ControlFlow, EvalError> {
    execute_stmts(&stmts, ev)
}

fn output(expr: Expr) -> Stmt {
    Stmt::expr(Expr::call("output", vec![expr]))
}

fn decrement(name: &str) -> Stmt {
    Stmt::assign(
        name,
        Expr::binary(Expr::var(name), BinaryOp::Sub, Expr::int(1)),
    )
}

// ═══════════════════════════════════════════════════════════════════════
// If Statement Tests
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_if_true_branch() {
    let mut ev = evaluator();
    let stmt = Stmt::if_else(Expr::bool(true), output(Expr::int(1)), Some(output(Expr::int(2))));
    run(&mut ev, vec![stmt]).unwrap();
    assert_eq!(ev.console().output(), ["1"]);
}

#[test]
fn test_if_false_branch() {
    let mut ev = evaluator();
    let stmt = Stmt::if_else(Expr::bool(false), output(Expr::int(1)), Some(output(Expr::int(2))));
    run(&mut ev, vec![stmt]).unwrap();
    assert_eq!(ev.console().output(), ["2"]);
}

#[test]
fn test_if_without_else() {
    let mut ev = evaluator();
    let stmt = Stmt::if_else(Expr::bool(false), output(Expr::int(1)), None);
    assert_eq!(run(&mut ev, vec![stmt]).unwrap(), ControlFlow::Normal);
    assert!(ev.console().output().is_empty());
}

#[test]
fn test_if_non_bool_condition() {
    let mut ev = evaluator();
    let stmt = Stmt::if_else(Expr::int(42), output(Expr::int(1)), None);
    assert!(matches!(
        run(&mut ev, vec![stmt]),
        Err(EvalError::TypeMismatch { .. })
    ));
}

#[test]
fn test_if_else_if_chain() {
    let mut ev = evaluator();
    let stmt = Stmt::if_else(
        Expr::bool(false),
        output(Expr::int(1)),
        Some(Stmt::if_else(
            Expr::bool(true),
            output(Expr::int(2)),
            Some(output(Expr::int(3))),
        )),
    );
    run(&mut ev, vec![stmt]).unwrap();
    assert_eq!(ev.console().output(), ["2"]);
}

#[test]
fn test_if_branch_block_scope() {
    let mut ev = evaluator();
    let stmt = Stmt::if_else(
        Expr::bool(true),
        Stmt::block(vec![Stmt::var("inner", VarType::Int, Expr::int(1))]),
        None,
    );
    run(&mut ev, vec![stmt]).unwrap();
    assert!(ev.lookup("inner").is_err());
}

// ═══════════════════════════════════════════════════════════════════════
// While Loop Tests
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_while_countdown() {
    let mut ev = evaluator();
    let stmts = vec![
        Stmt::var("x", VarType::Int, Expr::int(5)),
        Stmt::while_loop(
            Expr::binary(Expr::var("x"), BinaryOp::Gt, Expr::int(0)),
            Stmt::block(vec![output(Expr::var("x")), decrement("x")]),
        ),
    ];
    run(&mut ev, stmts).unwrap();
    assert_eq!(ev.console().output(), ["5", "4", "3", "2", "1"]);
    assert_eq!(ev.lookup("x").unwrap(), Value::Integer(0));
}

#[test]
fn test_while_sum() {
    let mut ev = evaluator();
    let stmts = vec![
        Stmt::var("i", VarType::Int, Expr::int(0)),
        Stmt::var("sum", VarType::Int, Expr::int(0)),
        Stmt::while_loop(
            Expr::binary(Expr::var("i"), BinaryOp::Lt, Expr::int(10)),
            Stmt::block(vec![
                Stmt::assign(
                    "i",
                    Expr::binary(Expr::var("i"), BinaryOp::Add, Expr::int(1)),
                ),
                Stmt::assign(
                    "sum",
                    Expr::binary(Expr::var("sum"), BinaryOp::Add, Expr::var("i")),
                ),
            ]),
        ),
    ];
    run(&mut ev, stmts).unwrap();
    assert_eq!(ev.lookup("sum").unwrap(), Value::Integer(55));
}

#[test]
fn test_while_body_scope_is_fresh_each_iteration() {
    let mut ev = evaluator();
    let stmts = vec![
        Stmt::var("n", VarType::Int, Expr::int(3)),
        Stmt::while_loop(
            Expr::binary(Expr::var("n"), BinaryOp::Gt, Expr::int(0)),
            Stmt::block(vec![
                Stmt::var("seen", VarType::Int, Expr::var("n")),
                decrement("n"),
            ]),
        ),
    ];
    run(&mut ev, stmts).unwrap();
    assert!(ev.lookup("seen").is_err());
    assert_eq!(ev.environment().live_frames(), 1);
}

#[test]
fn test_while_non_bool_condition() {
    let mut ev = evaluator();
    let stmt = Stmt::while_loop(Expr::int(1), Stmt::block(vec![]));
    assert!(matches!(
        run(&mut ev, vec![stmt]),
        Err(EvalError::TypeMismatch { .. })
    ));
}

// ═══════════════════════════════════════════════════════════════════════
// Block Tests
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_block_shadowing_restores_outer() {
    let mut ev = evaluator();
    let stmts = vec![
        Stmt::var("x", VarType::Int, Expr::int(1)),
        Stmt::block(vec![
            Stmt::var("x", VarType::Int, Expr::int(2)),
            output(Expr::var("x")),
        ]),
        output(Expr::var("x")),
    ];
    run(&mut ev, stmts).unwrap();
    assert_eq!(ev.console().output(), ["2", "1"]);
}

#[test]
fn test_block_assignment_reaches_outer() {
    let mut ev = evaluator();
    let stmts = vec![
        Stmt::var("x", VarType::Int, Expr::int(1)),
        Stmt::block(vec![Stmt::assign("x", Expr::int(9))]),
    ];
    run(&mut ev, stmts).unwrap();
    assert_eq!(ev.lookup("x").unwrap(), Value::Integer(9));
}

#[test]
fn test_error_in_nested_blocks_restores_scope() {
    let mut ev = evaluator();
    let global = ev.global_scope();
    let stmts = vec![Stmt::block(vec![Stmt::block(vec![Stmt::expr(
        Expr::binary(Expr::int(1), BinaryOp::Div, Expr::int(0)),
    )])])];

    assert!(run(&mut ev, stmts).is_err());
    assert_eq!(ev.current_scope(), global);
    assert_eq!(ev.environment().live_frames(), 1);
}

// ═══════════════════════════════════════════════════════════════════════
// Return Tests
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_return_from_loop_body() {
    let mut ev = evaluator();
    let stmts = vec![
        Stmt::var("i", VarType::Int, Expr::int(0)),
        Stmt::while_loop(
            Expr::bool(true),
            Stmt::block(vec![
                Stmt::if_else(
                    Expr::binary(Expr::var("i"), BinaryOp::Eq, Expr::int(3)),
                    Stmt::ret(Expr::var("i")),
                    None,
                ),
                Stmt::assign(
                    "i",
                    Expr::binary(Expr::var("i"), BinaryOp::Add, Expr::int(1)),
                ),
            ]),
        ),
        output(Expr::int(99)),
    ];
    let flow = run(&mut ev, stmts).unwrap();
    assert_eq!(flow, ControlFlow::return_value(Value::Integer(3)));
    assert!(ev.console().output().is_empty());
}

#[test]
fn test_statements_after_return_are_skipped() {
    let mut ev = evaluator();
    let stmts = vec![
        output(Expr::int(1)),
        Stmt::ret(Expr::int(0)),
        output(Expr::int(2)),
    ];
    let flow = run(&mut ev, stmts).unwrap();
    assert!(flow.is_return());
    assert_eq!(ev.console().output(), ["1"]);
}
