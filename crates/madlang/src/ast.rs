//! Abstract syntax tree consumed by the evaluator
//!
//! Madlang has no parser in this crate. A front end (or a test) builds these
//! nodes directly, or the CLI decodes them from JSON. Each node kind is its
//! own struct so the evaluator can implement `Evaluate` / `Execute` per node.
//!
//! Type annotations (`VarType`) are carried through but never checked; all
//! type errors surface at evaluation time.

use std::io::Read;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Declared type of a variable, parameter, or function result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarType {
    /// `int`
    Int,
    /// `bool`
    Bool,
}

/// A constant embedded in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Literal {
    /// Integer constant
    Integer(i64),
    /// Boolean constant
    Boolean(bool),
}

impl Literal {
    /// The runtime value of this literal.
    pub fn to_value(self) -> Value {
        match self {
            Literal::Integer(n) => Value::Integer(n),
            Literal::Boolean(b) => Value::Boolean(b),
        }
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    /// Arithmetic negation `-`
    Neg,
    /// Logical negation `!`
    Not,
}

impl UnaryOp {
    /// Source symbol, for diagnostics.
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
        }
    }
}

/// Infix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

impl BinaryOp {
    /// Source symbol, for diagnostics.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }

    /// True for `&&` and `||`, whose right operand is evaluated lazily.
    pub fn is_short_circuit(self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Expressions
// ═══════════════════════════════════════════════════════════════════════

/// An expression node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    /// Constant
    Literal(Literal),
    /// Variable reference
    Variable(ExprVariable),
    /// Prefix operation
    Unary(ExprUnary),
    /// Infix operation
    Binary(ExprBinary),
    /// Call of a named function
    Call(ExprCall),
}

/// A variable reference: `x`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExprVariable {
    pub name: String,
}

/// A prefix operation: `-x`, `!b`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExprUnary {
    pub op: UnaryOp,
    pub operand: Box<Expr>,
}

/// An infix operation: `a + b`, `p && q`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExprBinary {
    pub left: Box<Expr>,
    pub op: BinaryOp,
    pub right: Box<Expr>,
}

/// A call: `f(a, b)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExprCall {
    pub callee: String,
    #[serde(default)]
    pub args: Vec<Expr>,
}

impl Expr {
    /// Integer literal.
    pub fn int(n: i64) -> Self {
        Expr::Literal(Literal::Integer(n))
    }

    /// Boolean literal.
    pub fn bool(b: bool) -> Self {
        Expr::Literal(Literal::Boolean(b))
    }

    /// Variable reference.
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Variable(ExprVariable { name: name.into() })
    }

    /// Prefix operation.
    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary(ExprUnary {
            op,
            operand: Box::new(operand),
        })
    }

    /// Infix operation.
    pub fn binary(left: Expr, op: BinaryOp, right: Expr) -> Self {
        Expr::Binary(ExprBinary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    /// Call of a named function.
    pub fn call(callee: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call(ExprCall {
            callee: callee.into(),
            args,
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Statements
// ═══════════════════════════════════════════════════════════════════════

/// A statement node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stmt {
    /// `x: int = e;` or `x: int;`
    Var(StmtVar),
    /// `x = e;`
    Assign(StmtAssign),
    /// `e;`
    Expression(Expr),
    /// `{ ... }`
    Block(StmtBlock),
    /// `if (c) s else s`
    If(StmtIf),
    /// `while (c) s`
    While(StmtWhile),
    /// `fn name(params): ty { ... }`
    Function(Rc<FunctionDecl>),
    /// `return e;`
    Return(Expr),
}

/// Variable declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StmtVar {
    pub name: String,
    pub ty: VarType,
    #[serde(default)]
    pub init: Option<Expr>,
}

/// Assignment to an existing variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StmtAssign {
    pub name: String,
    pub value: Expr,
}

/// Braced statement list with its own scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StmtBlock {
    pub stmts: Vec<Stmt>,
}

/// Conditional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StmtIf {
    pub cond: Expr,
    pub then_branch: Box<Stmt>,
    #[serde(default)]
    pub else_branch: Option<Box<Stmt>>,
}

/// Pre-tested loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StmtWhile {
    pub cond: Expr,
    pub body: Box<Stmt>,
}

/// A function parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub ty: VarType,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: VarType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A function declaration. Shared (`Rc`) so every runtime function value
/// created from it points at the same body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub name: String,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub return_type: Option<VarType>,
    pub body: Vec<Stmt>,
}

impl Stmt {
    /// Variable declaration with an optional initializer.
    pub fn var(name: impl Into<String>, ty: VarType, init: impl Into<Option<Expr>>) -> Self {
        Stmt::Var(StmtVar {
            name: name.into(),
            ty,
            init: init.into(),
        })
    }

    /// Assignment.
    pub fn assign(name: impl Into<String>, value: Expr) -> Self {
        Stmt::Assign(StmtAssign {
            name: name.into(),
            value,
        })
    }

    /// Expression statement.
    pub fn expr(expr: Expr) -> Self {
        Stmt::Expression(expr)
    }

    /// Block.
    pub fn block(stmts: Vec<Stmt>) -> Self {
        Stmt::Block(StmtBlock { stmts })
    }

    /// `if` with an optional `else`.
    pub fn if_else(cond: Expr, then_branch: Stmt, else_branch: Option<Stmt>) -> Self {
        Stmt::If(StmtIf {
            cond,
            then_branch: Box::new(then_branch),
            else_branch: else_branch.map(Box::new),
        })
    }

    /// `while` loop.
    pub fn while_loop(cond: Expr, body: Stmt) -> Self {
        Stmt::While(StmtWhile {
            cond,
            body: Box::new(body),
        })
    }

    /// Function declaration.
    pub fn function(
        name: impl Into<String>,
        params: Vec<Param>,
        return_type: Option<VarType>,
        body: Vec<Stmt>,
    ) -> Self {
        Stmt::Function(Rc::new(FunctionDecl {
            name: name.into(),
            params,
            return_type,
            body,
        }))
    }

    /// `return` statement.
    pub fn ret(expr: Expr) -> Self {
        Stmt::Return(expr)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Programs
// ═══════════════════════════════════════════════════════════════════════

/// An ordered list of top-level statements: global variables and functions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Program {
    pub items: Vec<Stmt>,
}

impl Program {
    pub fn new(items: Vec<Stmt>) -> Self {
        Self { items }
    }

    /// Decode a program from its JSON form.
    pub fn from_json(src: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(src)
    }

    /// Decode a program from a JSON byte stream.
    pub fn from_reader(reader: impl Read) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }
}
