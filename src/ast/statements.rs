//! Target statement and expression trees
//!
//! The downstream contract of the back end: a closed, C#-flavored statement
//! tree built from the primitives the materializer and the region walker
//! emit. Serialization of the tree to real source text lives downstream; the
//! `Display` implementations here are a compact diagnostic rendering used in
//! logs and tests.

use crate::cil::TypeName;
use serde::Serialize;
use std::fmt;

/// Binary operators the semantics table can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
        }
    }
}

/// Unary operators the semantics table can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOp {
    /// Arithmetic negation
    Neg,
    /// Logical not
    Not,
    /// Bitwise complement
    BitNot,
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
            UnaryOp::BitNot => "~",
        }
    }
}

/// Literal constant values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Str(String),
    Null,
}

/// Target-language expressions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expression {
    /// Reference to a parameter, local, type or synthesized temporary
    Identifier(String),
    Literal(Literal),
    Binary {
        op: BinaryOp,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expression>,
    },
    Assignment {
        target: Box<Expression>,
        value: Box<Expression>,
    },
    /// Invocation of a callable expression (usually a `Member`)
    Invocation {
        target: Box<Expression>,
        args: Vec<Expression>,
    },
    Indexer {
        target: Box<Expression>,
        index: Box<Expression>,
    },
    /// Member read such as `array.Length` or `Type.Method`
    Member {
        target: Box<Expression>,
        name: String,
    },
    Cast {
        ty: TypeName,
        operand: Box<Expression>,
    },
    /// One-dimensional array creation sized by `length`
    ArrayCreation {
        element_type: TypeName,
        length: Box<Expression>,
    },
    /// Explicit parenthesization, preserving operator precedence decisions
    /// made by the upstream stack analyzer
    Parenthesized(Box<Expression>),
}

impl Expression {
    pub fn ident(name: impl Into<String>) -> Self {
        Expression::Identifier(name.into())
    }

    pub fn binary(lhs: Expression, op: BinaryOp, rhs: Expression) -> Self {
        Expression::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn unary(op: UnaryOp, operand: Expression) -> Self {
        Expression::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn member(target: Expression, name: impl Into<String>) -> Self {
        Expression::Member {
            target: Box::new(target),
            name: name.into(),
        }
    }

    pub fn paren(inner: Expression) -> Self {
        Expression::Parenthesized(Box::new(inner))
    }
}

/// Target-language statements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Statement {
    /// Jump-target marker for a region label
    Label(String),
    /// Nested scope
    Block(Vec<Statement>),
    /// Condition-less loop wrapper; exits are `break`/`goto` statements
    /// inside the body
    Loop(Vec<Statement>),
    /// Guarded control transfer; no else branch is ever synthesized
    If {
        condition: Expression,
        then: Box<Statement>,
    },
    /// Declaration with initializer; `ty` of `None` renders as `var`
    LocalDeclaration {
        ty: Option<TypeName>,
        name: String,
        init: Expression,
    },
    Expression(Expression),
    Return(Option<Expression>),
    Continue,
    Break,
    Goto(String),
    /// Non-executable comment: region boundaries, degraded placeholders
    Comment(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(v) => write!(f, "{}", v),
            Literal::Float(v) => write!(f, "{}", v),
            Literal::Str(s) => write!(f, "{:?}", s),
            Literal::Null => f.write_str("null"),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(name) => f.write_str(name),
            Expression::Literal(lit) => write!(f, "{}", lit),
            Expression::Binary { op, lhs, rhs } => {
                write!(f, "{} {} {}", lhs, op.symbol(), rhs)
            }
            Expression::Unary { op, operand } => write!(f, "{}{}", op.symbol(), operand),
            Expression::Assignment { target, value } => write!(f, "{} = {}", target, value),
            Expression::Invocation { target, args } => {
                write!(f, "{}(", target)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
            Expression::Indexer { target, index } => write!(f, "{}[{}]", target, index),
            Expression::Member { target, name } => write!(f, "{}.{}", target, name),
            Expression::Cast { ty, operand } => write!(f, "({}){}", ty, operand),
            Expression::ArrayCreation {
                element_type,
                length,
            } => write!(f, "new {}[{}]", element_type, length),
            Expression::Parenthesized(inner) => write!(f, "({})", inner),
        }
    }
}

impl Statement {
    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let pad = "    ".repeat(indent);
        match self {
            Statement::Label(label) => write!(f, "{}{}:", pad, label),
            Statement::Block(stmts) => {
                writeln!(f, "{}{{", pad)?;
                for stmt in stmts {
                    stmt.fmt_indented(f, indent + 1)?;
                    writeln!(f)?;
                }
                write!(f, "{}}}", pad)
            }
            Statement::Loop(stmts) => {
                writeln!(f, "{}while (true) {{", pad)?;
                for stmt in stmts {
                    stmt.fmt_indented(f, indent + 1)?;
                    writeln!(f)?;
                }
                write!(f, "{}}}", pad)
            }
            Statement::If { condition, then } => {
                write!(f, "{}if ({}) ", pad, condition)?;
                then.fmt_indented(f, 0)
            }
            Statement::LocalDeclaration { ty, name, init } => match ty {
                Some(ty) => write!(f, "{}{} {} = {};", pad, ty, name, init),
                None => write!(f, "{}var {} = {};", pad, name, init),
            },
            Statement::Expression(expr) => write!(f, "{}{};", pad, expr),
            Statement::Return(Some(expr)) => write!(f, "{}return {};", pad, expr),
            Statement::Return(None) => write!(f, "{}return;", pad),
            Statement::Continue => write!(f, "{}continue;", pad),
            Statement::Break => write!(f, "{}break;", pad),
            Statement::Goto(label) => write!(f, "{}goto {};", pad, label),
            Statement::Comment(text) => write!(f, "{}/* {} */", pad, text),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}
