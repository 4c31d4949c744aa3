use crate::{
    ast::{BinOp, UnOp},
    value::Value,
};

/// Abstract Syntax Tree node representing a parsed expression.
///
/// The tree is built bottom-up by the [`Parser`](crate::Parser) and never
/// mutated afterwards. Each node owns its children; names are kept as plain
/// strings and only resolved against a [`Context`](crate::Context) when the
/// tree is evaluated, so one tree can be evaluated against many contexts.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Constant fixed at parse time
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 5.0
    /// 'fred'
    /// true
    /// ```
    Literal(Value),

    /// Variable reference, looked up in the context
    ///
    /// # Example
    /// ```text
    /// counter
    /// ```
    Identifier(String),

    /// Zero-argument call, resolved against the context
    ///
    /// # Example
    /// ```text
    /// get_name()
    /// ```
    Call(String),

    /// Unary operation (`not x`, `-x`)
    UnaryOp { op: UnOp, operand: Box<Expr> },

    /// Binary operation (arithmetic, comparison, logical)
    BinaryOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn unary(op: UnOp, operand: Expr) -> Self {
        Expr::UnaryOp {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Binding strength of the node's outermost construct.
    pub fn precedence(&self) -> u8 {
        match self {
            Expr::Literal(_) | Expr::Identifier(_) | Expr::Call(_) => 8,
            Expr::UnaryOp { .. } => UnOp::PRECEDENCE,
            Expr::BinaryOp { op, .. } => op.precedence(),
        }
    }
}
