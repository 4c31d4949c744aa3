//! Rendering an [`Expr`] back to text.
//!
//! Two renderings are provided:
//!
//! - [`Expr::write`] produces source text that parses back into an equal tree.
//!   Parentheses appear only where precedence or left-associativity needs them.
//! - [`Expr::dump`] produces an indented outline of the tree, one node per line.
//!
//! # Examples
//!
//! ```
//! use expression_parser::{parse, StringFormat};
//!
//! let expr = parse("get_name()==\"fred\" and (1+2)*3>0").unwrap();
//! assert_eq!(expr.to_string(), "get_name() == 'fred' and (1 + 2) * 3 > 0");
//! assert_eq!(
//!     expr.write(StringFormat::EscapedDoubleQuote),
//!     "get_name() == \\\"fred\\\" and (1 + 2) * 3 > 0"
//! );
//! ```

use std::fmt;

use crate::{
    ast::{Expr, UnOp},
    value::Value,
};

/// Quoting style for string literals when writing an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StringFormat {
    /// `'text'`
    #[default]
    SingleQuote,
    /// `\'text\'`, for embedding in a single-quoted host string
    EscapedSingleQuote,
    /// `"text"`
    DoubleQuote,
    /// `\"text\"`, for embedding in a double-quoted host string
    EscapedDoubleQuote,
}

impl StringFormat {
    fn quote(self, s: &str) -> String {
        // No escapes exist in the language, so a string holding the chosen
        // quote character is written with the other one.
        let single = match self {
            StringFormat::SingleQuote | StringFormat::EscapedSingleQuote => !s.contains('\''),
            StringFormat::DoubleQuote | StringFormat::EscapedDoubleQuote => s.contains('"'),
        };
        let escaped = matches!(
            self,
            StringFormat::EscapedSingleQuote | StringFormat::EscapedDoubleQuote
        );

        match (single, escaped) {
            (true, false) => format!("'{}'", s),
            (true, true) => format!("\\'{}\\'", s),
            (false, false) => format!("\"{}\"", s),
            (false, true) => format!("\\\"{}\\\"", s),
        }
    }
}

/// Float text that always reads back as a float: `5.0`, never `5`.
pub(crate) fn write_float(n: f64) -> String {
    let text = n.to_string();
    if n.is_finite() && !text.contains('.') {
        format!("{}.0", text)
    } else {
        text
    }
}

impl Expr {
    /// Render the expression as source text using the given string quoting.
    pub fn write(&self, format: StringFormat) -> String {
        match self {
            Expr::Literal(Value::Boolean(b)) => b.to_string(),
            Expr::Literal(Value::Integer(n)) => n.to_string(),
            Expr::Literal(Value::Float(n)) => write_float(*n),
            Expr::Literal(Value::String(s)) => format.quote(s),
            Expr::Identifier(name) => name.clone(),
            Expr::Call(name) => format!("{}()", name),
            Expr::UnaryOp { op, operand } => {
                let mut inner = operand.write(format);
                if operand.precedence() < self.precedence() {
                    inner = format!("({})", inner);
                }
                match op {
                    UnOp::Not => format!("not {}", inner),
                    UnOp::Negate => format!("-{}", inner),
                }
            }
            Expr::BinaryOp { op, left, right } => {
                let precedence = op.precedence();

                let mut left_str = left.write(format);
                if left.precedence() < precedence {
                    left_str = format!("({})", left_str);
                }

                // Left-associative: an equal-precedence right child was grouped explicitly
                let mut right_str = right.write(format);
                if right.precedence() <= precedence {
                    right_str = format!("({})", right_str);
                }

                format!("{} {} {}", left_str, op.symbol(), right_str)
            }
        }
    }

    /// Render an indented outline of the tree, two spaces per level.
    ///
    /// ```text
    /// And
    ///   Equals
    ///     FunctionCall(get_name)
    ///     String(fred)
    ///   Variable(enabled)
    /// ```
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_into(&mut out, 0);
        out
    }

    fn dump_into(&self, out: &mut String, indent: usize) {
        out.push_str(&"  ".repeat(indent));
        match self {
            Expr::Literal(Value::Boolean(b)) => out.push_str(&format!("Boolean({})\n", b)),
            Expr::Literal(Value::Integer(n)) => out.push_str(&format!("Number({})\n", n)),
            Expr::Literal(Value::Float(n)) => {
                out.push_str(&format!("Number({})\n", write_float(*n)))
            }
            Expr::Literal(Value::String(s)) => out.push_str(&format!("String({})\n", s)),
            Expr::Identifier(name) => out.push_str(&format!("Variable({})\n", name)),
            Expr::Call(name) => out.push_str(&format!("FunctionCall({})\n", name)),
            Expr::UnaryOp { op, operand } => {
                out.push_str(op.label());
                out.push('\n');
                operand.dump_into(out, indent + 1);
            }
            Expr::BinaryOp { op, left, right } => {
                out.push_str(op.label());
                out.push('\n');
                left.dump_into(out, indent + 1);
                right.dump_into(out, indent + 1);
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.write(StringFormat::SingleQuote))
    }
}
