//! A small embeddable expression language.
//!
//! Source text is parsed once into an immutable [`Expr`] tree, which can then
//! be evaluated any number of times against a host-supplied [`Context`] of
//! named values and zero-argument functions.
//!
//! ```
//! use expression_parser::{evaluate, parse, Context, Value};
//!
//! let expr = parse("get_name()=='fred' and counter>0 and 5/5.0!=0").unwrap();
//!
//! let mut context = Context::new();
//! context.set_fn("get_name", || "fred").set("counter", 1);
//!
//! assert_eq!(evaluate(&expr, &context).unwrap(), Value::Boolean(true));
//! ```
pub mod ast;
pub mod cli;
pub mod context;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod value;

pub use ast::{BinOp, Expr, SpannedToken, StringFormat, Token, UnOp};
pub use context::{Binding, CallFailure, Callable, Context};
pub use evaluator::{EvalError, EvalErrorKind, Evaluator};
pub use lexer::{LexError, Lexer, Position, tokenize};
pub use parser::{ParseError, Parser, SyntaxError};
pub use value::Value;

/// Parses source text into an expression tree.
///
/// Fails with [`SyntaxError::Lex`] on characters the language does not
/// recognize and [`SyntaxError::Parse`] on malformed structure, including
/// empty input and trailing tokens.
pub fn parse(source: &str) -> Result<Expr, SyntaxError> {
    Parser::new(Lexer::new(source))?.parse()
}

/// Evaluates a parsed expression against a context.
pub fn evaluate(expr: &Expr, context: &Context) -> Result<Value, EvalError> {
    Evaluator::new().evaluate(expr, context)
}
