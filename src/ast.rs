//! # Abstract Syntax Tree
//!
//! This module defines the Abstract Syntax Tree (AST) of the expression
//! language: a single boolean/arithmetic expression over named variables and
//! zero-argument functions supplied by the host.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - Expression nodes (literals, names, calls, operations)
//! - **[operators]** - Unary and binary operators with their precedence
//! - **[writer]** - Rendering a tree back to source text or to an outline
//!
//! ## Quick Start
//!
//! ```text
//! get_name() == 'fred' and counter > 0 and 5 / 5.0 != 0
//! ```
//!
//! ## Precedence
//!
//! Lowest to highest, all binary operators left-associative:
//!
//! 1. `or` (`||`)
//! 2. `and` (`&&`)
//! 3. `==` (`=`), `!=`
//! 4. `<`, `<=`, `>`, `>=`
//! 5. `+`, `-`
//! 6. `*`, `/`
//! 7. unary `not` (`!`), unary `-`
//! 8. literals, names, calls `name()`, parenthesized expressions
//!
//! ## Names
//!
//! A bare name (`counter`) reads a value from the context; a name followed by
//! `()` (`get_name()`) invokes a context callable. Nothing is resolved at parse
//! time.
pub mod expressions;
pub mod operators;
pub mod tokens;
pub mod writer;

pub use expressions::Expr;
pub use operators::{BinOp, UnOp};
pub use tokens::{SpannedToken, Token};
pub use writer::StringFormat;
