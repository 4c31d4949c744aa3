//! CLI support for the expression language
//!
//! Provides programmatic access to the `exprs` command-line operations so
//! they can be embedded in other tools or tested without spawning a process.

mod check;
mod convert;
mod eval;

pub use check::{CheckOptions, CheckResult, execute_check, execute_fmt};
pub use convert::{context_from_json, json_to_value, parse_binding, value_to_json};
pub use eval::{EvalOptions, EvalOutcome, execute_eval};

use std::io;

use crate::{EvalError, SyntaxError};

/// Errors that can occur during CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Lexer or parser error
    #[error("Syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    /// Evaluation error
    #[error("Evaluation error: {0}")]
    Eval(#[from] EvalError),

    /// JSON parsing or printing error
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No expression provided
    #[error("No expression provided. Pass it as an argument or pipe it to stdin.")]
    NoInput,

    /// A `--var` argument not of the form NAME=VALUE
    #[error("Invalid binding '{0}': expected NAME=VALUE")]
    InvalidBinding(String),

    /// `--context` was valid JSON but not an object
    #[error("Context must be a JSON object of names to values")]
    ContextNotObject,

    /// A context value the language has no type for
    #[error("Unsupported value for '{name}': {found} (expected boolean, number, or string)")]
    UnsupportedValue { name: String, found: &'static str },
}
