//! Validate and reformat expressions

use super::CliError;
use crate::{StringFormat, parse};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The expression to validate
    pub expression: String,
    /// Return the tree outline instead of a plain confirmation
    pub dump: bool,
}

/// Result of a check operation
#[derive(Debug, PartialEq)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Syntax validation passed; the parsed tree's outline
    Tree(String),
}

/// Execute a check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let expr = parse(&options.expression)?;
    if options.dump {
        Ok(CheckResult::Tree(expr.dump()))
    } else {
        Ok(CheckResult::SyntaxValid)
    }
}

/// Parse an expression and write it back in normalized form
pub fn execute_fmt(expression: &str, format: StringFormat) -> Result<String, CliError> {
    Ok(parse(expression)?.write(format))
}
