//! Evaluate expressions from the command line

use super::{CliError, context_from_json, parse_binding};
use crate::{Context, Evaluator, Value, parse};

/// Options for the eval command
#[derive(Debug, Clone, Default)]
pub struct EvalOptions {
    /// The expression to evaluate
    pub expression: String,
    /// JSON object of bindings
    pub context: Option<String>,
    /// `NAME=VALUE` bindings, applied after `context`
    pub bindings: Vec<String>,
    /// Collect the evaluation trace
    pub trace: bool,
}

/// Result of an eval operation
#[derive(Debug)]
pub struct EvalOutcome {
    pub value: Value,
    /// Evaluation steps, empty unless tracing was requested
    pub steps: Vec<String>,
}

/// Execute an eval operation
pub fn execute_eval(options: &EvalOptions) -> Result<EvalOutcome, CliError> {
    let expr = parse(&options.expression)?;

    let mut context = match &options.context {
        Some(json) => context_from_json(json)?,
        None => Context::new(),
    };
    for spec in &options.bindings {
        let (name, value) = parse_binding(spec)?;
        context.set(name, value);
    }

    let evaluator = Evaluator::new();
    let mut steps = Vec::new();
    let value = if options.trace {
        evaluator.evaluate_traced(&expr, &context, &mut steps)?
    } else {
        evaluator.evaluate(&expr, &context)?
    };

    Ok(EvalOutcome { value, steps })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_with_bindings() {
        let options = EvalOptions {
            expression: "C > 10 and not D".to_string(),
            context: Some(r#"{"C": 15}"#.to_string()),
            bindings: vec!["D=false".to_string()],
            trace: true,
        };
        let outcome = execute_eval(&options).unwrap();
        assert_eq!(outcome.value, Value::Boolean(true));
        assert!(outcome.steps.contains(&"Fetching variable: C -> 15".to_string()));
    }

    #[test]
    fn test_eval_reports_unknown_name() {
        let options = EvalOptions {
            expression: "C + 1".to_string(),
            ..Default::default()
        };
        let err = execute_eval(&options).unwrap_err();
        assert!(err.to_string().contains("Unknown name: 'C'"));
    }
}
