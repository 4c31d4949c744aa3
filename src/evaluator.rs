use std::{error::Error, sync::Arc};

use crate::{
    ast::{BinOp, Expr, UnOp},
    context::{Binding, Context},
    value::Value,
};

/// Errors that can occur during evaluation.
///
/// Messages carry the written form of the node that failed.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EvalError {
    /// Name not bound in the context
    #[error("Unknown name: '{0}' is not defined")]
    UnknownName(String),

    /// Call syntax used on a name bound to a value
    #[error("Not callable: '{0}' is bound to a value, use it without '()'")]
    NotCallable(String),

    /// Bare name used for a callable
    #[error("Not a value: '{0}' is a function, call it as '{0}()'")]
    NotAValue(String),

    /// Operator applied to operands it does not support
    #[error("Type error: {0}")]
    TypeError(String),

    /// Integer division by zero
    #[error("Division by zero in `{0}`")]
    DivisionByZero(String),

    /// Integer result outside the 64-bit range
    #[error("Integer overflow in `{0}`")]
    Overflow(String),

    /// A host callable reported a failure
    #[error("Call to '{name}()' failed: {source}")]
    CallError {
        name: String,
        source: Arc<dyn Error + Send + Sync>,
    },
}

/// Discriminant of [`EvalError`], for hosts that branch on the kind of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalErrorKind {
    UnknownName,
    NotCallable,
    NotAValue,
    TypeError,
    DivisionByZero,
    Overflow,
    CallError,
}

impl EvalError {
    pub fn kind(&self) -> EvalErrorKind {
        match self {
            EvalError::UnknownName(_) => EvalErrorKind::UnknownName,
            EvalError::NotCallable(_) => EvalErrorKind::NotCallable,
            EvalError::NotAValue(_) => EvalErrorKind::NotAValue,
            EvalError::TypeError(_) => EvalErrorKind::TypeError,
            EvalError::DivisionByZero(_) => EvalErrorKind::DivisionByZero,
            EvalError::Overflow(_) => EvalErrorKind::Overflow,
            EvalError::CallError { .. } => EvalErrorKind::CallError,
        }
    }
}

/// Collects evaluation steps for [`Evaluator::evaluate_traced`] and mirrors them to the log.
struct Trace<'a> {
    steps: Option<&'a mut Vec<String>>,
}

impl Trace<'_> {
    fn record(&mut self, step: impl FnOnce() -> String) {
        if self.steps.is_none() && !log::log_enabled!(log::Level::Trace) {
            return;
        }
        let line = step();
        log::trace!("{}", line);
        if let Some(steps) = self.steps.as_deref_mut() {
            steps.push(line);
        }
    }
}

/// Tree-walking evaluator.
///
/// Holds no state between calls: the same tree evaluated twice against the
/// same context gives the same result, and one evaluator may serve any
/// number of trees and contexts.
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluates an expression against a context.
    ///
    /// # Examples
    ///
    /// ```
    /// use expression_parser::{parse, Context, Evaluator, Value};
    ///
    /// let mut context = Context::new();
    /// context.set("C", 15);
    ///
    /// let expr = parse("C * 2 + 0.5").unwrap();
    /// let result = Evaluator::new().evaluate(&expr, &context).unwrap();
    /// assert_eq!(result, Value::Float(30.5));
    /// ```
    pub fn evaluate(&self, expr: &Expr, context: &Context) -> Result<Value, EvalError> {
        self.eval_expr(expr, context, &mut Trace { steps: None })
    }

    /// Evaluates an expression, appending a line to `steps` for every node visited.
    ///
    /// Steps recorded before a failure are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use expression_parser::{parse, Context, Evaluator};
    ///
    /// let expr = parse("1 + 2").unwrap();
    /// let mut steps = Vec::new();
    /// Evaluator::new()
    ///     .evaluate_traced(&expr, &Context::new(), &mut steps)
    ///     .unwrap();
    /// assert_eq!(steps, ["Number: 1", "Number: 2", "Evaluated: 1 + 2 = 3"]);
    /// ```
    pub fn evaluate_traced(
        &self,
        expr: &Expr,
        context: &Context,
        steps: &mut Vec<String>,
    ) -> Result<Value, EvalError> {
        self.eval_expr(expr, context, &mut Trace { steps: Some(steps) })
    }

    fn eval_expr(
        &self,
        expr: &Expr,
        context: &Context,
        trace: &mut Trace<'_>,
    ) -> Result<Value, EvalError> {
        match expr {
            Expr::Literal(value) => {
                trace.record(|| match value {
                    Value::Boolean(b) => format!("Boolean: {}", b),
                    Value::Integer(_) | Value::Float(_) => format!("Number: {}", value),
                    Value::String(s) => format!("String: {}", s),
                });
                Ok(value.clone())
            }
            Expr::Identifier(name) => match context.lookup(name) {
                Some(Binding::Value(value)) => {
                    trace.record(|| format!("Fetching variable: {} -> {}", name, value));
                    Ok(value.clone())
                }
                Some(Binding::Callable(_)) => Err(EvalError::NotAValue(name.clone())),
                None => Err(EvalError::UnknownName(name.clone())),
            },
            Expr::Call(name) => match context.lookup(name) {
                Some(Binding::Callable(function)) => {
                    let value = function().map_err(|e| EvalError::CallError {
                        name: name.clone(),
                        source: Arc::from(e),
                    })?;
                    trace.record(|| format!("Calling function: {}() = {}", name, value));
                    Ok(value)
                }
                Some(Binding::Value(_)) => Err(EvalError::NotCallable(name.clone())),
                None => Err(EvalError::UnknownName(name.clone())),
            },
            Expr::UnaryOp { op, operand } => {
                let value = self.eval_expr(operand, context, trace)?;
                let result = self.apply_unop(*op, &value, expr)?;
                trace.record(|| format!("Evaluated: {} {} = {}", op.symbol(), value, result));
                Ok(result)
            }
            Expr::BinaryOp { op, left, right } => match op {
                BinOp::And | BinOp::Or => self.eval_logical(*op, left, right, expr, context, trace),
                _ => {
                    let left_val = self.eval_expr(left, context, trace)?;
                    let right_val = self.eval_expr(right, context, trace)?;
                    let result = self.apply_binop(*op, &left_val, &right_val, expr)?;
                    trace.record(|| {
                        format!(
                            "Evaluated: {} {} {} = {}",
                            left_val,
                            op.symbol(),
                            right_val,
                            result
                        )
                    });
                    Ok(result)
                }
            },
        }
    }

    /// `and`/`or` with short-circuit: the right operand is only evaluated
    /// when the left one does not decide the result.
    fn eval_logical(
        &self,
        op: BinOp,
        left: &Expr,
        right: &Expr,
        expr: &Expr,
        context: &Context,
        trace: &mut Trace<'_>,
    ) -> Result<Value, EvalError> {
        let left_val = self.eval_expr(left, context, trace)?;
        let left_bool = self.to_bool(&left_val, expr)?;

        let decided = match op {
            BinOp::And => !left_bool,
            _ => left_bool,
        };
        if decided {
            trace.record(|| {
                format!(
                    "Short-circuit: {} {} ... = {}",
                    left_val,
                    op.symbol(),
                    left_bool
                )
            });
            return Ok(Value::Boolean(left_bool));
        }

        let right_val = self.eval_expr(right, context, trace)?;
        let result = self.apply_binop(op, &left_val, &right_val, expr)?;
        trace.record(|| {
            format!(
                "Evaluated: {} {} {} = {}",
                left_val,
                op.symbol(),
                right_val,
                result
            )
        });
        Ok(result)
    }

    fn to_bool(&self, value: &Value, expr: &Expr) -> Result<bool, EvalError> {
        value.as_bool().ok_or_else(|| {
            EvalError::TypeError(format!(
                "expected a boolean, found {} '{}' in `{}`",
                value.type_name(),
                value,
                expr
            ))
        })
    }

    fn apply_unop(&self, op: UnOp, value: &Value, expr: &Expr) -> Result<Value, EvalError> {
        match op {
            UnOp::Not => Ok(Value::Boolean(!self.to_bool(value, expr)?)),
            UnOp::Negate => match value {
                Value::Integer(n) => n
                    .checked_neg()
                    .map(Value::Integer)
                    .ok_or_else(|| EvalError::Overflow(expr.to_string())),
                Value::Float(n) => Ok(Value::Float(-n)),
                v => Err(EvalError::TypeError(format!(
                    "cannot negate {} in `{}`",
                    v.type_name(),
                    expr
                ))),
            },
        }
    }

    fn apply_binop(
        &self,
        op: BinOp,
        left: &Value,
        right: &Value,
        expr: &Expr,
    ) -> Result<Value, EvalError> {
        match op {
            BinOp::Equal => Ok(Value::Boolean(self.equals(left, right, expr)?)),
            BinOp::NotEqual => Ok(Value::Boolean(!self.equals(left, right, expr)?)),
            BinOp::LessThan | BinOp::LessEqual | BinOp::GreaterThan | BinOp::GreaterEqual => {
                self.compare(op, left, right, expr).map(Value::Boolean)
            }
            BinOp::Add | BinOp::Subtract | BinOp::Multiply | BinOp::Divide => {
                self.arithmetic(op, left, right, expr)
            }
            // Both sides already evaluated; short-circuiting happens in eval_logical
            BinOp::And => Ok(Value::Boolean(
                self.to_bool(left, expr)? && self.to_bool(right, expr)?,
            )),
            BinOp::Or => Ok(Value::Boolean(
                self.to_bool(left, expr)? || self.to_bool(right, expr)?,
            )),
        }
    }

    fn equals(&self, left: &Value, right: &Value, expr: &Expr) -> Result<bool, EvalError> {
        match (left, right) {
            (Value::Integer(a), Value::Integer(b)) => Ok(a == b),
            (Value::Boolean(a), Value::Boolean(b)) => Ok(a == b),
            (Value::String(a), Value::String(b)) => Ok(a == b),
            _ => match (left.as_float(), right.as_float()) {
                (Some(a), Some(b)) => Ok(a == b),
                _ => Err(EvalError::TypeError(format!(
                    "cannot compare {} with {} in `{}`",
                    left.type_name(),
                    right.type_name(),
                    expr
                ))),
            },
        }
    }

    fn compare(
        &self,
        op: BinOp,
        left: &Value,
        right: &Value,
        expr: &Expr,
    ) -> Result<bool, EvalError> {
        fn ordered<T: PartialOrd>(op: BinOp, a: T, b: T) -> bool {
            match op {
                BinOp::LessThan => a < b,
                BinOp::LessEqual => a <= b,
                BinOp::GreaterThan => a > b,
                _ => a >= b,
            }
        }

        match (left, right) {
            (Value::Integer(a), Value::Integer(b)) => Ok(ordered(op, a, b)),
            _ => match (left.as_float(), right.as_float()) {
                (Some(a), Some(b)) => Ok(ordered(op, a, b)),
                _ => Err(EvalError::TypeError(format!(
                    "cannot compare {} {} {} (comparison requires numeric types) in `{}`",
                    left.type_name(),
                    op.symbol(),
                    right.type_name(),
                    expr
                ))),
            },
        }
    }

    fn arithmetic(
        &self,
        op: BinOp,
        left: &Value,
        right: &Value,
        expr: &Expr,
    ) -> Result<Value, EvalError> {
        match (left, right) {
            (Value::Integer(a), Value::Integer(b)) => {
                let result = match op {
                    BinOp::Add => a.checked_add(*b),
                    BinOp::Subtract => a.checked_sub(*b),
                    BinOp::Multiply => a.checked_mul(*b),
                    _ if *b == 0 => return Err(EvalError::DivisionByZero(expr.to_string())),
                    // Truncates toward zero
                    _ => a.checked_div(*b),
                };
                result
                    .map(Value::Integer)
                    .ok_or_else(|| EvalError::Overflow(expr.to_string()))
            }
            _ => match (left.as_float(), right.as_float()) {
                // IEEE semantics: dividing by 0.0 gives an infinity or NaN
                (Some(a), Some(b)) => Ok(Value::Float(match op {
                    BinOp::Add => a + b,
                    BinOp::Subtract => a - b,
                    BinOp::Multiply => a * b,
                    _ => a / b,
                })),
                _ => Err(EvalError::TypeError(format!(
                    "cannot apply {} to {} and {} in `{}`",
                    op.symbol(),
                    left.type_name(),
                    right.type_name(),
                    expr
                ))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn test_error_kinds() {
        let context = Context::new();
        let err = Evaluator::new()
            .evaluate(&parse("missing").unwrap(), &context)
            .unwrap_err();
        assert_eq!(err.kind(), EvalErrorKind::UnknownName);
        assert_eq!(err.to_string(), "Unknown name: 'missing' is not defined");
    }

    #[test]
    fn test_error_names_failing_node() {
        let err = Evaluator::new()
            .evaluate(&parse("2 * (1 / 0)").unwrap(), &Context::new())
            .unwrap_err();
        assert_eq!(err.to_string(), "Division by zero in `1 / 0`");
    }
}
