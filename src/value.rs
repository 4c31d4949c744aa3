use std::fmt;

use crate::ast::writer::write_float;

/// A dynamically-typed value produced by evaluating an expression.
///
/// The set of kinds is closed: every consumer matches on all four variants,
/// and combinations the language does not define surface as a type error
/// during evaluation rather than as a silent conversion.
///
/// # Examples
///
/// ```
/// use expression_parser::Value;
///
/// let flag = Value::Boolean(true);
/// let count = Value::from(42);
/// let ratio = Value::from(0.5);
/// let name = Value::from("fred");
///
/// assert_eq!(count, Value::Integer(42));
/// assert_eq!(name.type_name(), "string");
/// assert_eq!(ratio.to_string(), "0.5");
/// assert!(flag.as_bool().unwrap());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Boolean (`true`/`false`)
    Boolean(bool),

    /// 64-bit signed integer
    Integer(i64),

    /// Double-precision floating-point number
    Float(f64),

    /// UTF-8 string
    String(String),
}

impl Value {
    /// Human-readable name of the value's kind, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
        }
    }

    /// Coerce to a boolean for the logical operators.
    ///
    /// Numbers are true when non-zero. Strings have no boolean reading and
    /// return `None`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            Value::Integer(n) => Some(*n != 0),
            Value::Float(n) => Some(*n != 0.0),
            Value::String(_) => None,
        }
    }

    /// Get as float, promoting integers
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(n) => write!(f, "{}", n),
            // Keeps the decimal point so 1.0 is not mistaken for an integer
            Value::Float(n) => f.write_str(&write_float(*n)),
            Value::String(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}
