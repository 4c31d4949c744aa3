//! JSON <-> Value conversion utilities

use std::sync::LazyLock;

use regex::Regex;

use super::CliError;
use crate::{Context, Value};

static BINDING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*=(.*)$").expect("binding pattern is valid")
});

fn json_type_name(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Convert a scalar serde_json::Value to a Value. `name` is only used for the error.
pub fn json_to_value(name: &str, v: serde_json::Value) -> Result<Value, CliError> {
    match v {
        serde_json::Value::Bool(b) => Ok(Value::Boolean(b)),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Ok(Value::Integer(i)),
            None => n.as_f64().map(Value::Float).ok_or(CliError::UnsupportedValue {
                name: name.to_string(),
                found: "out-of-range number",
            }),
        },
        serde_json::Value::String(s) => Ok(Value::String(s)),
        other => Err(CliError::UnsupportedValue {
            name: name.to_string(),
            found: json_type_name(&other),
        }),
    }
}

/// Convert a Value to serde_json::Value
///
/// Non-finite floats have no JSON number form and are written as strings.
pub fn value_to_json(v: Value) -> serde_json::Value {
    match v {
        Value::Boolean(b) => serde_json::Value::Bool(b),
        Value::Integer(i) => serde_json::Value::Number(i.into()),
        Value::Float(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or_else(|| serde_json::Value::String(f.to_string())),
        Value::String(s) => serde_json::Value::String(s),
    }
}

/// Build a context from a JSON object of scalar values.
pub fn context_from_json(json: &str) -> Result<Context, CliError> {
    let serde_json::Value::Object(map) = serde_json::from_str::<serde_json::Value>(json)? else {
        return Err(CliError::ContextNotObject);
    };

    let mut context = Context::new();
    for (name, value) in map {
        let value = json_to_value(&name, value)?;
        context.set(name, value);
    }
    Ok(context)
}

/// Parse a `NAME=VALUE` argument.
///
/// VALUE is read as a JSON scalar when it is one (`15`, `2.5`, `true`,
/// `"quoted"`); anything else is taken as a plain string.
pub fn parse_binding(spec: &str) -> Result<(String, Value), CliError> {
    let captures = BINDING
        .captures(spec)
        .ok_or_else(|| CliError::InvalidBinding(spec.to_string()))?;
    let name = captures[1].to_string();
    let raw = captures[2].trim();

    let value = match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(json) => json_to_value(&name, json).unwrap_or_else(|_| Value::String(raw.to_string())),
        Err(_) => Value::String(raw.to_string()),
    };
    Ok((name, value))
}
