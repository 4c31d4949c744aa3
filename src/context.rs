use std::{collections::HashMap, error::Error, fmt, sync::Arc};

use crate::value::Value;

/// Failure reported by a host callable.
pub type CallFailure = Box<dyn Error + Send + Sync>;

/// A zero-argument host function producing a value.
pub type Callable = Arc<dyn Fn() -> Result<Value, CallFailure> + Send + Sync>;

/// What a name in the [`Context`] is bound to.
#[derive(Clone)]
pub enum Binding {
    /// A plain value, read by a bare name (`counter`)
    Value(Value),
    /// A function, invoked by call syntax (`get_name()`)
    Callable(Callable),
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Binding::Callable(_) => f.write_str("Callable(..)"),
        }
    }
}

/// Names available to an expression at evaluation time.
///
/// Built by the host before calling [`evaluate`](crate::evaluate); the
/// evaluator only reads it. Names are case-sensitive. Callables must be
/// `Send + Sync` so one context can serve evaluations on several threads.
///
/// # Examples
///
/// ```
/// use expression_parser::{evaluate, parse, Context, Value};
///
/// let mut context = Context::new();
/// context
///     .set("counter", 1)
///     .set_fn("get_name", || "fred");
///
/// let expr = parse("get_name() == 'fred' and counter > 0").unwrap();
/// assert_eq!(evaluate(&expr, &context).unwrap(), Value::Boolean(true));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context {
    bindings: HashMap<String, Binding>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to a value, replacing any earlier binding.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.bindings
            .insert(name.into(), Binding::Value(value.into()));
        self
    }

    /// Bind `name` to an infallible zero-argument function.
    pub fn set_fn<F, V>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn() -> V + Send + Sync + 'static,
        V: Into<Value>,
    {
        let callable: Callable = Arc::new(move || Ok(f().into()));
        self.bindings.insert(name.into(), Binding::Callable(callable));
        self
    }

    /// Bind `name` to a zero-argument function that may fail. A failure
    /// surfaces from evaluation as [`EvalError::CallError`](crate::EvalError::CallError).
    pub fn set_fallible_fn<F, V, E>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn() -> Result<V, E> + Send + Sync + 'static,
        V: Into<Value>,
        E: Into<CallFailure>,
    {
        let callable: Callable = Arc::new(move || f().map(Into::into).map_err(Into::into));
        self.bindings.insert(name.into(), Binding::Callable(callable));
        self
    }

    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Binding> {
        self.bindings.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
