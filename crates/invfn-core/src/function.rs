//! Opaque named callables, the leaves of every invertible.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, InvError};
use crate::value::Value;

type ApplyFn = dyn Fn(&Value) -> Result<Value, InvError> + Send + Sync;

/// Dispatch key of an opaque callable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FunctionId(Arc<str>);

impl FunctionId {
    /// Creates an identifier from a name.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// Returns the name backing the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FunctionId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A named callable.
///
/// Two functions are the same function exactly when their identifiers match;
/// the closure itself never participates in equality or hashing.
#[derive(Clone)]
pub struct Function {
    id: FunctionId,
    apply: Arc<ApplyFn>,
}

impl Function {
    /// Wraps an arbitrary closure under the given name.
    pub fn new<F>(name: impl AsRef<str>, apply: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, InvError> + Send + Sync + 'static,
    {
        Self {
            id: FunctionId::new(name),
            apply: Arc::new(apply),
        }
    }

    /// Wraps a scalar function; any other input shape is a domain error.
    pub fn scalar<F>(name: impl AsRef<str>, f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self::scalar_in(name, |_| true, f)
    }

    /// Wraps a scalar function restricted to inputs accepted by `domain`.
    pub fn scalar_in<D, F>(name: impl AsRef<str>, domain: D, f: F) -> Self
    where
        D: Fn(f64) -> bool + Send + Sync + 'static,
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        let id = FunctionId::new(name);
        let label = id.clone();
        Self {
            id,
            apply: Arc::new(move |value: &Value| {
                let x = expect_scalar(label.as_str(), value)?;
                if !domain(x) {
                    return Err(InvError::domain(
                        label.as_str(),
                        "outside-domain",
                        format!("{x} is outside the domain of {label}"),
                    ));
                }
                Ok(Value::Scalar(f(x)))
            }),
        }
    }

    /// Returns the dispatch key.
    pub fn id(&self) -> &FunctionId {
        &self.id
    }

    /// Returns the function's name.
    pub fn name(&self) -> &str {
        self.id.as_str()
    }

    /// Evaluates the function.
    pub fn call(&self, value: &Value) -> Result<Value, InvError> {
        (self.apply)(value)
    }
}

/// Extracts a scalar or reports a domain error naming `function`.
pub fn expect_scalar(function: &str, value: &Value) -> Result<f64, InvError> {
    value.as_scalar().ok_or_else(|| {
        InvError::Domain(
            ErrorInfo::new("expected-scalar", "function accepts scalars only")
                .with_context("function", function)
                .with_context("shape", value.shape_name()),
        )
    })
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Function {}

impl Hash for Function {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Function").field(&self.id.as_str()).finish()
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
