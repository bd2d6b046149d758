//! Marker returned when no inverse can be determined.

use std::fmt;

use crate::errors::{ErrorInfo, InvError};
use crate::invertible::Invertible;
use crate::value::Value;

/// Signifies that the inverse of `original` is not defined.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NoInverse {
    original: Invertible,
}

impl NoInverse {
    /// Wraps the callable that has no known inverse.
    pub fn new(original: Invertible) -> Self {
        Self { original }
    }

    /// The callable whose inverse was requested.
    pub fn original(&self) -> &Invertible {
        &self.original
    }

    /// Consumes the marker, returning the callable it wraps.
    pub fn into_original(self) -> Invertible {
        self.original
    }

    /// The inverse of "the missing inverse of `f`" is `f` itself.
    pub fn inverse(&self) -> Invertible {
        self.original.clone()
    }

    /// Evaluating a missing inverse always fails.
    pub fn apply(&self, value: &Value) -> Result<Value, InvError> {
        Err(InvError::NoInverse(
            ErrorInfo::new(
                "inverse-undefined",
                format!("inverse of {} is not defined", self.original),
            )
            .with_context("function", self.original.to_string())
            .with_context("input_shape", value.shape_name()),
        ))
    }
}

impl fmt::Display for NoInverse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no inverse registered for {}", self.original)
    }
}

impl std::error::Error for NoInverse {}
