//! Comparison predicates used by the law checks.

use invfn_core::errors::{ErrorInfo, InvError};
use invfn_core::Value;
use serde::{Deserialize, Serialize};

/// Options forwarded to a [`Compare`] predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareOptions {
    /// Absolute tolerance.
    pub atol: f64,
    /// Relative tolerance; `None` selects `sqrt(eps)` when `atol` is zero and
    /// zero otherwise.
    pub rtol: Option<f64>,
    /// Whether NaN compares equal to NaN.
    pub nans: bool,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            atol: 0.0,
            rtol: None,
            nans: false,
        }
    }
}

impl CompareOptions {
    /// Options with an explicit absolute tolerance.
    pub fn with_atol(atol: f64) -> Self {
        Self {
            atol,
            ..Self::default()
        }
    }

    /// Options with an explicit relative tolerance.
    pub fn with_rtol(rtol: f64) -> Self {
        Self {
            rtol: Some(rtol),
            ..Self::default()
        }
    }

    /// Relative tolerance actually applied.
    pub fn effective_rtol(&self) -> f64 {
        match self.rtol {
            Some(rtol) => rtol,
            None if self.atol > 0.0 => 0.0,
            None => f64::EPSILON.sqrt(),
        }
    }

    /// Parses options from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, InvError> {
        serde_json::from_str(json).map_err(|err| {
            InvError::Serde(
                ErrorInfo::new("compare-options-deserialize", err.to_string())
                    .with_hint("expected fields: atol, rtol, nans"),
            )
        })
    }
}

/// A predicate deciding whether an actual value matches an expected one.
pub trait Compare {
    /// Returns `true` when `actual` is acceptably close to `expected`.
    fn compare(&self, actual: &Value, expected: &Value, options: &CompareOptions) -> bool;
}

impl<F> Compare for F
where
    F: Fn(&Value, &Value, &CompareOptions) -> bool,
{
    fn compare(&self, actual: &Value, expected: &Value, options: &CompareOptions) -> bool {
        self(actual, expected, options)
    }
}

/// Approximate equality in the style of `isapprox`.
///
/// Values must have identical shapes. Collections are compared by Euclidean
/// norm: `‖a - b‖ <= max(atol, rtol * max(‖a‖, ‖b‖))`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxEq;

impl Compare for ApproxEq {
    fn compare(&self, actual: &Value, expected: &Value, options: &CompareOptions) -> bool {
        if !same_shape(actual, expected) {
            return false;
        }
        let a = flatten(actual);
        let b = flatten(expected);
        if a == b {
            return true;
        }
        let mut diff = 0.0;
        let mut norm_a = 0.0;
        let mut norm_b = 0.0;
        for (x, y) in a.iter().zip(&b) {
            if x.is_nan() || y.is_nan() {
                if options.nans && x.is_nan() && y.is_nan() {
                    continue;
                }
                return false;
            }
            if x == y {
                norm_a += x * x;
                norm_b += y * y;
                continue;
            }
            if x.is_infinite() || y.is_infinite() {
                return false;
            }
            diff += (x - y) * (x - y);
            norm_a += x * x;
            norm_b += y * y;
        }
        let tolerance = options
            .atol
            .max(options.effective_rtol() * norm_a.sqrt().max(norm_b.sqrt()));
        diff.sqrt() <= tolerance
    }
}

/// Exact structural equality; options are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactEq;

impl Compare for ExactEq {
    fn compare(&self, actual: &Value, expected: &Value, _options: &CompareOptions) -> bool {
        actual == expected
    }
}

fn same_shape(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Scalar(_), Value::Scalar(_)) => true,
        (Value::List(xs), Value::List(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| same_shape(x, y))
        }
        (Value::Matrix(x), Value::Matrix(y)) => x.rows() == y.rows() && x.cols() == y.cols(),
        _ => false,
    }
}

fn flatten(value: &Value) -> Vec<f64> {
    let mut out = Vec::new();
    flatten_into(value, &mut out);
    out
}

fn flatten_into(value: &Value, out: &mut Vec<f64>) {
    match value {
        Value::Scalar(x) => out.push(*x),
        Value::List(items) => items.iter().for_each(|item| flatten_into(item, out)),
        Value::Matrix(matrix) => out.extend_from_slice(matrix.data()),
    }
}
