//! Per-sample verification results.

use std::fmt;

use invfn_core::errors::{ErrorInfo, InvError};
use invfn_core::Value;
use serde::{Deserialize, Serialize};

/// The two laws every declared inverse must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Law {
    /// `inverse(f)(f(x)) ≈ x`.
    RoundTrip,
    /// `inverse(inverse(f))(x) ≈ f(x)`.
    Involution,
}

impl fmt::Display for Law {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Law::RoundTrip => f.write_str("round-trip"),
            Law::Involution => f.write_str("involution"),
        }
    }
}

/// Why a sample failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Failure {
    /// No inverse could be resolved for the function under test.
    NoInverse {
        /// Display form of the function.
        function: String,
    },
    /// The inverse resolved, but its own inverse did not.
    InvolutionUndefined {
        /// Display form of the resolved inverse.
        inverse: String,
    },
    /// A law was evaluated and the comparison rejected the result.
    Mismatch {
        /// The violated law.
        law: Law,
        /// Value produced.
        actual: Value,
        /// Value the law demands.
        expected: Value,
    },
    /// Evaluating one side of a law failed.
    EvaluationFailed {
        /// The law being evaluated.
        law: Law,
        /// The underlying error.
        error: InvError,
    },
}

impl Failure {
    /// Whether this failure reflects a missing rather than a wrong inverse.
    pub fn is_missing_inverse(&self) -> bool {
        matches!(
            self,
            Failure::NoInverse { .. } | Failure::InvolutionUndefined { .. }
        )
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::NoInverse { function } => write!(f, "no inverse registered for {function}"),
            Failure::InvolutionUndefined { inverse } => {
                write!(f, "no inverse registered for the inverse {inverse}")
            }
            Failure::Mismatch {
                law,
                actual,
                expected,
            } => write!(f, "{law} law violated: got {actual}, expected {expected}"),
            Failure::EvaluationFailed { law, error } => {
                write!(f, "{law} law could not be evaluated: {error}")
            }
        }
    }
}

/// Result of checking one sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleOutcome {
    /// Position of the sample in the input sequence.
    pub index: usize,
    /// The sample itself.
    pub input: Value,
    /// Every law violation found; empty when the sample passed.
    pub failures: Vec<Failure>,
}

impl SampleOutcome {
    /// Returns `true` when both laws held.
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Verification results for one function over all samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyReport {
    /// Display form of the function under test.
    pub function: String,
    /// Structural fingerprint of the function under test.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    /// One outcome per sample, in input order.
    pub outcomes: Vec<SampleOutcome>,
}

impl VerifyReport {
    /// Returns `true` when every sample passed.
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(SampleOutcome::passed)
    }

    /// Outcomes of the samples that failed.
    pub fn failures(&self) -> impl Iterator<Item = &SampleOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.passed())
    }

    /// Number of samples that passed.
    pub fn pass_count(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.passed()).count()
    }

    /// Multi-line human readable summary listing every failure.
    pub fn summary(&self) -> String {
        let mut out = format!(
            "{}: {}/{} samples passed",
            self.function,
            self.pass_count(),
            self.outcomes.len()
        );
        for outcome in self.failures() {
            for failure in &outcome.failures {
                out.push_str(&format!(
                    "\n  sample #{} ({}): {failure}",
                    outcome.index, outcome.input
                ));
            }
        }
        out
    }

    /// Serialises the report to pretty JSON.
    pub fn to_json(&self) -> Result<String, InvError> {
        serde_json::to_string_pretty(self)
            .map_err(|err| InvError::Serde(ErrorInfo::new("report-serialize", err.to_string())))
    }

    /// Restores a report from JSON.
    pub fn from_json(json: &str) -> Result<Self, InvError> {
        serde_json::from_str(json)
            .map_err(|err| InvError::Serde(ErrorInfo::new("report-deserialize", err.to_string())))
    }
}
