//! Error families raised while evaluating or building invertibles.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Diagnostic record carried by every [`InvError`].
///
/// `code` is stable and meant for matching; `message` and `hint` are prose.
/// Context entries are kept sorted so rendered errors are reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable kebab-case identifier such as `matrix-singular`.
    pub code: String,
    /// What went wrong.
    pub message: String,
    /// Offending function, shape, dimensions and similar details.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<String, String>,
    /// Suggested remedy, when one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Starts a record with no context and no hint.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Records `key = value`, replacing an earlier value for `key`.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Attaches a remedy.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Name of the callable that raised the error, if recorded.
    pub fn function(&self) -> Option<&str> {
        self.context.get("function").map(String::as_str)
    }
}

/// Canonical error type for invfn operations.
///
/// Absence of an inverse is not an error at resolution time (see
/// [`NoInverse`](crate::NoInverse)); the `NoInverse` family only appears when
/// something tries to *evaluate* a missing inverse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum InvError {
    /// An input lies outside the domain of a callable.
    #[error("domain error: {0}")]
    Domain(ErrorInfo),
    /// A composite or value violated its construction invariants.
    #[error("construction error: {0}")]
    Construction(ErrorInfo),
    /// A missing inverse was evaluated.
    #[error("no inverse: {0}")]
    NoInverse(ErrorInfo),
    /// Serialization and configuration errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        let mut entries = self.context.iter();
        if let Some((key, value)) = entries.next() {
            write!(f, " ({key}={value}")?;
            for (key, value) in entries {
                write!(f, ", {key}={value}")?;
            }
            f.write_str(")")?;
        }
        match &self.hint {
            Some(hint) => write!(f, "; hint: {hint}"),
            None => Ok(()),
        }
    }
}

impl InvError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            InvError::Domain(info)
            | InvError::Construction(info)
            | InvError::NoInverse(info)
            | InvError::Serde(info) => info,
        }
    }

    /// Shorthand for a domain error raised by the named callable.
    pub fn domain(function: &str, code: &str, message: impl Into<String>) -> Self {
        InvError::Domain(ErrorInfo::new(code, message).with_context("function", function))
    }

    pub(crate) fn serde(code: &str, err: serde_json::Error) -> Self {
        InvError::Serde(ErrorInfo::new(code, err.to_string()))
    }
}
