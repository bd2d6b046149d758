//! The closed set of invertible shapes and their evaluation.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, InvError};
use crate::function::{expect_scalar, Function};
use crate::value::Value;

/// Any function-like value taking part in inverse dispatch.
///
/// Composite shapes are recognised by pattern matching; only the
/// [`Invertible::Function`] leaf is ever looked up in a registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Invertible {
    /// An opaque callable, dispatched by its identifier.
    Function(Function),
    /// Sequential application of two or more stages.
    Composed(Composed),
    /// Element-wise (broadcast) application of a single inner callable.
    Mapped(Mapped),
    /// A forward callable explicitly bound to a caller-chosen inverse.
    Override(OverridePair),
}

/// Ordered chain of stages; the leftmost stage is outermost and runs last.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Composed {
    stages: Arc<[Invertible]>,
}

impl Composed {
    /// Builds a chain, rejecting fewer than two stages.
    pub fn new(stages: Vec<Invertible>) -> Result<Self, InvError> {
        if stages.len() < 2 {
            return Err(InvError::Construction(
                ErrorInfo::new(
                    "composition-too-short",
                    "a composition needs at least two stages",
                )
                .with_context("stages", stages.len().to_string())
                .with_hint("use the single callable directly instead of composing it"),
            ));
        }
        Ok(Self {
            stages: stages.into(),
        })
    }

    /// Builds a chain whose length the caller already guarantees.
    pub(crate) fn from_checked(stages: Vec<Invertible>) -> Self {
        debug_assert!(stages.len() >= 2);
        Self {
            stages: stages.into(),
        }
    }

    /// Stages in outermost-first order.
    pub fn stages(&self) -> &[Invertible] {
        &self.stages
    }

    fn apply(&self, value: &Value) -> Result<Value, InvError> {
        let mut stages = self.stages.iter().rev();
        // Construction guarantees at least two stages.
        let mut current = match stages.next() {
            Some(first) => first.apply(value)?,
            None => value.clone(),
        };
        for stage in stages {
            current = stage.apply(&current)?;
        }
        Ok(current)
    }
}

/// Broadcast wrapper around exactly one inner callable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mapped {
    inner: Arc<Invertible>,
}

impl Mapped {
    /// Wraps `inner` for element-wise application.
    pub fn new(inner: Invertible) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    /// The callable applied to each element.
    pub fn inner(&self) -> &Invertible {
        &self.inner
    }

    fn apply(&self, value: &Value) -> Result<Value, InvError> {
        match value {
            Value::List(items) => items
                .iter()
                .map(|item| self.inner.apply(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            Value::Matrix(matrix) => {
                let label = self.inner.to_string();
                matrix
                    .try_map(|entry| {
                        let out = self.inner.apply(&Value::Scalar(entry))?;
                        expect_scalar(&label, &out)
                    })
                    .map(Value::Matrix)
            }
            // A scalar broadcasts as a zero-dimensional collection.
            Value::Scalar(_) => self.inner.apply(value),
        }
    }
}

/// A forward callable paired with an explicitly declared inverse.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OverridePair {
    forward: Arc<Invertible>,
    backward: Arc<Invertible>,
}

impl OverridePair {
    /// Binds `forward` and `backward` as mutual inverses.
    pub fn new(forward: Invertible, backward: Invertible) -> Self {
        Self {
            forward: Arc::new(forward),
            backward: Arc::new(backward),
        }
    }

    /// The callable this pair behaves as.
    pub fn forward(&self) -> &Invertible {
        &self.forward
    }

    /// The declared inverse.
    pub fn backward(&self) -> &Invertible {
        &self.backward
    }

    /// Returns the pair with its roles exchanged, sharing both constituents.
    pub fn swapped(&self) -> Self {
        Self {
            forward: Arc::clone(&self.backward),
            backward: Arc::clone(&self.forward),
        }
    }

    /// Returns `true` when both constituents are the very same allocations.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.forward, &other.forward) && Arc::ptr_eq(&self.backward, &other.backward)
    }
}

impl Invertible {
    /// Evaluates the callable.
    pub fn apply(&self, value: &Value) -> Result<Value, InvError> {
        match self {
            Invertible::Function(function) => function.call(value),
            Invertible::Composed(composed) => composed.apply(value),
            Invertible::Mapped(mapped) => mapped.apply(value),
            Invertible::Override(pair) => pair.forward.apply(value),
        }
    }

    /// Returns `self ∘ inner`: `inner` runs first.
    pub fn after(self, inner: impl Into<Invertible>) -> Invertible {
        compose2(self, inner)
    }

    /// Returns the serialisable structural descriptor.
    pub fn shape(&self) -> Shape {
        match self {
            Invertible::Function(function) => Shape::Function {
                name: function.name().to_owned(),
            },
            Invertible::Composed(composed) => Shape::Composed {
                stages: composed.stages.iter().map(Invertible::shape).collect(),
            },
            Invertible::Mapped(mapped) => Shape::Mapped {
                inner: Box::new(mapped.inner.shape()),
            },
            Invertible::Override(pair) => Shape::Override {
                forward: Box::new(pair.forward.shape()),
                backward: Box::new(pair.backward.shape()),
            },
        }
    }
}

/// Structural descriptor of an [`Invertible`], free of closures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    /// Opaque callable.
    Function {
        /// Dispatch name.
        name: String,
    },
    /// Composition chain, outermost first.
    Composed {
        /// Stage descriptors.
        stages: Vec<Shape>,
    },
    /// Broadcast wrapper.
    Mapped {
        /// Inner descriptor.
        inner: Box<Shape>,
    },
    /// Explicit inverse binding.
    Override {
        /// Forward descriptor.
        forward: Box<Shape>,
        /// Inverse descriptor.
        backward: Box<Shape>,
    },
}

/// Composes `stages` (outermost first) into a chain of at least two.
pub fn compose(stages: impl IntoIterator<Item = Invertible>) -> Result<Invertible, InvError> {
    Composed::new(stages.into_iter().collect()).map(Invertible::Composed)
}

/// Binary composition `outer ∘ inner`.
pub fn compose2(outer: impl Into<Invertible>, inner: impl Into<Invertible>) -> Invertible {
    Invertible::Composed(Composed::from_checked(vec![outer.into(), inner.into()]))
}

/// Wraps `f` for element-wise application.
pub fn map(f: impl Into<Invertible>) -> Invertible {
    Invertible::Mapped(Mapped::new(f.into()))
}

/// Returns a callable that behaves as `forward` and resolves to `backward`.
pub fn set_inverse(forward: impl Into<Invertible>, backward: impl Into<Invertible>) -> Invertible {
    Invertible::Override(OverridePair::new(forward.into(), backward.into()))
}

impl From<Function> for Invertible {
    fn from(function: Function) -> Self {
        Invertible::Function(function)
    }
}

impl From<&Function> for Invertible {
    fn from(function: &Function) -> Self {
        Invertible::Function(function.clone())
    }
}

impl From<Composed> for Invertible {
    fn from(composed: Composed) -> Self {
        Invertible::Composed(composed)
    }
}

impl From<Mapped> for Invertible {
    fn from(mapped: Mapped) -> Self {
        Invertible::Mapped(mapped)
    }
}

impl From<OverridePair> for Invertible {
    fn from(pair: OverridePair) -> Self {
        Invertible::Override(pair)
    }
}

impl fmt::Display for Invertible {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Invertible::Function(function) => write!(f, "{function}"),
            Invertible::Composed(composed) => {
                for (idx, stage) in composed.stages.iter().enumerate() {
                    if idx > 0 {
                        write!(f, " ∘ ")?;
                    }
                    match stage {
                        Invertible::Composed(_) => write!(f, "({stage})")?,
                        _ => write!(f, "{stage}")?,
                    }
                }
                Ok(())
            }
            Invertible::Mapped(mapped) => write!(f, "map({})", mapped.inner),
            Invertible::Override(pair) => {
                write!(f, "set_inverse({}, {})", pair.forward, pair.backward)
            }
        }
    }
}
