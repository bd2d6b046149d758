//! Dynamically shaped values passed through invertible callables.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, InvError};

/// Dense real matrix stored in row-major order.
///
/// Deserialisation goes through [`Matrix::new`], so a decoded matrix upholds
/// the same dimension invariants as a constructed one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix")]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

#[derive(Deserialize)]
struct RawMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl TryFrom<RawMatrix> for Matrix {
    type Error = InvError;

    fn try_from(raw: RawMatrix) -> Result<Self, Self::Error> {
        Matrix::new(raw.rows, raw.cols, raw.data)
    }
}

impl Matrix {
    /// Creates a matrix from row-major data.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, InvError> {
        if rows == 0 || cols == 0 {
            return Err(InvError::Construction(
                ErrorInfo::new("matrix-empty", "matrix dimensions must be non-zero")
                    .with_context("rows", rows.to_string())
                    .with_context("cols", cols.to_string()),
            ));
        }
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(InvError::Construction(
                ErrorInfo::new("matrix-shape", "data length does not match dimensions")
                    .with_context("rows", rows.to_string())
                    .with_context("cols", cols.to_string())
                    .with_context("len", data.len().to_string()),
            ));
        }
        Ok(Self { rows, cols, data })
    }

    /// Builds a matrix from a list of equally long rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, InvError> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if rows.iter().any(|row| row.len() != cols) {
            return Err(InvError::Construction(ErrorInfo::new(
                "matrix-ragged",
                "all rows must have the same length",
            )));
        }
        Self::new(rows.len(), cols, rows.concat())
    }

    /// Returns the `n x n` identity matrix.
    pub fn identity(n: usize) -> Result<Self, InvError> {
        let len = n.checked_mul(n).ok_or_else(|| {
            InvError::Construction(
                ErrorInfo::new("matrix-shape", "identity dimension overflows")
                    .with_context("rows", n.to_string())
                    .with_context("cols", n.to_string()),
            )
        })?;
        let mut data = vec![0.0; len];
        for i in 0..n {
            data[i * n + i] = 1.0;
        }
        Self::new(n, n, data)
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row-major backing storage.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Returns the entry at `(row, col)` if it is in bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// Returns `true` when the matrix has as many rows as columns.
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Returns the transposed matrix.
    pub fn transpose(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for col in 0..self.cols {
            for row in 0..self.rows {
                data.push(self.data[row * self.cols + col]);
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }

    /// Applies `f` to every entry, preserving the shape.
    pub fn try_map<F>(&self, mut f: F) -> Result<Self, InvError>
    where
        F: FnMut(f64) -> Result<f64, InvError>,
    {
        let data = self
            .data
            .iter()
            .map(|value| f(*value))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }
}

/// A value flowing through an invertible callable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// A real scalar.
    Scalar(f64),
    /// An ordered collection; the unit mapped application iterates over.
    List(Vec<Value>),
    /// A dense real matrix.
    Matrix(Matrix),
}

impl Value {
    /// Builds a list of scalars.
    pub fn scalars(values: impl IntoIterator<Item = f64>) -> Self {
        Value::List(values.into_iter().map(Value::Scalar).collect())
    }

    /// Returns the scalar payload, if any.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Value::Scalar(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the list payload, if any.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(values) => Some(values),
            _ => None,
        }
    }

    /// Returns the matrix payload, if any.
    pub fn as_matrix(&self) -> Option<&Matrix> {
        match self {
            Value::Matrix(matrix) => Some(matrix),
            _ => None,
        }
    }

    /// Short name of the value's shape, used in diagnostics.
    pub fn shape_name(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::List(_) => "list",
            Value::Matrix(_) => "matrix",
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Scalar(value)
    }
}

impl From<Matrix> for Value {
    fn from(matrix: Matrix) -> Self {
        Value::Matrix(matrix)
    }
}

impl From<Vec<f64>> for Value {
    fn from(values: Vec<f64>) -> Self {
        Value::scalars(values)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(value) => write!(f, "{value}"),
            Value::List(values) => {
                write!(f, "[")?;
                for (idx, value) in values.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, "]")
            }
            Value::Matrix(matrix) => {
                write!(f, "[")?;
                for row in 0..matrix.rows {
                    if row > 0 {
                        write!(f, "; ")?;
                    }
                    let start = row * matrix.cols;
                    for (idx, value) in matrix.data[start..start + matrix.cols].iter().enumerate() {
                        if idx > 0 {
                            write!(f, " ")?;
                        }
                        write!(f, "{value}")?;
                    }
                }
                write!(f, "]")
            }
        }
    }
}
