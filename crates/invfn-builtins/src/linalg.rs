//! Identity, reciprocal and transposition leaves.

use invfn_core::errors::{ErrorInfo, InvError};
use invfn_core::{Function, Matrix, Value};

/// Returns its input unchanged.
pub fn identity() -> Function {
    Function::new("identity", |value| Ok(value.clone()))
}

/// Multiplicative inverse: `1 / x` for scalars, the matrix inverse for
/// square matrices.
pub fn inv() -> Function {
    Function::new("inv", |value| match value {
        Value::Scalar(x) => Ok(Value::Scalar(x.recip())),
        Value::Matrix(matrix) => invert_matrix(matrix).map(Value::Matrix),
        Value::List(_) => Err(unsupported("inv", value)),
    })
}

/// Conjugate transpose. Real matrices are transposed and scalars are their
/// own adjoint.
pub fn adjoint() -> Function {
    Function::new("adjoint", |value| transpose_value("adjoint", value))
}

/// Transpose. Scalars are left unchanged.
pub fn transpose() -> Function {
    Function::new("transpose", |value| transpose_value("transpose", value))
}

fn transpose_value(name: &str, value: &Value) -> Result<Value, InvError> {
    match value {
        Value::Scalar(_) => Ok(value.clone()),
        Value::Matrix(matrix) => Ok(Value::Matrix(matrix.transpose())),
        Value::List(_) => Err(unsupported(name, value)),
    }
}

fn unsupported(name: &str, value: &Value) -> InvError {
    InvError::Domain(
        ErrorInfo::new("unsupported-shape", format!("{name} is not defined on this shape"))
            .with_context("function", name)
            .with_context("shape", value.shape_name())
            .with_hint("wrap the function with map(..) to apply it element-wise"),
    )
}

/// Inverts a square matrix by Gauss-Jordan elimination with partial pivoting.
pub fn invert_matrix(matrix: &Matrix) -> Result<Matrix, InvError> {
    if !matrix.is_square() {
        return Err(InvError::Domain(
            ErrorInfo::new("matrix-not-square", "only square matrices can be inverted")
                .with_context("function", "inv")
                .with_context("rows", matrix.rows().to_string())
                .with_context("cols", matrix.cols().to_string()),
        ));
    }
    let n = matrix.rows();
    let width = 2 * n;
    let mut aug = vec![0.0; n * width];
    for row in 0..n {
        aug[row * width..row * width + n]
            .copy_from_slice(&matrix.data()[row * n..(row + 1) * n]);
        aug[row * width + n + row] = 1.0;
    }

    let scale = matrix
        .data()
        .iter()
        .fold(0.0f64, |acc, value| acc.max(value.abs()));
    if scale == 0.0 {
        return Err(singular(0));
    }
    // Relative to the largest entry, so uniformly small matrices still invert.
    let tolerance = f64::EPSILON * scale * n as f64;

    for col in 0..n {
        let mut pivot = col;
        for row in col + 1..n {
            if aug[row * width + col].abs() > aug[pivot * width + col].abs() {
                pivot = row;
            }
        }
        if aug[pivot * width + col].abs() <= tolerance {
            return Err(singular(col));
        }
        if pivot != col {
            for k in 0..width {
                aug.swap(col * width + k, pivot * width + k);
            }
        }
        let diag = aug[col * width + col];
        for k in 0..width {
            aug[col * width + k] /= diag;
        }
        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = aug[row * width + col];
            if factor == 0.0 {
                continue;
            }
            for k in 0..width {
                aug[row * width + k] -= factor * aug[col * width + k];
            }
        }
    }

    let mut data = Vec::with_capacity(n * n);
    for row in 0..n {
        data.extend_from_slice(&aug[row * width + n..(row + 1) * width]);
    }
    Matrix::new(n, n, data)
}

fn singular(col: usize) -> InvError {
    InvError::Domain(
        ErrorInfo::new("matrix-singular", "matrix is singular to working precision")
            .with_context("function", "inv")
            .with_context("column", col.to_string()),
    )
}
