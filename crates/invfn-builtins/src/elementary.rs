//! Exponential, logarithmic and power leaves.

use invfn_core::Function;

/// Natural exponential.
pub fn exp() -> Function {
    Function::scalar("exp", f64::exp)
}

/// Natural logarithm; negative inputs are rejected.
pub fn log() -> Function {
    Function::scalar_in("log", |x| x >= 0.0, f64::ln)
}

/// Base-2 exponential.
pub fn exp2() -> Function {
    Function::scalar("exp2", f64::exp2)
}

/// Base-2 logarithm.
pub fn log2() -> Function {
    Function::scalar_in("log2", |x| x >= 0.0, f64::log2)
}

/// Base-10 exponential.
pub fn exp10() -> Function {
    Function::scalar("exp10", |x| 10f64.powf(x))
}

/// Base-10 logarithm.
pub fn log10() -> Function {
    Function::scalar_in("log10", |x| x >= 0.0, f64::log10)
}

/// `exp(x) - 1`, accurate near zero.
pub fn expm1() -> Function {
    Function::scalar("expm1", f64::exp_m1)
}

/// `log(1 + x)`, accurate near zero; inputs below `-1` are rejected.
pub fn log1p() -> Function {
    Function::scalar_in("log1p", |x| x >= -1.0, f64::ln_1p)
}

/// Square root of a non-negative real.
pub fn sqrt() -> Function {
    Function::scalar_in("sqrt", |x| x >= 0.0, f64::sqrt)
}

/// `x * x`; the inverse of [`sqrt`] for non-negative `x`.
///
/// Registered as a mutual pair with `sqrt`, so `square` only round-trips on
/// the non-negative half line.
pub fn square() -> Function {
    Function::scalar("square", |x| x * x)
}
