#![deny(missing_docs)]

//! Inverse dispatch for function-like values.
//!
//! Callables declare their inverses in an [`InverseRegistry`]; inverses of
//! compositions, mapped (broadcast) callables and explicit
//! [`set_inverse`] pairs are derived structurally from the inverses of
//! their constituents. Absence of an inverse is reported as [`NoInverse`]
//! data, never as a panic.
//!
//! ```text
//! inverse(f ∘ g)            = inverse(g) ∘ inverse(f)
//! inverse(map(f))           = map(inverse(f))
//! inverse(set_inverse(f,g)) = set_inverse(g, f)
//! ```
//!
//! Implementations must satisfy `inverse(f)(f(x)) ≈ x` on the domain of `f`,
//! and `inverse(inverse(f))` must be defined and behave as `f`. Registration
//! does not enforce either law; check them with the `invfn-verify` crate.

pub mod errors;
mod function;
mod hash;
mod invertible;
mod no_inverse;
mod registry;
mod value;

pub use errors::{ErrorInfo, InvError};
pub use function::{expect_scalar, Function, FunctionId};
pub use hash::{canonical_hash, shape_hash};
pub use invertible::{
    compose, compose2, map, set_inverse, Composed, Invertible, Mapped, OverridePair, Shape,
};
pub use no_inverse::NoInverse;
pub use registry::{global, inverse, register, register_pair, InverseRegistry};
pub use value::{Matrix, Value};
