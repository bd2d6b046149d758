#![deny(missing_docs)]

//! Test-time verification of declared inverses.
//!
//! [`verify`] checks, for each sample `x`, that
//! `inverse(f)(f(x)) ≈ x` and `inverse(inverse(f))(x) ≈ f(x)`, reporting
//! every failing sample with the reason it failed. The comparison is
//! pluggable; [`ApproxEq`] is the default.

mod compare;
mod report;
mod rng;
mod verify;

pub use compare::{ApproxEq, Compare, CompareOptions, ExactEq};
pub use report::{Failure, Law, SampleOutcome, VerifyReport};
pub use rng::{derive_substream_seed, SampleRng};
pub use verify::{assert_inverse, assert_inverse_with, verify, verify_approx};
