//! Deterministic sample generation.

use invfn_core::errors::{ErrorInfo, InvError};
use invfn_core::Value;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use siphasher::sip::SipHasher13;
use std::hash::Hasher;

/// Deterministic source of verification samples.
///
/// Substreams are derived by hashing `(master_seed, substream_id)` with
/// SipHash-1-3 under fixed zero keys, so a sweep over several functions can
/// give each function its own reproducible sample set.
#[derive(Debug, Clone)]
pub struct SampleRng {
    rng: StdRng,
}

impl SampleRng {
    /// Creates a generator from a master seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates the generator for a substream of `seed`.
    pub fn substream(seed: u64, substream: u64) -> Self {
        Self::from_seed(derive_substream_seed(seed, substream))
    }

    /// Draws one scalar uniformly from `[low, high)`.
    ///
    /// A degenerate range `low == high` yields `low`. Non-finite bounds, an
    /// inverted range, or a width that overflows `f64` are rejected.
    pub fn uniform(&mut self, low: f64, high: f64) -> Result<f64, InvError> {
        check_range(low, high)?;
        if low == high {
            return Ok(low);
        }
        Ok(self.rng.gen_range(low..high))
    }

    /// Draws `count` scalar samples from `[low, high)`.
    pub fn scalars(&mut self, count: usize, low: f64, high: f64) -> Result<Vec<Value>, InvError> {
        (0..count)
            .map(|_| self.uniform(low, high).map(Value::Scalar))
            .collect()
    }

    /// Draws one list sample of `len` scalars from `[low, high)`.
    pub fn list(&mut self, len: usize, low: f64, high: f64) -> Result<Value, InvError> {
        let items = (0..len)
            .map(|_| self.uniform(low, high))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::scalars(items))
    }
}

fn check_range(low: f64, high: f64) -> Result<(), InvError> {
    if low.is_finite() && high.is_finite() && low <= high && (high - low).is_finite() {
        return Ok(());
    }
    Err(InvError::Domain(
        ErrorInfo::new("sample-range", "sample bounds must be finite and ordered")
            .with_context("low", low.to_string())
            .with_context("high", high.to_string()),
    ))
}

/// Derives the deterministic seed for a specific substream.
pub fn derive_substream_seed(master_seed: u64, substream: u64) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    hasher.write_u64(master_seed);
    hasher.write_u64(substream);
    hasher.finish()
}
