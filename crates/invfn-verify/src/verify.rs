//! Round-trip and involution checks.

use invfn_core::{canonical_hash, InvError, Invertible, InverseRegistry, Value};
use tracing::{debug, warn};

use crate::compare::{ApproxEq, Compare, CompareOptions};
use crate::report::{Failure, Law, SampleOutcome, VerifyReport};

/// Checks the inverse of `f` against every sample.
///
/// For each sample `x` the report records whether
/// `compare(inverse(f)(f(x)), x)` and `compare(inverse(inverse(f))(x), f(x))`
/// hold. Nothing is raised: a missing inverse, a failed evaluation and a
/// comparison mismatch all become [`Failure`]s on the sample's outcome.
pub fn verify<C>(
    registry: &InverseRegistry,
    f: &Invertible,
    samples: &[Value],
    compare: &C,
    options: &CompareOptions,
) -> VerifyReport
where
    C: Compare + ?Sized,
{
    if samples.is_empty() {
        warn!(function = %f, "verification called without samples");
    }
    let inverses = registry.resolve(f).map(|g| {
        let h = registry.resolve(&g);
        (g, h)
    });

    let outcomes = samples
        .iter()
        .enumerate()
        .map(|(index, x)| {
            let mut failures = Vec::new();
            match &inverses {
                Err(missing) => failures.push(Failure::NoInverse {
                    function: missing.original().to_string(),
                }),
                Ok((g, h)) => {
                    let fx = f.apply(x);
                    check_round_trip(g, x, &fx, compare, options, &mut failures);
                    match h {
                        Ok(h) => check_involution(h, x, &fx, compare, options, &mut failures),
                        Err(_) => failures.push(Failure::InvolutionUndefined {
                            inverse: g.to_string(),
                        }),
                    }
                }
            }
            for failure in &failures {
                debug!(function = %f, sample = index, %failure, "inverse law failed");
            }
            SampleOutcome {
                index,
                input: x.clone(),
                failures,
            }
        })
        .collect();

    VerifyReport {
        function: f.to_string(),
        fingerprint: canonical_hash(f).ok(),
        outcomes,
    }
}

fn check_round_trip<C>(
    g: &Invertible,
    x: &Value,
    fx: &Result<Value, InvError>,
    compare: &C,
    options: &CompareOptions,
    failures: &mut Vec<Failure>,
) where
    C: Compare + ?Sized,
{
    let law = Law::RoundTrip;
    let fx = match fx {
        Ok(fx) => fx,
        Err(error) => {
            failures.push(Failure::EvaluationFailed {
                law,
                error: error.clone(),
            });
            return;
        }
    };
    match g.apply(fx) {
        Ok(actual) if compare.compare(&actual, x, options) => {}
        Ok(actual) => failures.push(Failure::Mismatch {
            law,
            actual,
            expected: x.clone(),
        }),
        Err(error) => failures.push(Failure::EvaluationFailed { law, error }),
    }
}

fn check_involution<C>(
    h: &Invertible,
    x: &Value,
    fx: &Result<Value, InvError>,
    compare: &C,
    options: &CompareOptions,
    failures: &mut Vec<Failure>,
) where
    C: Compare + ?Sized,
{
    let law = Law::Involution;
    let expected = match fx {
        Ok(fx) => fx,
        Err(error) => {
            failures.push(Failure::EvaluationFailed {
                law,
                error: error.clone(),
            });
            return;
        }
    };
    match h.apply(x) {
        Ok(actual) if compare.compare(&actual, expected, options) => {}
        Ok(actual) => failures.push(Failure::Mismatch {
            law,
            actual,
            expected: expected.clone(),
        }),
        Err(error) => failures.push(Failure::EvaluationFailed { law, error }),
    }
}

/// [`verify`] with approximate equality.
pub fn verify_approx(
    registry: &InverseRegistry,
    f: &Invertible,
    samples: &[Value],
    options: &CompareOptions,
) -> VerifyReport {
    verify(registry, f, samples, &ApproxEq, options)
}

/// Panics with every failing sample listed unless both laws hold for all
/// samples under default approximate equality.
#[track_caller]
pub fn assert_inverse(registry: &InverseRegistry, f: &Invertible, samples: &[Value]) {
    assert_inverse_with(registry, f, samples, &ApproxEq, &CompareOptions::default());
}

/// [`assert_inverse`] with a caller-chosen comparison.
#[track_caller]
pub fn assert_inverse_with<C>(
    registry: &InverseRegistry,
    f: &Invertible,
    samples: &[Value],
    compare: &C,
    options: &CompareOptions,
) where
    C: Compare + ?Sized,
{
    let report = verify(registry, f, samples, compare, options);
    if !report.passed() {
        panic!("inverse check failed for {}", report.summary());
    }
}
