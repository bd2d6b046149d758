use invfn_builtins::{
    adjoint, exp, exp10, exp2, expm1, identity, inv, install, install_global, log, log10, log1p,
    log2, pairs, sqrt, square, transpose,
};
use invfn_core::{Function, Invertible, InverseRegistry, Matrix, Value};
use invfn_verify::{assert_inverse, verify_approx, CompareOptions};

fn registry() -> InverseRegistry {
    let registry = InverseRegistry::new();
    install(&registry);
    registry
}

fn scalars(values: &[f64]) -> Vec<Value> {
    values.iter().copied().map(Value::Scalar).collect()
}

fn matrix(rows: usize, cols: usize, data: &[f64]) -> Value {
    Value::Matrix(Matrix::new(rows, cols, data.to_vec()).unwrap())
}

fn check(registry: &InverseRegistry, f: Function, samples: &[Value]) {
    assert_inverse(registry, &Invertible::from(f), samples);
}

#[test]
fn every_pair_is_registered_both_ways() {
    let registry = registry();
    for (f, g) in pairs() {
        assert_eq!(
            registry.resolve(&f.clone().into()).unwrap(),
            Invertible::from(g.clone())
        );
        assert_eq!(registry.resolve(&g.into()).unwrap(), Invertible::from(f));
    }
    assert_eq!(registry.len(), 14);
}

#[test]
fn self_inverse_leaves() {
    let registry = registry();
    let mixed = vec![
        Value::Scalar(2.5),
        Value::scalars([1.0, -2.0]),
        matrix(2, 2, &[1.0, 2.0, 3.0, 4.0]),
    ];
    check(&registry, identity(), &mixed);
    check(&registry, inv(), &scalars(&[0.5, 3.0, -2.0]));
    check(&registry, inv(), &[matrix(2, 2, &[4.0, 7.0, 2.0, 6.0])]);
    let transposable = vec![Value::Scalar(-1.0), matrix(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0])];
    check(&registry, adjoint(), &transposable);
    check(&registry, transpose(), &transposable);
}

#[test]
fn exponential_families() {
    let registry = registry();
    let exponents = scalars(&[-2.0, 0.0, 0.5, 3.0]);
    let positives = scalars(&[0.25, 1.0, 10.0, 1234.5]);
    check(&registry, exp(), &exponents);
    check(&registry, log(), &positives);
    check(&registry, exp2(), &exponents);
    check(&registry, log2(), &positives);
    check(&registry, exp10(), &exponents);
    check(&registry, log10(), &positives);
    check(&registry, expm1(), &scalars(&[-1.0, 1e-9, 2.0]));
    check(&registry, log1p(), &scalars(&[-0.5, 1e-9, 4.0]));
}

#[test]
fn sqrt_and_square_on_the_non_negative_half_line() {
    let registry = registry();
    let non_negative = scalars(&[0.0, 0.5, 2.0, 9.0]);
    check(&registry, sqrt(), &non_negative);
    check(&registry, square(), &non_negative);

    let report = verify_approx(
        &registry,
        &square().into(),
        &[Value::Scalar(-3.0)],
        &CompareOptions::default(),
    );
    assert!(!report.passed());
}

#[test]
fn install_global_is_idempotent() {
    let first = install_global();
    let count = first.len();
    let second = install_global();
    assert_eq!(second.len(), count);
    assert!(second.contains(exp().id()));
    assert!(invfn_core::inverse(&log().into()).is_ok());
}
