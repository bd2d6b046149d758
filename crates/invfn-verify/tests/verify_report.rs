use invfn_core::{map, set_inverse, Function, Invertible, InverseRegistry, Value};
use invfn_verify::{
    assert_inverse, verify, verify_approx, CompareOptions, ExactEq, Failure, Law, VerifyReport,
};

fn double() -> Function {
    Function::scalar("double", |x| 2.0 * x)
}

fn halve() -> Function {
    Function::scalar("halve", |x| x / 2.0)
}

fn samples() -> Vec<Value> {
    vec![Value::Scalar(-1.5), Value::Scalar(0.0), Value::Scalar(4.2)]
}

#[test]
fn correct_pair_passes_every_sample() {
    let registry = InverseRegistry::new();
    registry.register_pair(&double(), &halve());
    let report = verify_approx(
        &registry,
        &double().into(),
        &samples(),
        &CompareOptions::default(),
    );
    assert!(report.passed());
    assert_eq!(report.pass_count(), 3);
    assert_eq!(report.function, "double");
    assert!(report.fingerprint.is_some());
}

#[test]
fn wrong_inverse_reports_round_trip_mismatch() {
    let registry = InverseRegistry::new();
    let third = Function::scalar("third", |x| x / 3.0);
    registry.register_pair(&double(), &third);
    let report = verify_approx(
        &registry,
        &double().into(),
        &[Value::Scalar(3.0)],
        &CompareOptions::default(),
    );
    assert!(!report.passed());
    let outcome = report.failures().next().unwrap();
    assert_eq!(outcome.index, 0);
    assert_eq!(
        outcome.failures,
        vec![Failure::Mismatch {
            law: Law::RoundTrip,
            actual: Value::Scalar(2.0),
            expected: Value::Scalar(3.0),
        }]
    );
    assert!(!outcome.failures[0].is_missing_inverse());
}

#[test]
fn one_sided_registration_fails_involution() {
    let registry = InverseRegistry::new();
    registry.register(&double(), halve());
    let report = verify_approx(
        &registry,
        &double().into(),
        &[Value::Scalar(1.0)],
        &CompareOptions::default(),
    );
    let failures = &report.outcomes[0].failures;
    assert_eq!(
        failures,
        &vec![Failure::InvolutionUndefined {
            inverse: "halve".into()
        }]
    );
    assert!(failures[0].is_missing_inverse());
}

#[test]
fn missing_inverse_is_reported_per_sample_without_panicking() {
    let registry = InverseRegistry::new();
    let opaque = Function::scalar("opaque", |x| x.cos());
    let report = verify_approx(&registry, &opaque.into(), &samples(), &CompareOptions::default());
    assert_eq!(report.failures().count(), 3);
    for outcome in &report.outcomes {
        assert_eq!(
            outcome.failures,
            vec![Failure::NoInverse {
                function: "opaque".into()
            }]
        );
    }
    assert!(report.summary().contains("no inverse registered for opaque"));
}

#[test]
fn evaluation_errors_are_captured() {
    let registry = InverseRegistry::new();
    registry.register_pair(&double(), &halve());
    let report = verify_approx(
        &registry,
        &double().into(),
        &[Value::scalars([1.0])],
        &CompareOptions::default(),
    );
    let failures = &report.outcomes[0].failures;
    assert_eq!(failures.len(), 2);
    assert!(matches!(
        &failures[0],
        Failure::EvaluationFailed { law: Law::RoundTrip, error } if error.info().code == "expected-scalar"
    ));
    assert!(matches!(
        &failures[1],
        Failure::EvaluationFailed { law: Law::Involution, .. }
    ));
}

#[test]
fn custom_predicate_receives_forwarded_options() {
    let registry = InverseRegistry::new();
    let f = set_inverse(double(), halve());
    let options = CompareOptions::with_atol(0.25);
    let within_atol = |actual: &Value, expected: &Value, options: &CompareOptions| {
        let a = actual.as_scalar().unwrap_or(f64::NAN);
        let b = expected.as_scalar().unwrap_or(f64::NAN);
        (a - b).abs() <= options.atol
    };
    let report = verify(&registry, &f, &samples(), &within_atol, &options);
    assert!(report.passed());

    let never = |_: &Value, _: &Value, _: &CompareOptions| false;
    let report = verify(&registry, &f, &samples(), &never, &options);
    assert_eq!(report.failures().count(), 3);
    assert!(report.outcomes.iter().all(|o| o.failures.len() == 2));
}

#[test]
fn exact_comparison_on_mapped_pairs() {
    let registry = InverseRegistry::new();
    registry.register_pair(&double(), &halve());
    let f = map(double());
    let report = verify(
        &registry,
        &f,
        &[Value::scalars([1.0, 2.0, 8.0])],
        &ExactEq,
        &CompareOptions::default(),
    );
    assert!(report.passed(), "{}", report.summary());
}

#[test]
fn empty_sample_set_passes_vacuously() {
    let registry = InverseRegistry::new();
    let report = verify_approx(&registry, &double().into(), &[], &CompareOptions::default());
    assert!(report.passed());
    assert!(report.outcomes.is_empty());
}

#[test]
fn report_json_round_trip() {
    let registry = InverseRegistry::new();
    let third = Function::scalar("third", |x| x / 3.0);
    registry.register(&double(), third);
    let exact = [Value::Scalar(-1.5), Value::Scalar(0.0), Value::Scalar(3.0)];
    let report = verify_approx(
        &registry,
        &Invertible::from(double()),
        &exact,
        &CompareOptions::default(),
    );
    assert_eq!(report.pass_count(), 0);
    let json = report.to_json().unwrap();
    assert!(json.contains("\"kind\": \"mismatch\""));
    let restored = VerifyReport::from_json(&json).unwrap();
    assert_eq!(restored, report);
}

#[test]
fn report_with_malformed_matrix_is_rejected() {
    let registry = InverseRegistry::new();
    let report = verify_approx(
        &registry,
        &Invertible::from(double()),
        &[Value::Scalar(1.0)],
        &CompareOptions::default(),
    );
    let mut json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    json["outcomes"][0]["input"] = serde_json::json!({
        "kind": "matrix",
        "value": {"rows": 3, "cols": 3, "data": [1.0]}
    });
    let err = VerifyReport::from_json(&json.to_string()).unwrap_err();
    assert_eq!(err.info().code, "report-deserialize");
    assert!(err.info().message.contains("matrix-shape"));
}

#[test]
fn assert_inverse_accepts_valid_pairs() {
    let registry = InverseRegistry::new();
    registry.register_pair(&double(), &halve());
    assert_inverse(&registry, &double().into(), &samples());
}

#[test]
#[should_panic(expected = "inverse check failed for opaque: 0/1 samples passed")]
fn assert_inverse_panics_with_summary() {
    let registry = InverseRegistry::new();
    let opaque = Function::scalar("opaque", |x| x.cos());
    assert_inverse(&registry, &opaque.into(), &[Value::Scalar(1.0)]);
}
