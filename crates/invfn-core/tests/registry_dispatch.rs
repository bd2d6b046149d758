use invfn_core::{
    compose2, map, set_inverse, Function, FunctionId, Invertible, InverseRegistry, NoInverse,
    Value,
};

fn double() -> Function {
    Function::scalar("double", |x| 2.0 * x)
}

fn halve() -> Function {
    Function::scalar("halve", |x| x / 2.0)
}

fn opaque() -> Function {
    Function::scalar("opaque", |x| x.sin() + x.cos())
}

fn registry() -> InverseRegistry {
    let registry = InverseRegistry::new();
    registry.register_pair(&double(), &halve());
    registry
}

#[test]
fn direct_registration_resolves() {
    let registry = registry();
    let f = Invertible::from(double());
    let inv = registry.resolve(&f).unwrap();
    assert_eq!(inv, Invertible::from(halve()));
    let y = f.apply(&Value::Scalar(3.0)).unwrap();
    assert_eq!(inv.apply(&y).unwrap(), Value::Scalar(3.0));
}

#[test]
fn double_inversion_of_exact_pair_is_identical() {
    let registry = registry();
    let f = Invertible::from(double());
    let back = registry.resolve(&registry.resolve(&f).unwrap()).unwrap();
    assert_eq!(back, f);
}

#[test]
fn unregistered_function_resolves_to_no_inverse() {
    let registry = registry();
    let f = Invertible::from(opaque());
    let missing = registry.resolve(&f).unwrap_err();
    assert_eq!(missing, NoInverse::new(f.clone()));
    assert_eq!(missing.original(), &f);
    assert_eq!(missing.to_string(), "no inverse registered for opaque");
}

#[test]
fn no_inverse_inverts_to_original_and_refuses_evaluation() {
    let f = Invertible::from(opaque());
    let missing = NoInverse::new(f.clone());
    assert_eq!(missing.inverse(), f);
    let err = missing.apply(&Value::Scalar(1.0)).unwrap_err();
    assert_eq!(err.info().code, "inverse-undefined");
}

#[test]
fn one_sided_registration_is_not_symmetrised() {
    let registry = InverseRegistry::new();
    registry.register(&double(), halve());
    assert!(registry.resolve(&double().into()).is_ok());
    assert!(registry.resolve(&halve().into()).is_err());
}

#[test]
fn reregistration_replaces_previous_entry() {
    let registry = registry();
    let other = Function::scalar("other-halve", |x| x * 0.5);
    let previous = registry.register(&double(), other.clone());
    assert_eq!(previous, Some(Invertible::from(halve())));
    assert_eq!(
        registry.resolve(&double().into()).unwrap(),
        Invertible::from(other)
    );
    assert_eq!(registry.len(), 2);
}

#[test]
fn dispatch_key_is_the_function_name() {
    let registry = registry();
    let lookalike = Function::scalar("double", |x| x + x);
    assert_eq!(
        registry.resolve(&lookalike.into()).unwrap(),
        Invertible::from(halve())
    );
}

#[test]
fn unregister_removes_entry() {
    let registry = registry();
    let id = FunctionId::new("double");
    assert!(registry.contains(&id));
    assert!(registry.unregister(&id).is_some());
    assert!(!registry.contains(&id));
    assert!(registry.unregister(&id).is_none());
    assert_eq!(registry.registered_ids(), vec![FunctionId::new("halve")]);
}

#[test]
fn override_pairs_bypass_the_table() {
    let registry = InverseRegistry::new();
    assert!(registry.is_empty());
    let f = set_inverse(opaque(), double());
    assert_eq!(registry.resolve(&f).unwrap(), set_inverse(double(), opaque()));
}

#[test]
fn structural_shapes_are_dispatched_before_lookup() {
    let registry = registry();
    let composed = compose2(double(), double());
    assert_eq!(
        registry.resolve(&composed).unwrap(),
        compose2(halve(), halve())
    );
    let mapped = map(double());
    assert_eq!(registry.resolve(&mapped).unwrap(), map(halve()));
}

#[test]
fn global_registry_round_trip() {
    let f = Function::scalar("global-triple", |x| 3.0 * x);
    let g = Function::scalar("global-third", |x| x / 3.0);
    invfn_core::register_pair(&f, &g);
    assert!(invfn_core::global().contains(f.id()));
    let inv = invfn_core::inverse(&f.clone().into()).unwrap();
    assert_eq!(inv, Invertible::from(g));
}
