use invfn_core::{compose, map, set_inverse, Function, Invertible, InverseRegistry, Value};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn resolve_bench(c: &mut Criterion) {
    let registry = InverseRegistry::new();
    let mut stages = Vec::new();
    for idx in 0..64 {
        let f = Function::scalar(format!("shift-{idx}"), move |x| x + idx as f64);
        let g = Function::scalar(format!("unshift-{idx}"), move |x| x - idx as f64);
        registry.register_pair(&f, &g);
        stages.push(Invertible::from(f));
    }
    let chain = compose(stages.clone()).unwrap();
    let mapped = map(chain.clone());
    let pair = set_inverse(stages[0].clone(), stages[1].clone());

    c.bench_function("resolve_leaf", |b| {
        b.iter(|| black_box(registry.resolve(&stages[7]).unwrap()));
    });

    c.bench_function("resolve_chain_64", |b| {
        b.iter(|| black_box(registry.resolve(&chain).unwrap()));
    });

    c.bench_function("resolve_override", |b| {
        b.iter(|| black_box(registry.resolve(&pair).unwrap()));
    });

    let inverse = registry.resolve(&mapped).unwrap();
    let input = Value::scalars((0..256).map(f64::from));
    c.bench_function("apply_mapped_inverse_256", |b| {
        b.iter(|| black_box(inverse.apply(&input).unwrap()));
    });
}

criterion_group!(benches, resolve_bench);
criterion_main!(benches);
