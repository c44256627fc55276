mod types;

use criterion::{criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use serde_any_value::{AnyValue, Content, InstancesOf};
use std::hint::black_box;
use types::*;

fn randomizer() -> StdRng {
    StdRng::seed_from_u64(0)
}

fn decode(c: &mut Criterion) {
    let mut rng = randomizer();
    let input = &Customer::generate(&mut rng);

    c.bench_function("Decode JSON typed", |b| {
        let input = &serde_json::to_string(input).unwrap();
        b.iter(|| {
            let _ = serde_json::from_str::<Customer>(black_box(input)).unwrap();
        })
    });
    c.bench_function("Decode JSON any value", |b| {
        let input = &serde_json::to_string(input).unwrap();
        b.iter(|| {
            let _ = serde_json::from_str::<AnyValue>(black_box(input)).unwrap();
        })
    });
    c.bench_function("Decode content any value", |b| {
        let input = &serde_any_value::to_content(input).unwrap();
        b.iter(|| {
            let _ = AnyValue::decode(black_box(input)).unwrap();
        })
    });
}

fn encode(c: &mut Criterion) {
    let mut rng = randomizer();
    let input = &Customer::generate(&mut rng);
    let value = &serde_json::from_str::<AnyValue>(&serde_json::to_string(input).unwrap()).unwrap();

    c.bench_function("Encode JSON any value", |b| {
        b.iter(|| {
            let _ = serde_json::to_string(black_box(value)).unwrap();
        })
    });
    c.bench_function("Encode content any value", |b| {
        b.iter(|| {
            let _ = serde_any_value::to_content(black_box(value)).unwrap();
        })
    });
}

fn extract(c: &mut Criterion) {
    let mut rng = randomizer();
    let input = &std::iter::from_fn(|| Some(Customer::generate(&mut rng)))
        .take(10)
        .collect::<Vec<_>>();

    c.bench_function("Extract JSON products", |b| {
        let input = &serde_json::to_string(input).unwrap();
        b.iter(|| {
            let _ = serde_json::from_str::<InstancesOf<Product>>(black_box(input)).unwrap();
        })
    });
    c.bench_function("Extract JSON integers", |b| {
        let input = &serde_json::to_string(input).unwrap();
        b.iter(|| {
            let _ = serde_json::from_str::<InstancesOf<i64>>(black_box(input)).unwrap();
        })
    });
    c.bench_function("Extract content products", |b| {
        let input: &Content = &serde_any_value::to_content(input).unwrap();
        b.iter(|| {
            let _ = serde_any_value::extract::<Product>(black_box(input));
        })
    });
}

criterion_group!(benches, decode, encode, extract);
criterion_main!(benches);
