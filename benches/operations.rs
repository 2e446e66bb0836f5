use criterion::{criterion_group, criterion_main, Criterion};
use rsa_accumulator::accumulator::{Accumulator, Element};
use rsa_accumulator::hash_to_prime;

fn bench_hash_to_prime(c: &mut Criterion) {
    let mut counter = 0u64;
    c.bench_function("hash_to_prime", |b| {
        b.iter(|| {
            counter += 1;
            hash_to_prime(&counter.to_be_bytes())
        })
    });
}

fn bench_add(c: &mut Criterion) {
    let mut acc = Accumulator::new_rsa2048(false);
    let mut counter = 0u64;
    c.bench_function("add", |b| {
        b.iter(|| {
            counter += 1;
            acc.add(&[Element::new(counter.to_be_bytes().to_vec())])
        })
    });
}

fn bench_verify_membership(c: &mut Criterion) {
    let mut acc = Accumulator::new_rsa2048(false);
    acc.add(&["a".into(), "b".into()]);
    let proof = acc.add(&["c".into()]);
    c.bench_function("verify_membership", |b| {
        b.iter(|| acc.verify_membership(&proof))
    });
}

fn bench_prove_membership(c: &mut Criterion) {
    let mut acc = Accumulator::new_rsa2048(true);
    let elements: Vec<Element> = (0..16u64)
        .map(|i| Element::new(i.to_be_bytes().to_vec()))
        .collect();
    acc.add(&elements);
    c.bench_function("prove_membership", |b| {
        b.iter(|| acc.prove_membership(&elements[..1]).unwrap().unwrap())
    });
}

criterion_group!(
    benches,
    bench_hash_to_prime,
    bench_add,
    bench_verify_membership,
    bench_prove_membership
);
criterion_main!(benches);
