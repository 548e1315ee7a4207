use std::collections::BTreeSet;

use avl_arena::AvlArena;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use testcrate::P0;

const N: usize = 100_000;

pub fn benchmarks(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let values: Vec<u64> = (0..N).map(|_| rng.gen()).collect();

    c.bench_function("tree_insert", |b| {
        let mut tree: AvlArena<P0, u64> = AvlArena::new();
        b.iter(|| {
            for value in &values {
                let _ = tree.insert(*value);
            }
        })
    });

    c.bench_function("btreeset_insert", |b| {
        let mut set = BTreeSet::new();
        b.iter(|| {
            for value in &values {
                let _ = set.insert(*value);
            }
        })
    });

    let mut tree: AvlArena<P0, u64> = AvlArena::new();
    let ptrs: Vec<P0> = values
        .iter()
        .filter_map(|value| tree.insert(*value).ok())
        .collect();

    c.bench_function("tree_find", |b| {
        b.iter(|| {
            for value in &values {
                black_box(tree.find(value));
            }
        })
    });

    c.bench_function("tree_ptr_get", |b| {
        b.iter(|| {
            for p in &ptrs {
                black_box(tree.get(*p));
            }
        })
    });

    c.bench_function("tree_iter", |b| {
        b.iter(|| {
            for (p, t) in &tree {
                black_box((p, t));
            }
        })
    });

    c.bench_function("tree_remove", |b| {
        let mut tree = tree.clone();
        b.iter(|| {
            for value in &values {
                black_box(tree.remove_val(value));
            }
        })
    });
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
