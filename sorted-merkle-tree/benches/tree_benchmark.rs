#[macro_use]
extern crate criterion;

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use sorted_merkle_tree::{MultiProof, Node, keccak256, make_merkle_tree, process_proof};

fn leaves(count: u32) -> Vec<Node> {
    (0..count).map(|i| keccak256(&i.to_be_bytes())).collect()
}

fn bench(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("tree build");
        for size in [1_000u32, 10_000, 100_000] {
            group.bench_with_input(BenchmarkId::new("leaves", size), &size, |b, &size| {
                let input = leaves(size);
                b.iter(|| make_merkle_tree(black_box(input.clone())).expect("non-empty"));
            });
        }
    }

    c.bench_function("single proof round trip", |b| {
        let tree = make_merkle_tree(leaves(100_000)).expect("non-empty");
        let first_leaf = tree.len() / 2;
        let mut index = first_leaf;
        b.iter(|| {
            let proof = sorted_merkle_tree::get_proof(&tree, index).expect("leaf");
            black_box(process_proof(&tree[index], &proof));
            index = if index + 1 < tree.len() { index + 1 } else { first_leaf };
        });
    });

    {
        let tree = make_merkle_tree(leaves(100_000)).expect("non-empty");
        let first_leaf = tree.len() / 2;
        let mut group = c.benchmark_group("multiproof round trip");
        for count in [2usize, 64, 1_024] {
            let indices: Vec<usize> = (0..count).map(|k| first_leaf + k * 97).collect();
            group.bench_with_input(BenchmarkId::new("leaves", count), &indices, |b, indices| {
                b.iter(|| {
                    let proof = MultiProof::generate(&tree, indices).expect("leaves");
                    black_box(proof.process().expect("well formed"));
                });
            });
        }
    }
}

criterion_group!(benches, bench);
criterion_main!(benches);
