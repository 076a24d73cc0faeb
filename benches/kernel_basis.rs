// benches/kernel_basis.rs
//! Benchmark: fraction-free integer kernel of symmetric Gram matrices
//!
//! Gram matrices `Bᵀ B` of rank `n - 2` at increasing sizes, so every run
//! produces a two-vector kernel basis.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gram_engine::kernel::{integer_kernel_basis, Echelon};
use gram_engine::matrix::IntMatrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Symmetric `n × n` Gram matrix with a two-dimensional null space.
fn degenerate_gram(rng: &mut StdRng, n: usize) -> IntMatrix {
    let b: Vec<Vec<i64>> = (0..n - 2)
        .map(|_| (0..n).map(|_| rng.gen_range(-4..=4)).collect())
        .collect();
    let rows: Vec<Vec<i64>> = (0..n)
        .map(|i| (0..n).map(|j| b.iter().map(|r| r[i] * r[j]).sum()).collect())
        .collect();
    IntMatrix::from_rows(rows).unwrap()
}

fn bench_kernel_basis(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(17);
    let mut group = c.benchmark_group("integer_kernel_basis");
    for n in [4, 8, 16, 24] {
        let gram = degenerate_gram(&mut rng, n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &gram, |b, gram| {
            b.iter(|| black_box(integer_kernel_basis(black_box(gram))))
        });
    }
    group.finish();
}

fn bench_rank(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(18);
    let gram = degenerate_gram(&mut rng, 16);
    c.bench_function("echelon_rank_16", |b| {
        b.iter(|| black_box(Echelon::new(black_box(&gram)).rank()))
    });
}

criterion_group!(benches, bench_kernel_basis, bench_rank);
criterion_main!(benches);
