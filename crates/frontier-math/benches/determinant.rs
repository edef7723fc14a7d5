//! Cofactor versus LU determinant cost on covariance-sized matrices.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use frontier_math::{DeterminantMethod, Matrix};
use std::hint::black_box;

fn covariance_like(n: usize) -> Matrix {
    let rows: Vec<Vec<f64>> = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| if i == j { 20.0 + i as f64 } else { 1.0 / (1.0 + (i + j) as f64) })
                .collect()
        })
        .collect();
    Matrix::from_rows(&rows).unwrap()
}

fn bench_determinant(c: &mut Criterion) {
    let mut group = c.benchmark_group("determinant");
    for n in [3, 5, 7, 9] {
        let m = covariance_like(n);
        group.bench_with_input(BenchmarkId::new("cofactor", n), &m, |b, m| {
            b.iter(|| black_box(m).determinant_with(DeterminantMethod::Cofactor))
        });
        group.bench_with_input(BenchmarkId::new("lu", n), &m, |b, m| {
            b.iter(|| black_box(m).determinant_with(DeterminantMethod::Lu))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_determinant);
criterion_main!(benches);
