//! Injection throughput benchmarks.
//!
//! Measures how clique and attribute injection scale with graph size.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;

use graph_anomaly_core::rng::seeded_rng;
use graph_anomaly_core::{inject_attribute_anomalies, inject_cliques, CsrMatrix};

/// Sparse random graph with ~`avg_degree` out-edges per node.
fn random_graph(n: usize, avg_degree: usize) -> CsrMatrix<f32> {
    let mut rng = seeded_rng(42);
    let triplets: Vec<_> = (0..n * avg_degree)
        .map(|_| (rng.gen_range(0..n), rng.gen_range(0..n), 1.0f32))
        .collect();
    CsrMatrix::from_triplets(n, n, &triplets).expect("valid triplets")
}

fn random_attrs(n: usize, d: usize, nnz_per_row: usize) -> CsrMatrix<f32> {
    let mut rng = seeded_rng(7);
    let triplets: Vec<_> = (0..n)
        .flat_map(|r| (0..nnz_per_row).map(move |_| r))
        .map(|r| (r, rng.gen_range(0..d), rng.gen_range(0.0f32..1.0)))
        .collect();
    CsrMatrix::from_triplets(n, d, &triplets).expect("valid triplets")
}

fn bench_cliques(c: &mut Criterion) {
    let mut group = c.benchmark_group("inject_cliques");

    for &n in &[1_000usize, 10_000, 50_000] {
        let adj = random_graph(n, 10);
        group.bench_with_input(BenchmarkId::new("15x10", n), &adj, |b, adj| {
            b.iter(|| {
                let mut rng = seeded_rng(0);
                black_box(inject_cliques(adj, 15, 10, &mut rng).expect("valid sizes"))
            })
        });
    }

    group.finish();
}

fn bench_attribute_anomalies(c: &mut Criterion) {
    let mut group = c.benchmark_group("inject_attribute_anomalies");

    for &n in &[1_000usize, 10_000] {
        let attrs = random_attrs(n, 8_000, 30);
        group.bench_with_input(BenchmarkId::new("50cand_150anom", n), &attrs, |b, attrs| {
            b.iter(|| {
                let mut rng = seeded_rng(0);
                black_box(inject_attribute_anomalies(attrs, 50, 150, &mut rng).expect("valid sizes"))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_cliques, bench_attribute_anomalies);
criterion_main!(benches);
