//! Benchmarks for the sampling and iterative PageRank estimators.
//!
//! Run with `cargo bench --bench pagerank_bench`.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use surfrank_core::{iterate, sample, sample_parallel, Graph};

/// Random corpus where each page links to up to `max_links` others and
/// roughly one page in ten is dangling.
fn make_corpus(pages: usize, max_links: usize, seed: u64) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let corpus: Vec<(String, Vec<String>)> = (0..pages)
        .map(|i| {
            let links = if rng.gen_ratio(1, 10) {
                Vec::new()
            } else {
                (0..rng.gen_range(1..=max_links))
                    .map(|_| format!("{}.html", rng.gen_range(0..pages)))
                    .collect()
            };
            (format!("{i}.html"), links)
        })
        .collect();
    Graph::from_corpus(corpus).expect("benchmark corpus is non-empty")
}

fn bench_iterate(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterate");
    for size in [100_usize, 1_000, 10_000] {
        let graph = make_corpus(size, 8, size as u64);
        group.bench_with_input(BenchmarkId::from_parameter(size), &graph, |b, graph| {
            b.iter(|| black_box(iterate(graph, black_box(0.85), black_box(1e-6))))
        });
    }
    group.finish();
}

fn bench_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample");
    group.sample_size(20);
    for size in [10_usize, 100, 1_000] {
        let graph = make_corpus(size, 8, size as u64);
        group.bench_with_input(BenchmarkId::new("single", size), &graph, |b, graph| {
            let mut rng = StdRng::seed_from_u64(1);
            b.iter(|| black_box(sample(graph, 0.85, black_box(10_000), &mut rng)))
        });
        group.bench_with_input(BenchmarkId::new("parallel_4", size), &graph, |b, graph| {
            b.iter(|| black_box(sample_parallel(graph, 0.85, black_box(10_000), 4, 1)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_iterate, bench_sample);
criterion_main!(benches);
