//! Property tests for distribution invariants over random corpora

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use surfrank_core::{iterate, sample, sample_parallel, transition, Graph};

/// Random corpus of 1..8 pages with arbitrary links (self-links included,
/// so pruning is exercised too).
fn arb_graph() -> impl Strategy<Value = Graph> {
    (1usize..8)
        .prop_flat_map(|n| prop::collection::vec(prop::collection::vec(any::<bool>(), n), n))
        .prop_map(|adjacency| {
            let corpus = adjacency.iter().enumerate().map(|(i, row)| {
                let links: Vec<String> = row
                    .iter()
                    .enumerate()
                    .filter(|(_, &linked)| linked)
                    .map(|(j, _)| format!("p{j}"))
                    .collect();
                (format!("p{i}"), links)
            });
            Graph::from_corpus(corpus).unwrap()
        })
}

proptest! {
    #[test]
    fn transition_rows_sum_to_one(graph in arb_graph(), damping in 0f64..=1.0) {
        for page in graph.pages() {
            let dist = transition(&graph, page, damping).unwrap();
            prop_assert!((dist.sum() - 1.0).abs() < 1e-9);
            prop_assert!(dist.iter().all(|(_, p)| p >= 0.0));
        }
    }

    #[test]
    fn dangling_rows_are_uniform(graph in arb_graph(), damping in 0f64..=1.0) {
        let uniform = 1.0 / graph.len() as f64;
        for page in graph.pages() {
            if graph.is_dangling(page) == Some(true) {
                let dist = transition(&graph, page, damping).unwrap();
                prop_assert!(dist.iter().all(|(_, p)| p == uniform));
            }
        }
    }

    #[test]
    fn sampled_distribution_sums_to_one(
        graph in arb_graph(),
        damping in 0f64..=1.0,
        samples in 1usize..2_000,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let dist = sample(&graph, damping, samples, &mut rng).unwrap();
        prop_assert!((dist.sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn parallel_walks_sum_to_one(
        graph in arb_graph(),
        samples in 1usize..2_000,
        workers in 1usize..6,
        seed in any::<u64>(),
    ) {
        let dist = sample_parallel(&graph, 0.85, samples, workers, seed).unwrap();
        prop_assert!((dist.sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn iterated_distribution_sums_to_one(
        graph in arb_graph(),
        damping in 0f64..0.95,
        epsilon in 1e-6f64..1e-2,
    ) {
        let dist = iterate(&graph, damping, epsilon).unwrap();
        prop_assert!((dist.sum() - 1.0).abs() < epsilon);
        prop_assert!(dist.iter().all(|(_, p)| p > 0.0));
    }
}
