//! Monte Carlo estimation of PageRank.
//!
//! A single surfer starts on a uniformly random page and takes
//! `samples - 1` steps according to the transition model. The share of
//! visits each page received estimates its stationary probability.
//!
//! The generator is always supplied by the caller, so a seeded `StdRng`
//! gives reproducible walks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::distribution::Distribution;
use crate::error::{check_damping, check_nonzero, Result};
use crate::graph::Graph;
use crate::transition::fill_row;

/// Estimate PageRank from one walk of `samples` visits.
///
/// The first visit is the uniform initial draw; every later visit is one
/// transition. The result is `visits / samples`, so it sums to 1.
///
/// # Errors
///
/// `InvalidParameter` if `samples == 0` or `damping` is outside `[0, 1]`.
pub fn sample<R>(graph: &Graph, damping: f64, samples: usize, rng: &mut R) -> Result<Distribution>
where
    R: Rng + ?Sized,
{
    check_damping(damping)?;
    check_nonzero("samples", samples)?;

    tracing::debug!(damping, samples, pages = graph.len(), "sampling pagerank");

    let visits = walk(graph, damping, samples, rng);
    Ok(from_visits(graph, &visits, samples))
}

/// Estimate PageRank from `workers` independent walks run on the rayon pool.
///
/// The visit budget is split as evenly as possible; worker `w` draws from
/// its own `StdRng` seeded from `seed` and `w`, so the result depends only
/// on the arguments and not on scheduling. Visit counts are merged after
/// every walk has finished.
pub fn sample_parallel(
    graph: &Graph,
    damping: f64,
    samples: usize,
    workers: usize,
    seed: u64,
) -> Result<Distribution> {
    check_damping(damping)?;
    check_nonzero("samples", samples)?;
    check_nonzero("workers", workers)?;

    tracing::debug!(damping, samples, workers, pages = graph.len(), "sampling pagerank in parallel");

    let base = samples / workers;
    let extra = samples % workers;

    let per_worker: Vec<Vec<u64>> = (0..workers)
        .into_par_iter()
        .map(|w| {
            let steps = base + usize::from(w < extra);
            if steps == 0 {
                return Vec::new();
            }
            let mut rng = StdRng::seed_from_u64(worker_seed(seed, w));
            walk(graph, damping, steps, &mut rng)
        })
        .collect();

    let mut visits = vec![0u64; graph.len()];
    for counts in per_worker.iter().filter(|c| !c.is_empty()) {
        for (total, &c) in visits.iter_mut().zip(counts) {
            *total += c;
        }
    }

    Ok(from_visits(graph, &visits, samples))
}

fn worker_seed(seed: u64, worker: usize) -> u64 {
    seed ^ (worker as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Run one walk of `steps` visits (initial draw included) and count them.
fn walk<R>(graph: &Graph, damping: f64, steps: usize, rng: &mut R) -> Vec<u64>
where
    R: Rng + ?Sized,
{
    let n = graph.len();
    let mut visits = vec![0u64; n];
    let mut row = vec![0.0; n];

    let mut current = rng.gen_range(0..n);
    visits[current] += 1;

    for _ in 1..steps {
        fill_row(graph, current, damping, &mut row);
        current = draw(&row, rng.gen::<f64>());
        visits[current] += 1;
    }

    visits
}

/// Invert the cumulative distribution of `row` at `u ∈ [0, 1)`.
fn draw(row: &[f64], u: f64) -> usize {
    let mut cumulative = 0.0;
    for (i, &p) in row.iter().enumerate() {
        cumulative += p;
        if u < cumulative {
            return i;
        }
    }
    // Rounding can leave the running sum just under 1.
    row.iter().rposition(|&p| p > 0.0).unwrap_or(row.len() - 1)
}

fn from_visits(graph: &Graph, visits: &[u64], samples: usize) -> Distribution {
    let total = samples as f64;
    let values = visits.iter().map(|&v| v as f64 / total).collect();
    Distribution::new(graph.page_index().clone(), values)
}

#[cfg(test)]
mod tests {
    use crate::error::RankError;

    use super::*;

    fn mutual() -> Graph {
        Graph::from_corpus([("a", vec!["b"]), ("b", vec!["a"])]).unwrap()
    }

    #[test]
    fn test_draw_inverts_cdf() {
        let row = [0.2, 0.3, 0.5];
        assert_eq!(draw(&row, 0.0), 0);
        assert_eq!(draw(&row, 0.19), 0);
        assert_eq!(draw(&row, 0.2), 1);
        assert_eq!(draw(&row, 0.49), 1);
        assert_eq!(draw(&row, 0.99), 2);
    }

    #[test]
    fn test_draw_falls_back_on_rounding_shortfall() {
        let row = [0.5, 0.499_999_999, 0.0];
        assert_eq!(draw(&row, 0.999_999_999_9), 1);
    }

    #[test]
    fn test_single_sample_is_initial_draw() {
        let graph = mutual();
        let mut rng = StdRng::seed_from_u64(7);
        let dist = sample(&graph, 0.85, 1, &mut rng).unwrap();

        let values = dist.values();
        assert!(values.contains(&1.0));
        assert!(values.contains(&0.0));
    }

    #[test]
    fn test_visits_sum_to_samples() {
        let graph = mutual();
        let mut rng = StdRng::seed_from_u64(42);
        let visits = walk(&graph, 0.85, 999, &mut rng);
        assert_eq!(visits.iter().sum::<u64>(), 999);
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let graph = mutual();
        let a = sample(&graph, 0.85, 500, &mut StdRng::seed_from_u64(3)).unwrap();
        let b = sample(&graph, 0.85, 500, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(a.values(), b.values());
    }

    #[test]
    fn test_zero_samples_rejected() {
        let graph = mutual();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            sample(&graph, 0.85, 0, &mut rng),
            Err(RankError::InvalidParameter { name: "samples", .. })
        ));
    }

    #[test]
    fn test_parallel_is_deterministic_and_complete() {
        let graph = mutual();
        let a = sample_parallel(&graph, 0.85, 10_001, 4, 11).unwrap();
        let b = sample_parallel(&graph, 0.85, 10_001, 4, 11).unwrap();

        assert_eq!(a.values(), b.values());
        assert!((a.sum() - 1.0).abs() < 1e-12);
        assert!((a.get("a").unwrap() - 0.5).abs() < 0.02);
    }

    #[test]
    fn test_more_workers_than_samples() {
        let graph = mutual();
        let dist = sample_parallel(&graph, 0.85, 3, 8, 1).unwrap();
        assert!((dist.sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let graph = mutual();
        assert!(matches!(
            sample_parallel(&graph, 0.85, 10, 0, 1),
            Err(RankError::InvalidParameter { name: "workers", .. })
        ));
    }
}
