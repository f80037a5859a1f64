//! Run both estimators over one corpus graph.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::RankConfig;
use crate::distribution::Distribution;
use crate::error::Result;
use crate::graph::Graph;
use crate::iteration::IterativeEstimator;
use crate::sampling::{sample, sample_parallel};

/// Both estimates for one graph, plus how far apart they ended up.
#[derive(Debug, Clone)]
pub struct RankReport {
    pub sampled: Distribution,
    pub iterated: Distribution,
    /// Seed the sampling walk actually used.
    pub seed: u64,
    /// Sweeps power iteration needed to converge.
    pub sweeps: usize,
    /// Largest per-page gap between the two estimates.
    pub max_deviation: f64,
}

/// Estimate PageRank for `graph` by sampling and by iteration.
///
/// The graph is shared read-only by both estimators. When `config.seed` is
/// unset a seed is drawn from the thread RNG and returned in the report so
/// the sampled estimate can be reproduced.
pub fn rank_corpus(graph: &Graph, config: &RankConfig) -> Result<RankReport> {
    config.validate()?;

    let seed = config.seed.unwrap_or_else(rand::random);
    let sampled = if config.workers == 1 {
        let mut rng = StdRng::seed_from_u64(seed);
        sample(graph, config.damping, config.samples, &mut rng)?
    } else {
        sample_parallel(graph, config.damping, config.samples, config.workers, seed)?
    };

    let converged = IterativeEstimator::new(graph, config.damping)?
        .run(config.epsilon, config.max_sweeps)?;

    let max_deviation = sampled.max_abs_diff(&converged.ranks);
    tracing::info!(
        pages = graph.len(),
        seed,
        sweeps = converged.sweeps,
        max_deviation,
        "ranked corpus"
    );

    Ok(RankReport {
        sampled,
        iterated: converged.ranks,
        seed,
        sweeps: converged.sweeps,
        max_deviation,
    })
}
