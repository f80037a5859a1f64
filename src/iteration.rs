//! PageRank by power iteration.
//!
//! Every sweep computes a complete new rank vector from the previous one:
//!
//! ```text
//! rank'(p) = (1 - d) / N + d * Σ_{q → p} rank(q) / outDegree(q)
//! ```
//!
//! Dangling pages link to every page, so their mass is spread evenly as a
//! single `d * Σ rank(dangling) / N` term instead of N explicit in-edges.
//! Iteration stops once the largest per-page change in one sweep drops
//! below `epsilon`. Pages within a sweep are updated in parallel with Rayon.

use std::borrow::Cow;
use std::sync::Arc;

use rayon::prelude::*;

use crate::config::DEFAULT_MAX_SWEEPS;
use crate::distribution::Distribution;
use crate::error::{check_damping, check_epsilon, check_nonzero, RankError, Result};
use crate::graph::Graph;

/// Compute PageRank by iterating to within `epsilon`, bounded by the
/// default sweep limit.
///
/// # Errors
///
/// - `InvalidParameter` for damping outside `[0, 1]` or `epsilon <= 0`
/// - `DidNotConverge` if the sweep limit is reached first
pub fn iterate(graph: &Graph, damping: f64, epsilon: f64) -> Result<Distribution> {
    IterativeEstimator::new(graph, damping)?
        .run(epsilon, DEFAULT_MAX_SWEEPS)
        .map(|c| c.ranks)
}

/// Outcome of a converged run.
#[derive(Debug, Clone)]
pub struct Convergence {
    pub ranks: Distribution,
    /// Sweeps performed, the converging one included.
    pub sweeps: usize,
    /// Max per-page change in the final sweep.
    pub delta: f64,
}

/// Power-iteration state precomputed from a graph.
pub struct IterativeEstimator<'g> {
    graph: &'g Graph,
    in_edges: Vec<Vec<usize>>, // incoming links per page, dangling pages excluded
    out_degree: Vec<usize>,
    dangling: Vec<usize>,
    damping: f64,
}

impl<'g> IterativeEstimator<'g> {
    /// Precompute in-edges and out-degrees for `graph`.
    pub fn new(graph: &'g Graph, damping: f64) -> Result<Self> {
        check_damping(damping)?;

        let n = graph.len();
        let mut in_edges = vec![Vec::new(); n];
        let mut out_degree = vec![0usize; n];

        for src in 0..n {
            let links = graph.outbound(src);
            out_degree[src] = links.len();
            for &tgt in links {
                in_edges[tgt].push(src);
            }
        }

        Ok(Self {
            graph,
            in_edges,
            out_degree,
            dangling: graph.dangling_indices(),
            damping,
        })
    }

    /// Sweep from the uniform vector until converged or `max_sweeps` is hit.
    ///
    /// # Errors
    ///
    /// `DidNotConverge` carries the normalized estimate after the last sweep.
    pub fn run(&self, epsilon: f64, max_sweeps: usize) -> Result<Convergence> {
        check_epsilon(epsilon)?;
        check_nonzero("max_sweeps", max_sweeps)?;

        let n = self.graph.len();
        tracing::debug!(damping = self.damping, epsilon, max_sweeps, pages = n, "iterating pagerank");

        let mut ranks = vec![1.0 / n as f64; n];
        let mut next = vec![0.0; n];
        let mut delta = f64::INFINITY;

        for sweep in 1..=max_sweeps {
            delta = self.sweep(&ranks, &mut next);
            std::mem::swap(&mut ranks, &mut next);
            tracing::trace!(sweep, delta, "pagerank sweep");

            if delta < epsilon {
                tracing::info!(sweeps = sweep, delta, "pagerank converged");
                return Ok(Convergence {
                    ranks: self.finish(ranks),
                    sweeps: sweep,
                    delta,
                });
            }
        }

        tracing::warn!(sweeps = max_sweeps, delta, epsilon, "pagerank did not converge");
        Err(RankError::DidNotConverge {
            sweeps: max_sweeps,
            delta,
            estimate: self.finish(ranks),
        })
    }

    /// Apply one more sweep to `ranks` and return the result, unnormalized.
    ///
    /// At a fixed point the output differs from the input by less than the
    /// epsilon used to reach it. `ranks` may come from another graph over
    /// the same pages; values are matched by page name.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `ranks` does not cover exactly this graph's pages.
    pub fn step(&self, ranks: &Distribution) -> Result<Distribution> {
        let index = self.graph.page_index();
        let aligned: Cow<'_, [f64]> = if Arc::ptr_eq(index, ranks.page_index()) {
            Cow::Borrowed(ranks.values())
        } else {
            let mismatch = || {
                RankError::invalid(
                    "ranks",
                    format!("{} pages", ranks.len()),
                    "must cover exactly the pages of the graph",
                )
            };
            if ranks.len() != index.len() {
                return Err(mismatch());
            }
            let by_name: Option<Vec<f64>> = index.names().map(|page| ranks.get(page)).collect();
            Cow::Owned(by_name.ok_or_else(mismatch)?)
        };

        let mut next = vec![0.0; self.graph.len()];
        self.sweep(&aligned, &mut next);
        Ok(Distribution::new(index.clone(), next))
    }

    /// Write the next rank vector into `next`, reading only `ranks`, and
    /// return the largest per-page change.
    fn sweep(&self, ranks: &[f64], next: &mut [f64]) -> f64 {
        let n = self.graph.len() as f64;
        let teleport = (1.0 - self.damping) / n;

        let dangling_sum: f64 = self.dangling.iter().map(|&i| ranks[i]).sum();
        let dangling_contrib = self.damping * dangling_sum / n;

        next.par_iter_mut().enumerate().for_each(|(i, new_rank)| {
            let incoming: f64 = self.in_edges[i]
                .iter()
                .map(|&j| ranks[j] / self.out_degree[j] as f64)
                .sum();

            *new_rank = teleport + dangling_contrib + self.damping * incoming;
        });

        ranks
            .par_iter()
            .zip(next.par_iter())
            .map(|(old, new)| (old - new).abs())
            .reduce(|| 0.0, f64::max)
    }

    fn finish(&self, ranks: Vec<f64>) -> Distribution {
        Distribution::normalized(self.graph.page_index().clone(), ranks)
    }
}
