//! One-step transition probabilities of the random surfer.
//!
//! With probability `damping` the surfer follows one of the current page's
//! links uniformly at random; otherwise it jumps to any page in the corpus.
//! A dangling page is treated as linking to every page, so its row is
//! exactly uniform regardless of damping.

use crate::distribution::Distribution;
use crate::error::{check_damping, RankError, Result};
use crate::graph::Graph;

/// Probability distribution over the next page, given the current `page`.
///
/// # Errors
///
/// - [`RankError::UnknownStartPage`] if `page` is not in `graph`
/// - [`RankError::InvalidParameter`] if `damping` is outside `[0, 1]`
pub fn transition(graph: &Graph, page: &str, damping: f64) -> Result<Distribution> {
    check_damping(damping)?;
    let current = graph
        .index_of(page)
        .ok_or_else(|| RankError::UnknownStartPage(page.to_owned()))?;

    let mut row = vec![0.0; graph.len()];
    fill_row(graph, current, damping, &mut row);
    Ok(Distribution::new(graph.page_index().clone(), row))
}

/// Write the transition row of page `current` into `row`.
///
/// Inputs are assumed validated; `row.len()` must equal `graph.len()`.
pub(crate) fn fill_row(graph: &Graph, current: usize, damping: f64, row: &mut [f64]) {
    let n = graph.len() as f64;
    let links = graph.outbound(current);

    if links.is_empty() {
        row.fill(1.0 / n);
        return;
    }

    row.fill((1.0 - damping) / n);
    let follow = damping / links.len() as f64;
    for &target in links {
        row[target] += follow;
    }
}
