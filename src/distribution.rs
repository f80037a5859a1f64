//! Probability distributions over the pages of a graph.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;

use crate::graph::PageIndex;

/// Immutable mapping from page to probability.
///
/// Values are non-negative and sum to 1 within floating tolerance. A
/// distribution shares the [`PageIndex`] of the graph it was computed on.
#[derive(Clone)]
pub struct Distribution {
    index: Arc<PageIndex>,
    values: Vec<f64>,
}

impl Distribution {
    pub(crate) fn new(index: Arc<PageIndex>, values: Vec<f64>) -> Self {
        debug_assert_eq!(index.len(), values.len());
        Self { index, values }
    }

    /// Scale `values` so they sum to 1.
    pub(crate) fn normalized(index: Arc<PageIndex>, mut values: Vec<f64>) -> Self {
        let total: f64 = values.iter().sum();
        if total > 0.0 {
            values.iter_mut().for_each(|v| *v /= total);
        }
        Self::new(index, values)
    }

    /// Probability of `page`, or `None` if it is not in the corpus.
    pub fn get(&self, page: &str) -> Option<f64> {
        self.index.position(page).map(|i| self.values[i])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(page, probability)` pairs in page index order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, f64)> + '_ {
        self.index.names().zip(self.values.iter().copied())
    }

    pub(crate) fn page_index(&self) -> &Arc<PageIndex> {
        &self.index
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Largest per-page absolute difference from `other`.
    ///
    /// Pages are matched by name, so the two distributions may come from
    /// different graphs; a page missing from `other` counts as probability 0.
    pub fn max_abs_diff(&self, other: &Distribution) -> f64 {
        if Arc::ptr_eq(&self.index, &other.index) {
            return self
                .values
                .iter()
                .zip(&other.values)
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f64::max);
        }
        self.iter()
            .map(|(page, p)| (p - other.get(page).unwrap_or(0.0)).abs())
            .fold(0.0, f64::max)
    }

    /// Pages sorted by descending probability, ties broken by page name.
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self.iter().collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });
        ranked
    }

    pub fn to_map(&self) -> HashMap<String, f64> {
        self.iter().map(|(page, p)| (page.to_owned(), p)).collect()
    }
}

impl fmt::Debug for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
