//! Immutable link graph over a corpus of pages.
//!
//! Pages are identified by name and indexed densely in declaration order.
//! The estimators work on indices; names only come back out through
//! [`PageIndex`] when a [`Distribution`](crate::Distribution) is read.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use string_interner::{DefaultStringInterner, DefaultSymbol};

use crate::error::{RankError, Result};

/// Bidirectional mapping between page names and dense indices.
///
/// Shared (via `Arc`) between a graph and every distribution computed
/// over it, so distributions stay cheap to build.
#[derive(Debug)]
pub struct PageIndex {
    names: Vec<String>,
    lookup: FxHashMap<String, usize>,
}

impl PageIndex {
    fn new(names: Vec<String>) -> Self {
        let lookup = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self { names, lookup }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Dense index of `page`, if it belongs to the corpus.
    pub fn position(&self, page: &str) -> Option<usize> {
        self.lookup.get(page).copied()
    }

    /// Name of the page at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn name(&self, index: usize) -> &str {
        &self.names[index]
    }

    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }
}

/// Summary counts gathered while the graph was built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphStats {
    pub pages: usize,
    pub links: usize,
    pub dangling_pages: usize,
    pub self_links_dropped: usize,
    pub external_links_dropped: usize,
    pub max_in_degree: usize,
    pub max_out_degree: usize,
}

/// Read-only corpus graph: every page and the set of pages it links to.
///
/// Invariants upheld by construction:
/// - at least one page;
/// - every link target is itself a page of the graph;
/// - no page links to itself, and no link appears twice.
#[derive(Debug, Clone)]
pub struct Graph {
    index: Arc<PageIndex>,
    outbound: Vec<Vec<usize>>,
    stats: GraphStats,
}

impl Graph {
    /// Build a graph from `(page, links)` pairs.
    ///
    /// Pages are indexed in iteration order. Self-links and links to pages
    /// that are never declared are dropped.
    pub fn from_corpus<I, P, L, T>(corpus: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, L)>,
        P: AsRef<str>,
        L: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut builder = GraphBuilder::new();
        for (page, links) in corpus {
            builder.add_page(page.as_ref(), links)?;
        }
        builder.build()
    }

    /// Number of pages in the corpus (always at least 1).
    pub fn len(&self) -> usize {
        self.outbound.len()
    }

    /// Always `false` for a built graph; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.outbound.is_empty()
    }

    pub fn contains(&self, page: &str) -> bool {
        self.index.position(page).is_some()
    }

    pub fn index_of(&self, page: &str) -> Option<usize> {
        self.index.position(page)
    }

    pub fn pages(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.index.names()
    }

    /// Outbound links of `page` by name, or `None` if it is not in the corpus.
    pub fn links(&self, page: &str) -> Option<impl Iterator<Item = &str> + '_> {
        let i = self.index.position(page)?;
        Some(self.outbound[i].iter().map(|&j| self.index.name(j)))
    }

    /// A dangling page has no outbound links and is treated as linking to
    /// every page in the corpus, itself included.
    pub fn is_dangling(&self, page: &str) -> Option<bool> {
        self.index_of(page).map(|i| self.outbound[i].is_empty())
    }

    pub fn page_index(&self) -> &Arc<PageIndex> {
        &self.index
    }

    pub fn stats(&self) -> &GraphStats {
        &self.stats
    }

    pub(crate) fn outbound(&self, page: usize) -> &[usize] {
        &self.outbound[page]
    }

    pub(crate) fn dangling_indices(&self) -> Vec<usize> {
        (0..self.len())
            .filter(|&i| self.outbound[i].is_empty())
            .collect()
    }
}

/// Incremental graph construction.
///
/// Link targets may name pages that are declared later; names are interned
/// on first sight and resolved against the declared set in [`build`].
///
/// [`build`]: GraphBuilder::build
#[derive(Default)]
pub struct GraphBuilder {
    interner: DefaultStringInterner,
    declared: FxHashMap<DefaultSymbol, usize>,
    order: Vec<DefaultSymbol>,
    raw_links: Vec<Vec<DefaultSymbol>>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `page` with its raw link targets.
    ///
    /// Declaring the same page twice merges the two link sets.
    pub fn add_page<L, T>(&mut self, page: &str, links: L) -> Result<&mut Self>
    where
        L: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        if page.is_empty() {
            return Err(RankError::invalid("page", "\"\"", "page names must be non-empty"));
        }

        let symbol = self.interner.get_or_intern(page);
        let slot = match self.declared.get(&symbol) {
            Some(&slot) => slot,
            None => {
                let slot = self.order.len();
                self.declared.insert(symbol, slot);
                self.order.push(symbol);
                self.raw_links.push(Vec::new());
                slot
            }
        };

        for target in links {
            let target = self.interner.get_or_intern(target.as_ref());
            self.raw_links[slot].push(target);
        }

        Ok(self)
    }

    /// Resolve links against the declared pages and freeze the graph.
    pub fn build(self) -> Result<Graph> {
        if self.order.is_empty() {
            return Err(RankError::EmptyGraph);
        }

        let n = self.order.len();
        let mut stats = GraphStats {
            pages: n,
            ..GraphStats::default()
        };
        let mut in_degree = vec![0usize; n];
        let mut outbound = Vec::with_capacity(n);

        for (src, targets) in self.raw_links.iter().enumerate() {
            let mut resolved: Vec<usize> = Vec::with_capacity(targets.len());
            for symbol in targets {
                match self.declared.get(symbol) {
                    Some(&dst) if dst == src => stats.self_links_dropped += 1,
                    Some(&dst) => resolved.push(dst),
                    None => stats.external_links_dropped += 1,
                }
            }
            resolved.sort_unstable();
            resolved.dedup();

            for &dst in &resolved {
                in_degree[dst] += 1;
            }
            stats.links += resolved.len();
            stats.max_out_degree = stats.max_out_degree.max(resolved.len());
            if resolved.is_empty() {
                stats.dangling_pages += 1;
            }
            outbound.push(resolved);
        }
        stats.max_in_degree = in_degree.iter().copied().max().unwrap_or(0);

        let mut names = Vec::with_capacity(n);
        for &symbol in &self.order {
            // Every declared symbol came from this interner.
            let name = self.interner.resolve(symbol).unwrap_or_default();
            names.push(name.to_owned());
        }

        tracing::debug!(
            pages = stats.pages,
            links = stats.links,
            dangling = stats.dangling_pages,
            self_links_dropped = stats.self_links_dropped,
            external_links_dropped = stats.external_links_dropped,
            "built link graph"
        );

        Ok(Graph {
            index: Arc::new(PageIndex::new(names)),
            outbound,
            stats,
        })
    }
}
