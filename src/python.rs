//! Python bindings.
//!
//! Corpora arrive as `dict[str, set[str]]`. Pages are indexed in sorted
//! order so a given seed yields the same walk regardless of dict order.

use std::collections::{HashMap, HashSet};

use pyo3::exceptions::{PyKeyError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{DEFAULT_EPSILON, DEFAULT_MAX_SWEEPS};
use crate::{Distribution, Graph, IterativeEstimator, RankError};

impl From<RankError> for PyErr {
    fn from(err: RankError) -> Self {
        let message = err.to_string();
        match err {
            RankError::UnknownStartPage(page) => PyKeyError::new_err(page),
            RankError::DidNotConverge { .. } => PyRuntimeError::new_err(message),
            RankError::EmptyGraph | RankError::InvalidParameter { .. } => {
                PyValueError::new_err(message)
            }
        }
    }
}

fn build_graph(corpus: HashMap<String, HashSet<String>>) -> crate::Result<Graph> {
    let mut pages: Vec<(String, HashSet<String>)> = corpus.into_iter().collect();
    pages.sort_by(|a, b| a.0.cmp(&b.0));
    Graph::from_corpus(pages)
}

fn to_dict(py: Python<'_>, dist: &Distribution) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new_bound(py);
    for (page, p) in dist.iter() {
        dict.set_item(page, p)?;
    }
    Ok(dict.into())
}

/// Probability distribution over the next page visited from `page`.
#[pyfunction]
#[pyo3(signature = (corpus, page, damping_factor=0.85))]
fn transition_model(
    py: Python<'_>,
    corpus: HashMap<String, HashSet<String>>,
    page: String,
    damping_factor: f64,
) -> PyResult<Py<PyDict>> {
    let dist = py.allow_threads(|| {
        let graph = build_graph(corpus)?;
        crate::transition(&graph, &page, damping_factor)
    })?;
    to_dict(py, &dist)
}

/// PageRank estimated from a random walk of `n` visits.
///
/// Pass `seed` for a reproducible walk.
#[pyfunction]
#[pyo3(signature = (corpus, damping_factor=0.85, n=10000, seed=None))]
fn sample_pagerank(
    py: Python<'_>,
    corpus: HashMap<String, HashSet<String>>,
    damping_factor: f64,
    n: usize,
    seed: Option<u64>,
) -> PyResult<Py<PyDict>> {
    let dist = py.allow_threads(|| {
        let graph = build_graph(corpus)?;
        let mut rng = StdRng::seed_from_u64(seed.unwrap_or_else(rand::random));
        crate::sample(&graph, damping_factor, n, &mut rng)
    })?;
    to_dict(py, &dist)
}

/// PageRank computed by power iteration.
///
/// Raises `RuntimeError` if `max_sweeps` sweeps pass without convergence.
#[pyfunction]
#[pyo3(signature = (corpus, damping_factor=0.85, epsilon=DEFAULT_EPSILON, max_sweeps=DEFAULT_MAX_SWEEPS))]
fn iterate_pagerank(
    py: Python<'_>,
    corpus: HashMap<String, HashSet<String>>,
    damping_factor: f64,
    epsilon: f64,
    max_sweeps: usize,
) -> PyResult<Py<PyDict>> {
    let dist = py.allow_threads(|| {
        let graph = build_graph(corpus)?;
        let estimator = IterativeEstimator::new(&graph, damping_factor)?;
        let converged = estimator.run(epsilon, max_sweeps)?;
        Ok::<_, RankError>(converged.ranks)
    })?;
    to_dict(py, &dist)
}

/// Python module definition.
#[pymodule]
fn _surfrank(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(transition_model, m)?)?;
    m.add_function(wrap_pyfunction!(sample_pagerank, m)?)?;
    m.add_function(wrap_pyfunction!(iterate_pagerank, m)?)?;

    // Version info
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
