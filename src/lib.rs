//! # SurfRank Core
//!
//! Importance ranking for a directed link corpus, modelled as a damped
//! random surfer and estimated two independent ways.
//!
//! ## Features
//!
//! - **Transition model**: one-step next-page probabilities, with dangling
//!   pages treated as linking to the whole corpus
//! - **Sampling**: Monte Carlo walk driven by a caller-supplied RNG, with
//!   optional parallel walks over Rayon
//! - **Iteration**: synchronous power iteration to a global max-delta
//!   threshold, bounded by a sweep limit
//! - **Python bindings** (feature `python`): `transition_model`,
//!   `sample_pagerank` and `iterate_pagerank` over `dict[str, set[str]]`
//!
//! ## Usage
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use surfrank_core::{iterate, sample, Graph};
//!
//! let graph = Graph::from_corpus([
//!     ("1.html", vec!["2.html"]),
//!     ("2.html", vec!["1.html", "3.html"]),
//!     ("3.html", vec![]),
//! ])?;
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let sampled = sample(&graph, 0.85, 10_000, &mut rng)?;
//! let iterated = iterate(&graph, 0.85, 0.001)?;
//!
//! assert!(sampled.max_abs_diff(&iterated) < 0.05);
//! # Ok::<(), surfrank_core::RankError>(())
//! ```

mod config;
mod distribution;
mod error;
mod graph;
mod iteration;
mod rank;
mod sampling;
mod transition;

#[cfg(feature = "python")]
mod python;

pub use config::{
    RankConfig, DEFAULT_DAMPING, DEFAULT_EPSILON, DEFAULT_MAX_SWEEPS, DEFAULT_SAMPLES,
};
pub use distribution::Distribution;
pub use error::{RankError, Result};
pub use graph::{Graph, GraphBuilder, GraphStats, PageIndex};
pub use iteration::{iterate, Convergence, IterativeEstimator};
pub use rank::{rank_corpus, RankReport};
pub use sampling::{sample, sample_parallel};
pub use transition::transition;
