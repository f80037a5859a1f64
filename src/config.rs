//! Estimator configuration.
//!
//! Every field has a default, so a partial document (for example
//! `{"epsilon": 1e-6}`) deserializes into a complete config.

use serde::{Deserialize, Serialize};

use crate::error::{check_damping, check_epsilon, check_nonzero, Result};

pub const DEFAULT_DAMPING: f64 = 0.85;
pub const DEFAULT_SAMPLES: usize = 10_000;
pub const DEFAULT_EPSILON: f64 = 0.001;
pub const DEFAULT_MAX_SWEEPS: usize = 10_000;

/// Parameters shared by both estimators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RankConfig {
    /// Probability of following a link rather than jumping anywhere.
    pub damping: f64,
    /// Visits recorded by the sampling estimator.
    pub samples: usize,
    /// Convergence threshold on the largest per-page change in one sweep.
    pub epsilon: f64,
    /// Upper bound on power-iteration sweeps.
    pub max_sweeps: usize,
    /// Independent walks the sample budget is split across.
    pub workers: usize,
    /// Seed for the sampling walks; `None` draws one from OS entropy.
    pub seed: Option<u64>,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            samples: DEFAULT_SAMPLES,
            epsilon: DEFAULT_EPSILON,
            max_sweeps: DEFAULT_MAX_SWEEPS,
            workers: 1,
            seed: None,
        }
    }
}

impl RankConfig {
    pub fn validate(&self) -> Result<()> {
        check_damping(self.damping)?;
        check_nonzero("samples", self.samples)?;
        check_epsilon(self.epsilon)?;
        check_nonzero("max_sweeps", self.max_sweeps)?;
        check_nonzero("workers", self.workers)?;
        Ok(())
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
