//! Error types for rank estimation.

use thiserror::Error;

use crate::distribution::Distribution;

/// Result type alias using RankError
pub type Result<T> = std::result::Result<T, RankError>;

/// Everything the estimators can report back to a caller.
///
/// All variants are detected synchronously; nothing here is transient, so
/// callers should never retry the same call expecting a different outcome.
#[derive(Debug, Error)]
pub enum RankError {
    #[error("graph contains no pages")]
    EmptyGraph,

    #[error("invalid {name} ({value}): {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("page not in graph: {0}")]
    UnknownStartPage(String),

    /// The sweep bound was reached before the ranks settled.
    #[error("no convergence after {sweeps} sweeps (last max delta {delta:e})")]
    DidNotConverge {
        sweeps: usize,
        delta: f64,
        estimate: Distribution,
    },
}

impl RankError {
    pub(crate) fn invalid(
        name: &'static str,
        value: impl ToString,
        reason: &'static str,
    ) -> Self {
        RankError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Take the best available estimate out of a `DidNotConverge` error.
    ///
    /// Returns `None` for every other variant.
    pub fn into_estimate(self) -> Option<Distribution> {
        match self {
            RankError::DidNotConverge { estimate, .. } => Some(estimate),
            _ => None,
        }
    }
}

/// Damping must be a probability.
pub(crate) fn check_damping(damping: f64) -> Result<()> {
    if damping.is_finite() && (0.0..=1.0).contains(&damping) {
        Ok(())
    } else {
        Err(RankError::invalid("damping", damping, "must lie in [0, 1]"))
    }
}

pub(crate) fn check_epsilon(epsilon: f64) -> Result<()> {
    if epsilon.is_finite() && epsilon > 0.0 {
        Ok(())
    } else {
        Err(RankError::invalid("epsilon", epsilon, "must be finite and > 0"))
    }
}

pub(crate) fn check_nonzero(name: &'static str, value: usize) -> Result<()> {
    if value >= 1 {
        Ok(())
    } else {
        Err(RankError::invalid(name, value, "must be at least 1"))
    }
}
