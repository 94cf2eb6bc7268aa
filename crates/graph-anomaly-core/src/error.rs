//! Error types for anomaly injection.
//!
//! Every failure is detected before any mutation happens and is surfaced
//! immediately. Nothing in this crate retries: sampling is exact given valid
//! sizes, so the only failures are caller errors.

use thiserror::Error;

/// Result type alias for injection and sparse-matrix operations.
pub type AnomalyResult<T> = Result<T, AnomalyError>;

/// Error type for anomaly injection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnomalyError {
    // ========== Argument Errors ==========
    /// A sampling step needs more distinct items than the population holds.
    #[error("Invalid argument: cannot sample {requested} distinct {what} from a population of {available}")]
    SampleTooLarge {
        what: &'static str,
        requested: usize,
        available: usize,
    },

    /// Any other invalid parameter (zero sizes, non-square adjacency).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ========== Matrix Errors ==========
    /// Compressed-row arrays do not describe a valid matrix.
    #[error("Invalid sparse matrix: {0}")]
    InvalidMatrix(String),
}

impl AnomalyError {
    /// True for errors caused by bad call parameters rather than bad data.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            AnomalyError::SampleTooLarge { .. } | AnomalyError::InvalidArgument(_)
        )
    }
}

/// Reject a draw of `requested` distinct items from `available`.
pub(crate) fn check_sample_size(
    what: &'static str,
    requested: usize,
    available: usize,
) -> AnomalyResult<()> {
    if requested > available {
        return Err(AnomalyError::SampleTooLarge {
            what,
            requested,
            available,
        });
    }
    Ok(())
}

static_assertions::assert_impl_all!(AnomalyError: Send, Sync, std::error::Error);
