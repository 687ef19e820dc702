//! Search error types.

use thiserror::Error;

/// Errors from ranking candidates against a query.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Query and first candidate differ in dimension.
    #[error("query has dimension {query}, candidates have dimension {candidate}")]
    DimensionMismatch { query: usize, candidate: usize },

    /// Heterogeneous, zero-dimensional or non-finite candidate set.
    #[error("unsupported candidate set: {reason}")]
    UnsupportedNormalization { reason: String },

    /// `minimum_similarity` is NaN or infinite.
    #[error("minimum similarity must be a finite number, got {value}")]
    InvalidThreshold { value: f64 },

    /// The batched tensor computation failed.
    #[error("similarity computation failed: {reason}")]
    ComputationFailed { reason: String },
}

impl From<candle_core::Error> for SearchError {
    fn from(err: candle_core::Error) -> Self {
        SearchError::ComputationFailed {
            reason: err.to_string(),
        }
    }
}

/// Result alias for search operations.
pub type SearchOutcome<T> = Result<T, SearchError>;
