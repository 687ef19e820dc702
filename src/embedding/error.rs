//! Embedding error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from encoding a sentence or loading a token-vector source.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// The model could not be constructed or loaded.
    #[error("embedding model unavailable: {reason}")]
    ModelUnavailable { reason: String },

    /// Model files are not provisioned.
    #[error("embedding model assets not present at: {path}")]
    MissingAssets { path: PathBuf },

    /// The sentence was empty.
    #[error("cannot embed an empty sentence")]
    EmptyInput,

    /// The source reports a zero-dimensional output.
    #[error("embedding model reports invalid dimension {dim}")]
    InvalidDimension { dim: usize },

    /// A non-empty sentence yielded zero token vectors.
    #[error("tokenization produced no token vectors")]
    NoTokensProduced,

    /// A streamed token vector did not match the model dimension.
    #[error("token vector has dimension {actual}, model dimension is {expected}")]
    TokenDimensionMismatch { expected: usize, actual: usize },

    /// The source rejected the input text.
    #[error("malformed input: {reason}")]
    MalformedInput { reason: String },

    /// The tokenizer failed.
    #[error("tokenization failed: {reason}")]
    TokenizationFailed { reason: String },

    /// The forward pass failed.
    #[error("embedding inference failed: {reason}")]
    InferenceFailed { reason: String },

    /// Model configuration is invalid.
    #[error("invalid model configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl From<candle_core::Error> for EmbeddingError {
    fn from(err: candle_core::Error) -> Self {
        EmbeddingError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for EmbeddingError {
    fn from(err: std::io::Error) -> Self {
        EmbeddingError::ModelUnavailable {
            reason: err.to_string(),
        }
    }
}
