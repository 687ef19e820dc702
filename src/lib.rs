//! Sentence embeddings and exact similarity search.
//!
//! # Public API Surface
//!
//! ## Encoding
//! - [`SentenceEncoder`] - mean pooling + L2 normalization over a [`TokenVectorSource`]
//! - [`StubSource`], [`BertSource`] - token-vector backends
//! - [`Embedding`], [`EmbeddingError`]
//!
//! ## Search
//! - [`SearchEngine`], [`SearchConfig`], [`SearchStrategy`] - point-wise / batched ranking
//! - [`SearchResult`], [`SearchError`]
//!
//! ## Service
//! - [`EmbeddingService`], [`ModelInfo`], [`ServiceError`] - encoder and engine together
//!
//! ## Utilities
//! - [`Config`], [`ConfigError`] - `SEMBED_*` environment configuration
//! - [`eval`] - Precision@K, MRR and score summaries
//!
//! ## Test/Mock Support
//! [`MockTokenSource`] is available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod embedding;
pub mod eval;
pub mod search;
pub mod service;

pub use config::{Config, ConfigError};
pub use constants::{
    DEFAULT_OPTIMIZATION_THRESHOLD, DimValidationError, NORM_EPSILON, validate_embedding_dim,
};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockTokenSource;
pub use embedding::{
    BertConfig, BertSource, Embedding, EmbeddingError, SentenceEncoder, StubSource,
    TokenVectorSource,
};
pub use eval::{PrecisionAtK, ScoreSummary, mean_reciprocal_rank, precision_at_k, reciprocal_rank};
pub use search::{
    SearchConfig, SearchEngine, SearchError, SearchResult, SearchStrategy, cosine_similarity,
};
pub use service::{EmbeddingService, ModelInfo, ServiceError};
