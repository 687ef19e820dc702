//! Sentence encoding: token vectors in, one pooled unit vector out.
//!
//! - [`SentenceEncoder`] mean-pools and L2-normalizes whatever a
//!   [`TokenVectorSource`] streams for a sentence.
//! - [`StubSource`] is a deterministic hashed-token source (no model files).
//! - [`bert`] runs a BERT-family model through candle.

/// BERT token-vector source.
pub mod bert;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod encoder;
mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
/// Mean pooling and normalization primitives.
pub mod pooling;
mod source;
mod stub;
mod types;
/// Tokenizer loading helpers.
pub mod utils;


pub use bert::{BertConfig, BertSource};
pub use encoder::SentenceEncoder;
pub use error::EmbeddingError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockTokenSource;
pub use pooling::{MeanPooler, l2_normalize};
pub use source::TokenVectorSource;
pub use stub::StubSource;
pub use types::Embedding;
pub(crate) use types::max_abs;
