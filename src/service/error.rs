use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::search::SearchError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("search error: {0}")]
    Search(#[from] SearchError),
}
