//! Encoder + search engine behind one handle.
//!
//! [`EmbeddingService`] holds no mutable state: the token source and the
//! optimization threshold are fixed at construction, so a single instance can be
//! shared across threads behind an `Arc` and `encode` called concurrently.

mod error;

#[cfg(test)]
mod tests;

pub use error::ServiceError;

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::embedding::{
    BertConfig, BertSource, Embedding, SentenceEncoder, StubSource, TokenVectorSource,
};
use crate::search::{SearchConfig, SearchEngine, SearchResult};

/// Snapshot of the loaded model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    pub identifier: String,
    pub dimension: usize,
    pub assets_available: bool,
    pub languages: Vec<String>,
}

impl std::fmt::Display for ModelInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Model Identifier: {}", self.identifier)?;
        writeln!(f, "Dimension: {}", self.dimension)?;
        writeln!(f, "Available Assets: {}", self.assets_available)?;
        write!(f, "Languages: {:?}", self.languages)
    }
}

#[derive(Debug, Clone)]
pub struct EmbeddingService {
    encoder: SentenceEncoder,
    engine: SearchEngine,
}

impl EmbeddingService {
    pub fn new<S: TokenVectorSource + 'static>(source: S, search: SearchConfig) -> Self {
        Self::from_parts(SentenceEncoder::new(source), SearchEngine::with_config(search))
    }

    pub fn from_parts(encoder: SentenceEncoder, engine: SearchEngine) -> Self {
        Self { encoder, engine }
    }

    /// Builds the service from runtime config: BERT when a model path is set,
    /// the hashed stub otherwise.
    pub fn load(config: &Config) -> Result<Self, ServiceError> {
        let search = SearchConfig::with_optimization_threshold(config.optimization_threshold);

        let service = match &config.model_path {
            Some(path) => {
                let bert = BertConfig::new(path.clone()).with_max_seq_len(config.max_seq_len);
                Self::new(BertSource::load(bert)?, search)
            }
            None => {
                warn!("No SEMBED_MODEL_PATH configured, using hashed stub token vectors");
                Self::new(StubSource::new(config.stub_dim), search)
            }
        };

        info!(
            model = service.encoder.source().identifier(),
            dimension = service.encoder.dimension(),
            optimization_threshold = search.optimization_threshold,
            "Embedding service ready"
        );

        Ok(service)
    }

    /// Convenience for sharing across tasks.
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn encoder(&self) -> &SentenceEncoder {
        &self.encoder
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    pub fn optimization_threshold(&self) -> usize {
        self.engine.optimization_threshold()
    }

    pub fn is_model_available(&self) -> bool {
        self.encoder.source().has_available_assets()
    }

    pub fn model_info(&self) -> ModelInfo {
        let source = self.encoder.source();
        ModelInfo {
            identifier: source.identifier().to_string(),
            dimension: source.dimension(),
            assets_available: source.has_available_assets(),
            languages: source.languages().to_vec(),
        }
    }

    pub fn encode(&self, sentence: &str, language: Option<&str>) -> Result<Embedding, ServiceError> {
        Ok(self.encoder.encode(sentence, language)?)
    }

    pub fn encode_batch(
        &self,
        sentences: &[&str],
        language: Option<&str>,
    ) -> Result<Vec<Embedding>, ServiceError> {
        Ok(self.encoder.encode_batch(sentences, language)?)
    }

    /// Encodes `query` and ranks `candidates` against it.
    ///
    /// An empty collection returns immediately without encoding the query.
    pub fn search<C: AsRef<[f64]>>(
        &self,
        query: &str,
        candidates: &[C],
        minimum_similarity: Option<f64>,
        language: Option<&str>,
    ) -> Result<Vec<SearchResult>, ServiceError> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let query = self.encoder.encode(query, language)?;
        self.search_embedding(&query, candidates, minimum_similarity)
    }

    /// Ranks `candidates` against an already encoded query.
    pub fn search_embedding<C: AsRef<[f64]>>(
        &self,
        query: &Embedding,
        candidates: &[C],
        minimum_similarity: Option<f64>,
    ) -> Result<Vec<SearchResult>, ServiceError> {
        Ok(self
            .engine
            .search(query.as_slice(), candidates, minimum_similarity)?)
    }
}
