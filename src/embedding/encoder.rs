use std::sync::Arc;

use tracing::debug;

use super::error::EmbeddingError;
use super::pooling::{MeanPooler, l2_normalize};
use super::source::TokenVectorSource;
use super::types::Embedding;

/// Turns a sentence into one mean-pooled, L2-normalized [`Embedding`].
///
/// Stateless apart from the shared source, so one encoder can serve many threads.
#[derive(Clone)]
pub struct SentenceEncoder {
    source: Arc<dyn TokenVectorSource>,
}

impl std::fmt::Debug for SentenceEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceEncoder")
            .field("model", &self.source.identifier())
            .field("dimension", &self.source.dimension())
            .finish()
    }
}

impl SentenceEncoder {
    pub fn new<S: TokenVectorSource + 'static>(source: S) -> Self {
        Self {
            source: Arc::new(source),
        }
    }

    pub fn from_shared(source: Arc<dyn TokenVectorSource>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &dyn TokenVectorSource {
        self.source.as_ref()
    }

    pub fn dimension(&self) -> usize {
        self.source.dimension()
    }

    /// Encodes one sentence.
    ///
    /// Checks run before any token is produced: empty sentence, missing assets,
    /// then a zero model dimension.
    pub fn encode(
        &self,
        sentence: &str,
        language: Option<&str>,
    ) -> Result<Embedding, EmbeddingError> {
        if sentence.is_empty() {
            return Err(EmbeddingError::EmptyInput);
        }

        if !self.source.has_available_assets() {
            return Err(EmbeddingError::MissingAssets {
                path: self.source.identifier().into(),
            });
        }

        let dim = self.source.dimension();
        if dim == 0 {
            return Err(EmbeddingError::InvalidDimension { dim });
        }

        let mut pooler = MeanPooler::new(dim);
        self.source
            .enumerate_token_vectors(sentence, language, &mut |token: &[f64]| {
                pooler.add(token)
            })?;

        let token_count = pooler.token_count();
        let pooled = pooler.finish()?;

        debug!(
            text_len = sentence.len(),
            token_count,
            dim,
            "Encoded sentence (mean pooling)"
        );

        Ok(Embedding::from_raw(l2_normalize(pooled)))
    }

    /// Encodes every sentence in order; the first failure aborts the batch.
    pub fn encode_batch(
        &self,
        sentences: &[&str],
        language: Option<&str>,
    ) -> Result<Vec<Embedding>, EmbeddingError> {
        sentences
            .iter()
            .map(|sentence| self.encode(sentence, language))
            .collect()
    }
}
