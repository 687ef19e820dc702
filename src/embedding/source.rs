use super::error::EmbeddingError;

/// Producer of per-token vectors for a sentence (the contextual model).
///
/// Implementations decide tokenization and ordering. Every vector passed to
/// `visit` must have length [`dimension`](Self::dimension); the slice is only
/// valid for the duration of the call.
pub trait TokenVectorSource: Send + Sync {
    /// Model identifier used in logs and [`ModelInfo`](crate::service::ModelInfo).
    fn identifier(&self) -> &str;

    /// Length of each token vector.
    fn dimension(&self) -> usize;

    /// Whether the model's assets are present and usable.
    fn has_available_assets(&self) -> bool;

    /// Languages the model advertises (informational only).
    fn languages(&self) -> &[String] {
        &[]
    }

    /// Streams token vectors for `sentence` in model order.
    fn enumerate_token_vectors(
        &self,
        sentence: &str,
        language: Option<&str>,
        visit: &mut dyn FnMut(&[f64]),
    ) -> Result<(), EmbeddingError>;
}

impl<T: TokenVectorSource + ?Sized> TokenVectorSource for Box<T> {
    fn identifier(&self) -> &str {
        (**self).identifier()
    }

    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn has_available_assets(&self) -> bool {
        (**self).has_available_assets()
    }

    fn languages(&self) -> &[String] {
        (**self).languages()
    }

    fn enumerate_token_vectors(
        &self,
        sentence: &str,
        language: Option<&str>,
        visit: &mut dyn FnMut(&[f64]),
    ) -> Result<(), EmbeddingError> {
        (**self).enumerate_token_vectors(sentence, language, visit)
    }
}
