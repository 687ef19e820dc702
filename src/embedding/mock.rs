//! Scripted token source for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::error::EmbeddingError;
use super::source::TokenVectorSource;

/// Returns pre-registered token vectors per sentence.
///
/// Unregistered sentences yield no tokens.
#[derive(Debug, Default)]
pub struct MockTokenSource {
    dimension: usize,
    assets_available: bool,
    scripted: HashMap<String, Vec<Vec<f64>>>,
    failures: HashMap<String, String>,
    calls: AtomicUsize,
}

impl MockTokenSource {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            assets_available: true,
            ..Default::default()
        }
    }

    pub fn with_sentence(mut self, sentence: &str, tokens: Vec<Vec<f64>>) -> Self {
        self.scripted.insert(sentence.to_string(), tokens);
        self
    }

    /// Makes `sentence` fail with [`EmbeddingError::MalformedInput`].
    pub fn with_failure(mut self, sentence: &str, reason: &str) -> Self {
        self.failures
            .insert(sentence.to_string(), reason.to_string());
        self
    }

    pub fn without_assets(mut self) -> Self {
        self.assets_available = false;
        self
    }

    /// Number of times token vectors were requested.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TokenVectorSource for MockTokenSource {
    fn identifier(&self) -> &str {
        "mock"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn has_available_assets(&self) -> bool {
        self.assets_available
    }

    fn enumerate_token_vectors(
        &self,
        sentence: &str,
        _language: Option<&str>,
        visit: &mut dyn FnMut(&[f64]),
    ) -> Result<(), EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(reason) = self.failures.get(sentence) {
            return Err(EmbeddingError::MalformedInput {
                reason: reason.clone(),
            });
        }

        if let Some(tokens) = self.scripted.get(sentence) {
            for token in tokens {
                visit(token);
            }
        }
        Ok(())
    }
}
