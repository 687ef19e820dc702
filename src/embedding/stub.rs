//! Deterministic hashed-token source (no model files required).
//!
//! Each lowercase alphanumeric word maps to a fixed pseudo-random vector, so
//! sentences that share words land closer together. Useful for tests, demos and
//! running without a provisioned model.

use tracing::debug;

use crate::constants::{DEFAULT_STUB_DIM, STUB_MODEL_IDENTIFIER};

use super::error::EmbeddingError;
use super::source::TokenVectorSource;

#[derive(Debug, Clone)]
pub struct StubSource {
    dimension: usize,
    languages: Vec<String>,
}

impl Default for StubSource {
    fn default() -> Self {
        Self::new(DEFAULT_STUB_DIM)
    }
}

impl StubSource {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            languages: vec!["en".to_string()],
        }
    }

    /// Splits on anything that is not alphanumeric and lowercases the pieces.
    pub fn tokenize(sentence: &str) -> Vec<String> {
        sentence
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect()
    }

    /// The vector assigned to a single token.
    pub fn token_vector(&self, token: &str) -> Vec<f64> {
        let digest = blake3::hash(token.as_bytes());
        let mut seed = [0u8; 8];
        seed.copy_from_slice(&digest.as_bytes()[..8]);
        let mut state = u64::from_le_bytes(seed);

        (0..self.dimension)
            .map(|_| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
                ((state >> 32) as f64 / u32::MAX as f64) * 2.0 - 1.0
            })
            .collect()
    }
}

impl TokenVectorSource for StubSource {
    fn identifier(&self) -> &str {
        STUB_MODEL_IDENTIFIER
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn has_available_assets(&self) -> bool {
        true
    }

    fn languages(&self) -> &[String] {
        &self.languages
    }

    fn enumerate_token_vectors(
        &self,
        sentence: &str,
        language: Option<&str>,
        visit: &mut dyn FnMut(&[f64]),
    ) -> Result<(), EmbeddingError> {
        let tokens = Self::tokenize(sentence);

        debug!(
            text_len = sentence.len(),
            token_count = tokens.len(),
            language,
            "Generating stub token vectors"
        );

        for token in &tokens {
            visit(&self.token_vector(token));
        }
        Ok(())
    }
}
