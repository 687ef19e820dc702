//! Mean pooling and L2 normalization.

use tracing::warn;

use crate::constants::{NORM_EPSILON, validate_embedding_dim};

use super::error::EmbeddingError;
use super::types::{l2_norm, max_abs};

/// Running element-wise mean of token vectors.
///
/// Token vectors are folded in as they stream past; only the accumulator is kept.
/// The mean is updated in place so large components never overflow a raw sum.
#[derive(Debug)]
pub struct MeanPooler {
    mean: Vec<f64>,
    count: usize,
    error: Option<EmbeddingError>,
}

impl MeanPooler {
    pub fn new(dim: usize) -> Self {
        Self {
            mean: vec![0.0; dim],
            count: 0,
            error: None,
        }
    }

    /// Adds one token vector. After the first malformed vector the pooler ignores
    /// further input and [`finish`](Self::finish) reports the error.
    pub fn add(&mut self, token: &[f64]) {
        if self.error.is_some() {
            return;
        }

        if validate_embedding_dim(token.len(), self.mean.len()).is_err() {
            self.error = Some(EmbeddingError::TokenDimensionMismatch {
                expected: self.mean.len(),
                actual: token.len(),
            });
            return;
        }

        self.count += 1;
        let n = self.count as f64;
        for (acc, value) in self.mean.iter_mut().zip(token) {
            *acc = *acc - *acc / n + value / n;
        }
    }

    pub fn token_count(&self) -> usize {
        self.count
    }

    /// Returns the arithmetic mean of everything added.
    pub fn finish(self) -> Result<Vec<f64>, EmbeddingError> {
        if let Some(err) = self.error {
            return Err(err);
        }

        if self.count == 0 {
            return Err(EmbeddingError::NoTokensProduced);
        }

        Ok(self.mean)
    }
}

/// Scales `values` to unit length.
///
/// Vectors whose norm is at or below [`NORM_EPSILON`] are returned unchanged
/// rather than divided by a near-zero denominator.
pub fn l2_normalize(mut values: Vec<f64>) -> Vec<f64> {
    let norm = l2_norm(&values);

    if norm <= NORM_EPSILON {
        warn!(norm, dim = values.len(), "Degenerate pooled vector left unnormalized");
        return values;
    }

    if !norm.is_finite() {
        // Norm itself overflows: bring components into [-1, 1] first.
        let scale = max_abs(&values);
        for x in &mut values {
            *x /= scale;
        }
        let norm = l2_norm(&values);
        for x in &mut values {
            *x /= norm;
        }
        return values;
    }

    for x in &mut values {
        *x /= norm;
    }
    values
}
