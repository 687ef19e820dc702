use serde::{Deserialize, Serialize};

use crate::constants::UNIT_NORM_TOLERANCE;

/// One sentence embedding.
///
/// Values produced by [`SentenceEncoder`](super::SentenceEncoder) are unit-norm unless the
/// mean-pooled vector was degenerate (norm at or below
/// [`NORM_EPSILON`](crate::constants::NORM_EPSILON)), in which case it is returned as-is.
/// Serializes as a plain JSON array so callers can persist candidate collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Embedding(Vec<f64>);

impl Embedding {
    /// Wraps raw values without normalizing (e.g. vectors loaded from disk).
    pub fn from_raw(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn dim(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        l2_norm(&self.0)
    }

    /// Returns `true` if the norm is within `tolerance` of 1.0.
    pub fn is_unit(&self, tolerance: f64) -> bool {
        (self.norm() - 1.0).abs() <= tolerance
    }

    /// [`is_unit`](Self::is_unit) with [`UNIT_NORM_TOLERANCE`].
    pub fn is_normalized(&self) -> bool {
        self.is_unit(UNIT_NORM_TOLERANCE)
    }
}

impl From<Vec<f64>> for Embedding {
    fn from(values: Vec<f64>) -> Self {
        Self::from_raw(values)
    }
}

impl AsRef<[f64]> for Embedding {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// Largest absolute component; `0.0` for an empty slice. NaN components are skipped.
#[inline]
pub(crate) fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0f64, |max, x| max.max(x.abs()))
}

/// Euclidean norm, computed on components divided by [`max_abs`] so the
/// squares neither overflow nor underflow.
#[inline]
pub(crate) fn l2_norm(values: &[f64]) -> f64 {
    let scale = max_abs(values);
    if scale == 0.0 || !scale.is_finite() {
        return values.iter().map(|x| x * x).sum::<f64>().sqrt();
    }

    let scaled = values
        .iter()
        .map(|x| {
            let x = x / scale;
            x * x
        })
        .sum::<f64>();
    scale * scaled.sqrt()
}
