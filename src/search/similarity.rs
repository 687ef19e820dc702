//! Cosine similarity for the point-wise and batched strategies.
//!
//! Both strategies divide each vector by its largest absolute component, reduce
//! to a dot product plus two norms and then go through [`score_from_parts`], so
//! they agree up to summation-order rounding.

use candle_core::{Device, Tensor};

use crate::constants::UNIT_NORM_TOLERANCE;
use crate::embedding::max_abs;

use super::error::SearchOutcome;

#[inline]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Magnitude of a vector that was divided by its largest absolute component.
///
/// `norm` is the norm of the scaled vector (in `[1, sqrt(dim)]` unless zero), so
/// squaring never overflows or underflows; `norm * scale` is the true norm.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Magnitude {
    pub(crate) norm: f64,
    pub(crate) scale: f64,
}

impl Magnitude {
    #[inline]
    fn is_zero(&self) -> bool {
        self.scale == 0.0 || self.norm == 0.0
    }

    #[inline]
    fn is_unit(&self) -> bool {
        (self.norm * self.scale - 1.0).abs() <= UNIT_NORM_TOLERANCE
    }
}

#[inline]
fn scale_component(value: f64, scale: f64) -> f64 {
    if scale == 0.0 { value } else { value / scale }
}

/// Cosine similarity clamped to `[-1, 1]`.
///
/// Returns `0.0` for mismatched lengths, empty input, a zero-magnitude vector or
/// non-finite input. Finite vectors of any magnitude are scored correctly.
#[inline]
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (scale_a, scale_b) = (max_abs(a), max_abs(b));

    let (dot, norm_a_sq, norm_b_sq) = a
        .iter()
        .zip(b)
        .fold((0.0f64, 0.0f64, 0.0f64), |(dot, na, nb), (av, bv)| {
            let x = scale_component(*av, scale_a);
            let y = scale_component(*bv, scale_b);
            (dot + x * y, na + x * x, nb + y * y)
        });

    score_from_parts(
        dot,
        Magnitude {
            norm: norm_a_sq.sqrt(),
            scale: scale_a,
        },
        Magnitude {
            norm: norm_b_sq.sqrt(),
            scale: scale_b,
        },
    )
}

/// Finishes a cosine score from the dot product of the two scaled vectors and
/// their magnitudes.
///
/// When both true norms are 1 within [`UNIT_NORM_TOLERANCE`] the (unscaled) dot
/// product is used directly.
#[inline]
pub(crate) fn score_from_parts(dot: f64, a: Magnitude, b: Magnitude) -> f64 {
    if a.is_zero() || b.is_zero() {
        return 0.0;
    }

    let score = if a.is_unit() && b.is_unit() {
        dot * a.scale * b.scale
    } else {
        dot / (a.norm * b.norm)
    };

    // -0.0 folds into 0.0 so both strategies order zero scores the same way.
    if score.is_nan() || score == 0.0 {
        0.0
    } else {
        score.clamp(-1.0, 1.0)
    }
}

/// Scores every candidate independently.
pub(crate) fn pointwise_scores<C: AsRef<[f64]>>(query: &[f64], candidates: &[C]) -> Vec<f64> {
    candidates
        .iter()
        .map(|candidate| cosine_similarity(query, candidate.as_ref()))
        .collect()
}

/// Scores all candidates with one `count x dim` by `dim x 1` matrix product.
///
/// Each row is divided by its largest absolute component before stacking, as in
/// [`cosine_similarity`]. The stacked matrix lives only for the duration of the call.
pub(crate) fn batched_scores<C: AsRef<[f64]>>(
    query: &[f64],
    candidates: &[C],
) -> SearchOutcome<Vec<f64>> {
    let count = candidates.len();
    let dim = query.len();

    let mut flat = Vec::with_capacity(count * dim);
    let mut scales = Vec::with_capacity(count);
    for candidate in candidates {
        let candidate = candidate.as_ref();
        let scale = max_abs(candidate);
        flat.extend(candidate.iter().map(|x| scale_component(*x, scale)));
        scales.push(scale);
    }

    let query_scale = max_abs(query);
    let scaled_query: Vec<f64> = query
        .iter()
        .map(|x| scale_component(*x, query_scale))
        .collect();
    let query_magnitude = Magnitude {
        norm: dot(&scaled_query, &scaled_query).sqrt(),
        scale: query_scale,
    };

    let device = Device::Cpu;
    let matrix = Tensor::from_vec(flat, (count, dim), &device)?;
    let query_column = Tensor::from_vec(scaled_query, (dim, 1), &device)?;

    let dots = matrix.matmul(&query_column)?.flatten_all()?.to_vec1::<f64>()?;
    let row_norms = matrix.sqr()?.sum(1)?.sqrt()?.to_vec1::<f64>()?;

    Ok(dots
        .into_iter()
        .zip(row_norms)
        .zip(scales)
        .map(|((dot, norm), scale)| {
            score_from_parts(dot, query_magnitude, Magnitude { norm, scale })
        })
        .collect())
}
