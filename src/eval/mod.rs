//! Retrieval-quality metrics over ranked [`SearchResult`]s.
//!
//! Used to judge whether a token source ranks relevant documents near the top:
//! Precision@K, reciprocal rank / MRR, and summaries of score distributions for
//! choosing a `minimum_similarity`.


use std::collections::HashSet;

use serde::Serialize;

use crate::search::SearchResult;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PrecisionAtK {
    /// Fraction of the top `k` that is relevant.
    pub precision: f64,
    /// Relevant results in the top `k`.
    pub relevant: usize,
    pub k: usize,
}

/// Precision@K. Missing ranks (fewer than `k` results) count as irrelevant;
/// `k == 0` yields zero precision.
pub fn precision_at_k(results: &[SearchResult], relevant: &HashSet<usize>, k: usize) -> PrecisionAtK {
    let hits = results
        .iter()
        .take(k)
        .filter(|r| relevant.contains(&r.index))
        .count();

    let precision = if k == 0 { 0.0 } else { hits as f64 / k as f64 };

    PrecisionAtK {
        precision,
        relevant: hits,
        k,
    }
}

/// 1-based rank of the first relevant result.
pub fn first_relevant_rank(results: &[SearchResult], relevant: &HashSet<usize>) -> Option<usize> {
    results
        .iter()
        .position(|r| relevant.contains(&r.index))
        .map(|pos| pos + 1)
}

/// `1 / rank` of the first relevant result, `0.0` if none is relevant.
pub fn reciprocal_rank(results: &[SearchResult], relevant: &HashSet<usize>) -> f64 {
    first_relevant_rank(results, relevant).map_or(0.0, |rank| 1.0 / rank as f64)
}

/// Mean of per-query reciprocal ranks (`0.0` for no queries).
pub fn mean_reciprocal_rank<I>(reciprocal_ranks: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = reciprocal_ranks
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), rr| (sum + rr, count + 1));

    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// Summary statistics for a set of similarity scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl ScoreSummary {
    /// `None` for an empty input.
    pub fn from_scores<I>(scores: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut iter = scores.into_iter();
        let first = iter.next()?;

        let mut summary = Self {
            count: 1,
            mean: first,
            min: first,
            max: first,
        };
        let mut sum = first;

        for score in iter {
            summary.count += 1;
            summary.min = summary.min.min(score);
            summary.max = summary.max.max(score);
            sum += score;
        }

        summary.mean = sum / summary.count as f64;
        Some(summary)
    }

    pub fn from_results(results: &[SearchResult]) -> Option<Self> {
        Self::from_scores(results.iter().map(|r| r.score))
    }

    /// Width of the score range.
    pub fn spread(&self) -> f64 {
        self.max - self.min
    }
}
