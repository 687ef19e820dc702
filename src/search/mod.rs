//! Exact nearest-neighbor ranking over an in-memory candidate collection.
//!
//! [`SearchEngine`] scores every candidate against the query with cosine
//! similarity, optionally drops those below a minimum, and returns them best
//! first. Small collections are scored one candidate at a time; collections at
//! or above [`SearchConfig::optimization_threshold`] are stacked into a matrix
//! and scored with a single matrix-vector product. The two strategies exist
//! for speed only and return the same ranking.

/// Engine configuration.
pub mod config;
mod error;
/// Cosine similarity helpers.
pub mod similarity;


pub use config::SearchConfig;
pub use error::{SearchError, SearchOutcome};
pub use similarity::{cosine_similarity, dot};

use serde::{Deserialize, Serialize};
use tracing::debug;

use similarity::{batched_scores, pointwise_scores};

/// One ranked candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Position in the candidate collection.
    pub index: usize,
    /// Cosine similarity in `[-1, 1]`.
    pub score: f64,
}

impl From<SearchResult> for (usize, f64) {
    fn from(result: SearchResult) -> Self {
        (result.index, result.score)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStrategy {
    /// Cosine similarity per candidate.
    PointWise,
    /// One matrix-vector product over the stacked candidates.
    Batched,
}

impl SearchStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PointWise => "point-wise",
            Self::Batched => "batched",
        }
    }
}

impl std::fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    config: SearchConfig,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn with_optimization_threshold(optimization_threshold: usize) -> Self {
        Self::with_config(SearchConfig::with_optimization_threshold(
            optimization_threshold,
        ))
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn optimization_threshold(&self) -> usize {
        self.config.optimization_threshold
    }

    /// Strategy used for a collection of `count` candidates.
    pub fn strategy_for(&self, count: usize) -> SearchStrategy {
        if count < self.config.optimization_threshold {
            SearchStrategy::PointWise
        } else {
            SearchStrategy::Batched
        }
    }

    /// Ranks `candidates` by similarity to `query`, best first.
    ///
    /// With `minimum_similarity`, only candidates scoring at least that value are
    /// kept. Equal scores keep candidate order. An empty collection always yields
    /// an empty result.
    pub fn search<C: AsRef<[f64]>>(
        &self,
        query: &[f64],
        candidates: &[C],
        minimum_similarity: Option<f64>,
    ) -> SearchOutcome<Vec<SearchResult>> {
        let strategy = self.strategy_for(candidates.len());
        self.search_with_strategy(strategy, query, candidates, minimum_similarity)
    }

    /// [`search`](Self::search) with an explicit strategy.
    pub fn search_with_strategy<C: AsRef<[f64]>>(
        &self,
        strategy: SearchStrategy,
        query: &[f64],
        candidates: &[C],
        minimum_similarity: Option<f64>,
    ) -> SearchOutcome<Vec<SearchResult>> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        validate(query, candidates, minimum_similarity)?;

        let scores = match strategy {
            SearchStrategy::PointWise => pointwise_scores(query, candidates),
            SearchStrategy::Batched => batched_scores(query, candidates)?,
        };

        let results = rank(scores, minimum_similarity);

        debug!(
            strategy = %strategy,
            candidates = candidates.len(),
            hits = results.len(),
            minimum_similarity,
            top_score = results.first().map(|r| r.score),
            "Similarity search complete"
        );

        Ok(results)
    }
}

fn validate<C: AsRef<[f64]>>(
    query: &[f64],
    candidates: &[C],
    minimum_similarity: Option<f64>,
) -> SearchOutcome<()> {
    if let Some(value) = minimum_similarity
        && !value.is_finite()
    {
        return Err(SearchError::InvalidThreshold { value });
    }

    let dim = candidates.first().map_or(0, |c| c.as_ref().len());
    if query.len() != dim {
        return Err(SearchError::DimensionMismatch {
            query: query.len(),
            candidate: dim,
        });
    }

    if dim == 0 {
        return Err(SearchError::UnsupportedNormalization {
            reason: "zero-dimensional embeddings".to_string(),
        });
    }

    if query.iter().any(|x| !x.is_finite()) {
        return Err(SearchError::UnsupportedNormalization {
            reason: "query contains non-finite values".to_string(),
        });
    }

    for (index, candidate) in candidates.iter().enumerate() {
        let candidate = candidate.as_ref();
        if candidate.len() != dim {
            return Err(SearchError::UnsupportedNormalization {
                reason: format!(
                    "candidate {} has dimension {}, candidate 0 has {}",
                    index,
                    candidate.len(),
                    dim
                ),
            });
        }
        if candidate.iter().any(|x| !x.is_finite()) {
            return Err(SearchError::UnsupportedNormalization {
                reason: format!("candidate {} contains non-finite values", index),
            });
        }
    }

    Ok(())
}

/// Filters by `minimum_similarity` and sorts descending (stable, total order).
fn rank(scores: Vec<f64>, minimum_similarity: Option<f64>) -> Vec<SearchResult> {
    let mut results: Vec<SearchResult> = scores
        .into_iter()
        .enumerate()
        .filter(|(_, score)| minimum_similarity.is_none_or(|min| *score >= min))
        .map(|(index, score)| SearchResult { index, score })
        .collect();

    results.sort_by(|a, b| b.score.total_cmp(&a.score));

    results
}
