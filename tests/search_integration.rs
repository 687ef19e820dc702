//! Integration tests for ranking through the public API.

mod common;

use std::collections::HashMap;

use common::fixtures::{CORPUS, stub_service, synthetic_vectors};
use sembed::{
    EmbeddingError, EmbeddingService, MockTokenSource, SearchConfig, SearchEngine, SearchError,
    SearchResult, SearchStrategy, ServiceError,
};

fn assert_sorted_descending(results: &[SearchResult]) {
    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score, "{:?} before {:?}", pair[0], pair[1]);
    }
}

fn scores_by_index(results: &[SearchResult]) -> HashMap<usize, f64> {
    results.iter().map(|r| (r.index, r.score)).collect()
}

fn assert_equivalent(a: &[SearchResult], b: &[SearchResult]) {
    assert_eq!(a.len(), b.len());
    let b_scores = scores_by_index(b);
    for r in a {
        let other = b_scores
            .get(&r.index)
            .unwrap_or_else(|| panic!("index {} missing from batched results", r.index));
        assert!((r.score - other).abs() <= 1e-4, "index {}: {} vs {}", r.index, r.score, other);
    }
}

#[test]
fn test_strategies_agree_around_threshold() {
    let engine = SearchEngine::with_optimization_threshold(50);
    let query = synthetic_vectors(1, 64, 99, true).remove(0);

    for count in [1, 49, 50, 51, 120] {
        let candidates = synthetic_vectors(count, 64, 7, true);

        let automatic = engine.search(&query, &candidates, None).unwrap();
        let pointwise = engine
            .search_with_strategy(SearchStrategy::PointWise, &query, &candidates, None)
            .unwrap();
        let batched = engine
            .search_with_strategy(SearchStrategy::Batched, &query, &candidates, None)
            .unwrap();

        assert_eq!(automatic.len(), count);
        assert_sorted_descending(&pointwise);
        assert_sorted_descending(&batched);
        assert_equivalent(&pointwise, &batched);
        assert_equivalent(&automatic, &pointwise);
    }
}

#[test]
fn test_strategies_agree_on_unnormalized_vectors() {
    let engine = SearchEngine::new();
    let query = synthetic_vectors(1, 32, 3, false).remove(0);
    let candidates = synthetic_vectors(80, 32, 11, false);

    let pointwise = engine
        .search_with_strategy(SearchStrategy::PointWise, &query, &candidates, None)
        .unwrap();
    let batched = engine
        .search_with_strategy(SearchStrategy::Batched, &query, &candidates, None)
        .unwrap();

    assert!(pointwise.iter().all(|r| (-1.0..=1.0).contains(&r.score)));
    assert_equivalent(&pointwise, &batched);
}

#[test]
fn test_strategy_selection_boundary() {
    let engine = SearchEngine::with_optimization_threshold(50);
    assert_eq!(engine.strategy_for(0), SearchStrategy::PointWise);
    assert_eq!(engine.strategy_for(49), SearchStrategy::PointWise);
    assert_eq!(engine.strategy_for(50), SearchStrategy::Batched);
    assert_eq!(SearchEngine::new().optimization_threshold(), 100);
}

#[test]
fn test_minimum_similarity_is_inclusive() {
    let engine = SearchEngine::new();
    let query = [1.0, 0.0];
    let candidates = vec![vec![0.6, 0.8], vec![0.0, 1.0], vec![1.0, 0.0]];

    let results = engine.search(&query, &candidates, Some(0.6)).unwrap();
    let indices: Vec<usize> = results.iter().map(|r| r.index).collect();
    assert_eq!(indices, vec![2, 0]);
}

#[test]
fn test_higher_threshold_returns_subset() {
    let engine = SearchEngine::new();
    let query = synthetic_vectors(1, 16, 5, true).remove(0);
    let candidates = synthetic_vectors(40, 16, 6, true);

    let loose = scores_by_index(&engine.search(&query, &candidates, Some(-0.2)).unwrap());
    let strict = engine.search(&query, &candidates, Some(0.3)).unwrap();

    assert!(strict.len() <= loose.len());
    for r in &strict {
        assert!(r.score >= 0.3);
        assert!(loose.contains_key(&r.index));
    }
}

#[test]
fn test_validation_errors() {
    let engine = SearchEngine::new();

    assert!(matches!(
        engine.search(&[1.0, 0.0, 0.0], &[vec![1.0, 0.0]], None),
        Err(SearchError::DimensionMismatch {
            query: 3,
            candidate: 2
        })
    ));
    assert!(matches!(
        engine.search(&[1.0, 0.0], &[vec![1.0, 0.0], vec![1.0, 0.0, 0.0]], None),
        Err(SearchError::UnsupportedNormalization { .. })
    ));
    assert!(matches!(
        engine.search(&[1.0, 0.0], &[vec![1.0, 0.0]], Some(f64::NAN)),
        Err(SearchError::InvalidThreshold { .. })
    ));

    let empty: Vec<Vec<f64>> = Vec::new();
    assert!(engine.search(&[1.0, 0.0], &empty, Some(0.9)).unwrap().is_empty());
}

#[test]
fn test_mock_source_pools_and_normalizes() {
    let source = MockTokenSource::new(2)
        .with_sentence("pair", vec![vec![1.0, 0.0], vec![0.0, 1.0]])
        .with_failure("broken", "bad bytes");
    let service = EmbeddingService::new(source, SearchConfig::default());

    let e = service.encode("pair", None).unwrap();
    let half = std::f64::consts::FRAC_1_SQRT_2;
    assert!((e.as_slice()[0] - half).abs() < 1e-12);
    assert!((e.as_slice()[1] - half).abs() < 1e-12);

    assert!(matches!(
        service.encode("unknown", None),
        Err(ServiceError::Embedding(EmbeddingError::NoTokensProduced))
    ));
    assert!(matches!(
        service.encode_batch(&["pair", "broken"], None),
        Err(ServiceError::Embedding(EmbeddingError::MalformedInput { .. }))
    ));
}

#[test]
fn test_missing_assets_reported_before_encoding() {
    let service = EmbeddingService::new(
        MockTokenSource::new(2).without_assets(),
        SearchConfig::default(),
    );
    assert!(matches!(
        service.encode("anything", None),
        Err(ServiceError::Embedding(EmbeddingError::MissingAssets { .. }))
    ));
}

#[test]
fn test_stub_corpus_self_retrieval() {
    let service = stub_service(4);
    let candidates = service.encode_batch(&CORPUS, None).unwrap();

    for (index, sentence) in CORPUS.iter().enumerate() {
        let results = service.search(sentence, &candidates, None, None).unwrap();
        assert_eq!(results.len(), CORPUS.len());
        assert_eq!(results[0].index, index);
        assert!(results[0].score > 0.999);
        assert_sorted_descending(&results);
    }
}
