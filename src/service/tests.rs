use super::*;
use crate::embedding::{EmbeddingError, MockTokenSource};
use crate::search::SearchError;

fn stub_service(threshold: usize) -> EmbeddingService {
    EmbeddingService::new(
        StubSource::new(256),
        SearchConfig::with_optimization_threshold(threshold),
    )
}

#[test]
fn test_encode_empty_sentence_fails() {
    let service = stub_service(100);
    assert!(matches!(
        service.encode("", None),
        Err(ServiceError::Embedding(EmbeddingError::EmptyInput))
    ));
}

#[test]
fn test_encode_is_unit_norm() {
    let service = stub_service(100);
    let e = service.encode("Swift is used for iOS development", None).unwrap();
    assert!((e.norm() - 1.0).abs() < 1e-6);
}

#[test]
fn test_self_similarity() {
    let service = stub_service(100);
    let sentence = "The cat sits on the mat.";
    let candidates = vec![service.encode(sentence, None).unwrap()];

    let results = service.search(sentence, &candidates, None, None).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].index, 0);
    assert!(results[0].score >= 0.99);
}

#[test]
fn test_empty_collection_skips_query_encoding() {
    let source = MockTokenSource::new(3);
    let service = EmbeddingService::new(source, SearchConfig::default());
    let empty: Vec<Embedding> = Vec::new();

    // Would fail with EmptyInput if the query were encoded.
    let results = service.search("", &empty, Some(0.5), None).unwrap();
    assert!(results.is_empty());
}

#[test]
fn test_query_encoding_failure_propagates() {
    let service = stub_service(100);
    let candidates = vec![service.encode("hello world", None).unwrap()];
    assert!(matches!(
        service.search("?!", &candidates, None, None),
        Err(ServiceError::Embedding(EmbeddingError::NoTokensProduced))
    ));
}

#[test]
fn test_dimension_mismatch_surfaces() {
    let service = stub_service(100);
    let other = EmbeddingService::new(StubSource::new(16), SearchConfig::default());
    let candidates = vec![other.encode("hello world", None).unwrap()];

    assert!(matches!(
        service.search("hello world", &candidates, None, None),
        Err(ServiceError::Search(SearchError::DimensionMismatch {
            query: 256,
            candidate: 16
        }))
    ));
}

#[test]
fn test_shared_words_rank_first() {
    let service = stub_service(100);
    let documents = [
        "Cooking pasta requires boiling water and adding salt",
        "Database sharding distributes storage across servers",
        "Basketball is a popular sport played worldwide",
    ];
    let candidates = service.encode_batch(&documents, None).unwrap();

    let results = service
        .search("database storage", &candidates, None, None)
        .unwrap();
    assert_eq!(results[0].index, 1);
}

#[test]
fn test_thresholds_do_not_change_results() {
    let documents: Vec<String> = (0..60)
        .map(|i| format!("document number {} about topic {}", i, i % 7))
        .collect();
    let refs: Vec<&str> = documents.iter().map(String::as_str).collect();

    let pointwise = stub_service(200);
    let batched = stub_service(10);
    let candidates = pointwise.encode_batch(&refs, None).unwrap();

    let a = pointwise
        .search("topic 3", &candidates, None, None)
        .unwrap();
    let b = batched.search("topic 3", &candidates, None, None).unwrap();

    assert_eq!(a.len(), b.len());
    for (ra, rb) in a.iter().zip(&b) {
        assert_eq!(ra.index, rb.index);
        assert!((ra.score - rb.score).abs() <= 1e-4);
    }
}

#[test]
fn test_minimum_similarity_filters() {
    let service = stub_service(100);
    let documents = ["red apple", "green apple", "blue car"];
    let candidates = service.encode_batch(&documents, None).unwrap();

    let all = service.search("apple", &candidates, None, None).unwrap();
    let strict = service
        .search("apple", &candidates, Some(0.5), None)
        .unwrap();

    assert_eq!(all.len(), 3);
    assert!(strict.len() < all.len());
    assert!(strict.iter().all(|r| r.score >= 0.5));
    assert!(strict.iter().all(|r| r.index != 2));
}

#[test]
fn test_concurrent_encode_matches_sequential() {
    let service = stub_service(100).into_shared();
    let sentences = ["alpha beta", "gamma delta", "epsilon zeta", "eta theta"];

    let handles: Vec<_> = sentences
        .iter()
        .map(|sentence| {
            let service = Arc::clone(&service);
            let sentence = sentence.to_string();
            std::thread::spawn(move || service.encode(&sentence, None).unwrap())
        })
        .collect();

    for (handle, sentence) in handles.into_iter().zip(sentences) {
        let concurrent = handle.join().unwrap();
        assert_eq!(concurrent, service.encode(sentence, None).unwrap());
    }
}

#[test]
fn test_model_info() {
    let service = stub_service(100);
    let info = service.model_info();

    assert_eq!(info.identifier, crate::constants::STUB_MODEL_IDENTIFIER);
    assert_eq!(info.dimension, 256);
    assert!(info.assets_available);
    assert!(service.is_model_available());

    let rendered = info.to_string();
    assert!(rendered.contains("Model Identifier: sembed-stub-hashed-tokens"));
    assert!(rendered.contains("Dimension: 256"));
    assert!(rendered.contains("Available Assets: true"));
}

#[test]
fn test_model_info_without_assets() {
    let service = EmbeddingService::new(
        MockTokenSource::new(4).without_assets(),
        SearchConfig::default(),
    );
    assert!(!service.is_model_available());
    assert!(!service.model_info().assets_available);
}

#[test]
fn test_load_from_default_config_uses_stub() {
    let service = EmbeddingService::load(&Config::default()).unwrap();
    assert_eq!(service.optimization_threshold(), 100);
    assert_eq!(
        service.model_info().identifier,
        crate::constants::STUB_MODEL_IDENTIFIER
    );
}

#[test]
fn test_load_with_missing_model_dir() {
    let config = Config {
        model_path: Some("/nonexistent/sembed/model".into()),
        ..Default::default()
    };
    assert!(matches!(
        EmbeddingService::load(&config),
        Err(ServiceError::Embedding(EmbeddingError::MissingAssets { .. }))
    ));
}
