//! Test fixtures for integration tests.

use sembed::{EmbeddingService, SearchConfig, StubSource, embedding::l2_normalize};

pub const STUB_DIM: usize = 512;

/// Small topical corpus; each entry uses vocabulary no other entry shares.
pub const CORPUS: [&str; 8] = [
    "Cooking pasta requires boiling water and adding salt",
    "Database sharding distributes storage across many servers",
    "Basketball players dribble and shoot hoops on a court",
    "Photosynthesis converts sunlight into chemical energy in leaves",
    "Compilers translate source code into machine instructions",
    "Volcanoes erupt molten lava from beneath the crust",
    "Violinists practice scales to improve intonation",
    "Glaciers carve valleys as ice slowly advances",
];

/// `(query, index of the relevant corpus entry)`.
pub const QUERIES: [(&str, usize); 6] = [
    ("boiling pasta", 0),
    ("database sharding servers", 1),
    ("basketball hoops", 2),
    ("photosynthesis sunlight leaves", 3),
    ("compilers machine instructions", 4),
    ("glaciers ice valleys", 7),
];

pub fn stub_service(optimization_threshold: usize) -> EmbeddingService {
    EmbeddingService::new(
        StubSource::new(STUB_DIM),
        SearchConfig::with_optimization_threshold(optimization_threshold),
    )
}

/// Deterministic pseudo-random vectors, unit-normalized when `normalize` is set.
pub fn synthetic_vectors(count: usize, dim: usize, seed: u64, normalize: bool) -> Vec<Vec<f64>> {
    (0..count)
        .map(|i| {
            let raw: Vec<f64> = (0..dim)
                .map(|j| {
                    let x = (seed as f64 + 1.0) * 0.618 + i as f64 * 1.37 + j as f64 * 0.731;
                    x.sin() * (1.0 + (i % 3) as f64)
                })
                .collect();
            if normalize { l2_normalize(raw) } else { raw }
        })
        .collect()
}
