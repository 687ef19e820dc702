use crate::constants::DEFAULT_OPTIMIZATION_THRESHOLD;

/// Search engine configuration, fixed once the engine is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Collections with fewer candidates use the point-wise loop; the rest use
    /// the batched matrix product. `0` means always batched.
    pub optimization_threshold: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            optimization_threshold: DEFAULT_OPTIMIZATION_THRESHOLD,
        }
    }
}

impl SearchConfig {
    pub fn with_optimization_threshold(optimization_threshold: usize) -> Self {
        Self {
            optimization_threshold,
        }
    }
}
