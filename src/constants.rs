//! Cross-cutting, shared constants.
//!
//! The encoder and the search engine must agree on the numeric tolerances below:
//! embeddings are only treated as unit vectors when their norm is within
//! [`UNIT_NORM_TOLERANCE`] of 1.0, and vectors with a norm at or below
//! [`NORM_EPSILON`] are never divided by their norm.

/// Candidate count at which the search engine switches from the point-wise loop
/// to the batched matrix-vector product.
pub const DEFAULT_OPTIMIZATION_THRESHOLD: usize = 100;

/// Norms at or below this value are considered degenerate and left unnormalized.
pub const NORM_EPSILON: f64 = 1e-10;

/// Maximum distance from 1.0 for a norm to count as "unit".
pub const UNIT_NORM_TOLERANCE: f64 = 1e-6;

/// Maximum absolute score difference tolerated between the two search strategies.
pub const STRATEGY_SCORE_TOLERANCE: f64 = 1e-4;

/// Output dimension of the hashed stub source.
pub const DEFAULT_STUB_DIM: usize = 512;

/// Token budget for the BERT source (longer inputs are truncated).
pub const DEFAULT_MAX_SEQ_LEN: usize = 512;

/// Identifier reported by the stub source.
pub const STUB_MODEL_IDENTIFIER: &str = "sembed-stub-hashed-tokens";

/// Error returned when two dimensions that must agree do not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimValidationError {
    /// Embedding dimension cannot be zero.
    ZeroDimension,
    /// Runtime dimension does not match expected dimension.
    DimensionMismatch { expected: usize, actual: usize },
}

impl std::fmt::Display for DimValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroDimension => write!(f, "embedding dimension cannot be zero"),
            Self::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "dimension mismatch: expected {}, got {}",
                    expected, actual
                )
            }
        }
    }
}

impl std::error::Error for DimValidationError {}

/// Validates that a runtime embedding dimension is non-zero and matches the expected one.
///
/// # Example
///
/// ```
/// use sembed::constants::validate_embedding_dim;
///
/// validate_embedding_dim(512, 512).unwrap();
/// assert!(validate_embedding_dim(384, 512).is_err());
/// ```
pub fn validate_embedding_dim(actual: usize, expected: usize) -> Result<(), DimValidationError> {
    if actual == 0 {
        return Err(DimValidationError::ZeroDimension);
    }
    if actual != expected {
        return Err(DimValidationError::DimensionMismatch { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_embedding_dim_match() {
        assert!(validate_embedding_dim(512, 512).is_ok());
    }

    #[test]
    fn test_validate_embedding_dim_zero() {
        assert_eq!(
            validate_embedding_dim(0, 512),
            Err(DimValidationError::ZeroDimension)
        );
    }

    #[test]
    fn test_validate_embedding_dim_mismatch() {
        assert_eq!(
            validate_embedding_dim(768, 512),
            Err(DimValidationError::DimensionMismatch {
                expected: 512,
                actual: 768
            })
        );
    }

    #[test]
    fn test_error_display() {
        let err = DimValidationError::ZeroDimension;
        assert_eq!(err.to_string(), "embedding dimension cannot be zero");

        let err = DimValidationError::DimensionMismatch {
            expected: 512,
            actual: 768,
        };
        assert!(err.to_string().contains("512"));
        assert!(err.to_string().contains("768"));
    }

    #[test]
    fn test_tolerances_are_ordered() {
        assert!(NORM_EPSILON < UNIT_NORM_TOLERANCE);
        assert!(UNIT_NORM_TOLERANCE < STRATEGY_SCORE_TOLERANCE);
    }
}
