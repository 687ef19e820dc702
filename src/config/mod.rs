//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `SEMBED_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::PathBuf;

use crate::constants::{DEFAULT_MAX_SEQ_LEN, DEFAULT_OPTIMIZATION_THRESHOLD, DEFAULT_STUB_DIM};

/// Runtime configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `SEMBED_*` overrides on top of defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// BERT model directory. `None` runs the hashed stub source.
    pub model_path: Option<PathBuf>,

    /// Candidate count at which search switches to the batched strategy. Default: `100`.
    pub optimization_threshold: usize,

    /// Default minimum similarity applied by the CLI. Default: none.
    pub min_similarity: Option<f64>,

    /// Language hint passed to the token source. Default: none.
    pub language: Option<String>,

    /// Token budget for the BERT source. Default: `512`.
    pub max_seq_len: usize,

    /// Stub source dimension. Default: `512`.
    pub stub_dim: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: None,
            optimization_threshold: DEFAULT_OPTIMIZATION_THRESHOLD,
            min_similarity: None,
            language: None,
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
            stub_dim: DEFAULT_STUB_DIM,
        }
    }
}

impl Config {
    const ENV_MODEL_PATH: &'static str = "SEMBED_MODEL_PATH";
    const ENV_OPTIMIZATION_THRESHOLD: &'static str = "SEMBED_OPTIMIZATION_THRESHOLD";
    const ENV_MIN_SIMILARITY: &'static str = "SEMBED_MIN_SIMILARITY";
    const ENV_LANGUAGE: &'static str = "SEMBED_LANGUAGE";
    const ENV_MAX_SEQ_LEN: &'static str = "SEMBED_MAX_SEQ_LEN";
    const ENV_STUB_DIM: &'static str = "SEMBED_STUB_DIM";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let model_path = Self::parse_optional_string_from_env(Self::ENV_MODEL_PATH).map(PathBuf::from);
        let optimization_threshold = Self::parse_usize_from_env(
            Self::ENV_OPTIMIZATION_THRESHOLD,
            defaults.optimization_threshold,
        )?;
        let min_similarity = Self::parse_min_similarity_from_env()?;
        let language = Self::parse_optional_string_from_env(Self::ENV_LANGUAGE);
        let max_seq_len = Self::parse_usize_from_env(Self::ENV_MAX_SEQ_LEN, defaults.max_seq_len)?;
        let stub_dim = Self::parse_usize_from_env(Self::ENV_STUB_DIM, defaults.stub_dim)?;

        Ok(Self {
            model_path,
            optimization_threshold,
            min_similarity,
            language,
            max_seq_len,
            stub_dim,
        })
    }

    /// Validates paths and basic invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.model_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        if let Some(value) = self.min_similarity
            && !(-1.0..=1.0).contains(&value)
        {
            return Err(ConfigError::InvalidMinSimilarity { value });
        }

        if self.max_seq_len == 0 {
            return Err(ConfigError::ZeroValue {
                name: Self::ENV_MAX_SEQ_LEN,
            });
        }

        if self.stub_dim == 0 {
            return Err(ConfigError::ZeroValue {
                name: Self::ENV_STUB_DIM,
            });
        }

        Ok(())
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_usize_from_env(var_name: &'static str, default: usize) -> Result<usize, ConfigError> {
        match Self::parse_optional_string_from_env(var_name) {
            Some(value) => value.parse().map_err(|e| ConfigError::IntParseError {
                name: var_name,
                value,
                source: e,
            }),
            None => Ok(default),
        }
    }

    fn parse_min_similarity_from_env() -> Result<Option<f64>, ConfigError> {
        let Some(value) = Self::parse_optional_string_from_env(Self::ENV_MIN_SIMILARITY) else {
            return Ok(None);
        };

        value
            .parse()
            .map(Some)
            .map_err(|e| ConfigError::FloatParseError {
                name: Self::ENV_MIN_SIMILARITY,
                value,
                source: e,
            })
    }
}
