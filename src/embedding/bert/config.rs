use std::path::PathBuf;

use crate::constants::DEFAULT_MAX_SEQ_LEN;
use crate::embedding::error::EmbeddingError;

pub const CONFIG_FILE: &str = "config.json";
pub const WEIGHTS_FILE: &str = "model.safetensors";
pub const TOKENIZER_FILE: &str = "tokenizer.json";

/// Configuration for [`BertSource`](super::BertSource).
#[derive(Debug, Clone)]
pub struct BertConfig {
    /// Directory holding `config.json`, `model.safetensors` and `tokenizer.json`.
    pub model_dir: PathBuf,
    /// Max tokens fed to the model.
    pub max_seq_len: usize,
}

impl BertConfig {
    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            model_dir: model_dir.into(),
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
        }
    }

    pub fn with_max_seq_len(mut self, max_seq_len: usize) -> Self {
        self.max_seq_len = max_seq_len;
        self
    }

    pub fn config_path(&self) -> PathBuf {
        self.model_dir.join(CONFIG_FILE)
    }

    pub fn weights_path(&self) -> PathBuf {
        self.model_dir.join(WEIGHTS_FILE)
    }

    pub fn tokenizer_path(&self) -> PathBuf {
        self.model_dir.join(TOKENIZER_FILE)
    }

    /// Returns the first required file that is missing, if any.
    pub fn missing_asset(&self) -> Option<PathBuf> {
        if !self.model_dir.is_dir() {
            return Some(self.model_dir.clone());
        }

        [self.config_path(), self.weights_path(), self.tokenizer_path()]
            .into_iter()
            .find(|path| !path.exists())
    }

    /// Returns `true` if every model file is present.
    pub fn assets_available(&self) -> bool {
        self.missing_asset().is_none()
    }

    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.model_dir.as_os_str().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "model_dir cannot be empty".to_string(),
            });
        }

        if self.max_seq_len == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "max_seq_len must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}
