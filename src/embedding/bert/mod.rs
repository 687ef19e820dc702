//! BERT-family contextual token vectors via candle.
//!
//! Loads a Hugging Face style model directory and yields the last hidden state of
//! every non-special token. CLS, SEP and PAD positions are skipped so they do not
//! dilute the mean.

/// BERT source configuration.
pub mod config;
pub(crate) mod model;


pub use config::{BertConfig, CONFIG_FILE, TOKENIZER_FILE, WEIGHTS_FILE};

use candle_core::{DType, Device, IndexOp, Tensor};
use tokenizers::Tokenizer;
use tracing::{debug, info};

use crate::embedding::device::select_device;
use crate::embedding::error::EmbeddingError;
use crate::embedding::source::TokenVectorSource;
use crate::embedding::utils::load_tokenizer_with_truncation;

use model::BertTokenModel;

pub struct BertSource {
    identifier: String,
    model: BertTokenModel,
    tokenizer: Tokenizer,
    device: Device,
    config: BertConfig,
}

impl std::fmt::Debug for BertSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BertSource")
            .field("identifier", &self.identifier)
            .field("device", &format!("{:?}", self.device))
            .field("hidden_size", &self.model.hidden_size())
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl BertSource {
    /// Loads the model; fails with [`EmbeddingError::MissingAssets`] when any file is absent.
    pub fn load(config: BertConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        if let Some(path) = config.missing_asset() {
            return Err(EmbeddingError::MissingAssets { path });
        }

        let device = select_device();
        debug!(?device, "Selected compute device for BERT source");

        info!(
            model_dir = %config.model_dir.display(),
            max_seq_len = config.max_seq_len,
            "Loading BERT token model"
        );

        let model = BertTokenModel::load(&config.config_path(), &config.weights_path(), &device)
            .map_err(|e| EmbeddingError::ModelUnavailable {
                reason: format!("Failed to load BERT model: {}", e),
            })?;

        let tokenizer = load_tokenizer_with_truncation(&config.tokenizer_path(), config.max_seq_len)
            .map_err(|e| EmbeddingError::ModelUnavailable {
                reason: format!("Failed to load tokenizer: {}", e),
            })?;

        let identifier = config
            .model_dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| config.model_dir.display().to_string());

        info!(
            identifier = %identifier,
            hidden_size = model.hidden_size(),
            "BERT token model loaded"
        );

        Ok(Self {
            identifier,
            model,
            tokenizer,
            device,
            config,
        })
    }

    pub fn config(&self) -> &BertConfig {
        &self.config
    }

    fn hidden_states(&self, sentence: &str) -> Result<(Vec<Vec<f64>>, Vec<u32>), EmbeddingError> {
        let encoding = self.tokenizer.encode(sentence, true).map_err(|e| {
            EmbeddingError::TokenizationFailed {
                reason: e.to_string(),
            }
        })?;

        let ids = encoding.get_ids();
        if ids.is_empty() {
            return Ok((Vec::new(), Vec::new()));
        }

        let input_ids = Tensor::new(ids, &self.device)?.unsqueeze(0)?;
        let type_ids = Tensor::new(encoding.get_type_ids(), &self.device)?.unsqueeze(0)?;
        let attention_mask = Tensor::new(encoding.get_attention_mask(), &self.device)?.unsqueeze(0)?;

        let hidden = self
            .model
            .forward(&input_ids, &type_ids, &attention_mask)
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("BERT forward pass failed: {}", e),
            })?;

        // [1, seq_len, hidden] -> [seq_len, hidden]
        let rows = hidden.i(0)?.to_dtype(DType::F64)?.to_vec2::<f64>()?;

        Ok((rows, encoding.get_special_tokens_mask().to_vec()))
    }
}

impl TokenVectorSource for BertSource {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn dimension(&self) -> usize {
        self.model.hidden_size()
    }

    fn has_available_assets(&self) -> bool {
        self.config.assets_available()
    }

    fn enumerate_token_vectors(
        &self,
        sentence: &str,
        language: Option<&str>,
        visit: &mut dyn FnMut(&[f64]),
    ) -> Result<(), EmbeddingError> {
        // The tokenizer is language-agnostic; the hint is only logged.
        let (rows, special_mask) = self.hidden_states(sentence)?;

        debug!(
            text_len = sentence.len(),
            seq_len = rows.len(),
            language,
            "Generated BERT token vectors"
        );

        for (row, special) in rows.iter().zip(special_mask) {
            if special == 0 {
                visit(row);
            }
        }
        Ok(())
    }
}
