//! DistilBERT with a sequence-classification head.
//!
//! Mirrors the layout of `DistilBertForSequenceClassification` checkpoints:
//! the encoder under `distilbert.*`, then `pre_classifier` (dim → dim, ReLU)
//! and `classifier` (dim → num_labels) applied to the first token.

use crate::core::{ClassificationResult, Result, SentimentError};
use crate::loaders::ModelFiles;
use crate::pipelines::sentiment_analysis_pipeline::SentimentAnalysisModel;
use candle_core::{DType, Device, IndexOp, Tensor, D};
use candle_nn::{linear, Linear, Module, VarBuilder};
use candle_transformers::models::distilbert::{Config, DistilBertModel};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tokenizers::{PaddingParams, PaddingStrategy, Tokenizer, TruncationParams};

/// Position embeddings stop here; longer inputs are truncated.
const MAX_SEQUENCE_LENGTH: usize = 512;

/// Classification metadata that the encoder config does not expose.
#[derive(Debug, Clone, Deserialize)]
struct ClassifierConfig {
    dim: usize,
    id2label: HashMap<String, String>,
}

pub struct DistilBertSentimentModel {
    encoder: DistilBertModel,
    pre_classifier: Linear,
    classifier: Linear,
    id2label: Vec<String>,
    device: Device,
}

impl DistilBertSentimentModel {
    pub fn load(files: &ModelFiles, device: &Device) -> Result<Self> {
        let config_content = std::fs::read_to_string(&files.config).map_err(|e| {
            SentimentError::ModelMetadata(format!(
                "Failed to read config file {:?}: {e}",
                files.config
            ))
        })?;

        let config: Config = serde_json::from_str(&config_content).map_err(|e| {
            SentimentError::ModelMetadata(format!("Failed to parse model config: {e}"))
        })?;
        let class_cfg: ClassifierConfig = serde_json::from_str(&config_content).map_err(|e| {
            SentimentError::ModelMetadata(format!("Failed to parse classifier config: {e}"))
        })?;
        let id2label = labels_in_order(&class_cfg.id2label)?;

        let vb = load_var_builder(&files.weights, device)?;
        let encoder = DistilBertModel::load(vb.clone(), &config)?;
        let pre_classifier = linear(class_cfg.dim, class_cfg.dim, vb.pp("pre_classifier"))?;
        let classifier = linear(class_cfg.dim, id2label.len(), vb.pp("classifier"))?;

        tracing::info!(
            labels = ?id2label,
            device = ?device.location(),
            "loaded DistilBERT sentiment classifier"
        );

        Ok(Self {
            encoder,
            pre_classifier,
            classifier,
            id2label,
            device: device.clone(),
        })
    }

    /// Runs one padded batch and returns per-row class probabilities.
    fn probabilities(&self, tokenizer: &Tokenizer, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let encodings = tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| SentimentError::Tokenization(e.to_string()))?;

        let batch_size = encodings.len();
        let seq_len = encodings.first().map_or(0, |e| e.get_ids().len());

        let mut token_ids = Vec::with_capacity(batch_size * seq_len);
        let mut padding_mask = Vec::with_capacity(batch_size * seq_len);
        for encoding in &encodings {
            token_ids.extend_from_slice(encoding.get_ids());
            // DistilBERT masks positions flagged with 1.
            padding_mask.extend(encoding.get_attention_mask().iter().map(|&m| u8::from(m == 0)));
        }

        let input_ids = Tensor::from_vec(token_ids, (batch_size, seq_len), &self.device)?;
        let mask = Tensor::from_vec(padding_mask, (batch_size, 1, 1, seq_len), &self.device)?;

        let hidden = self.encoder.forward(&input_ids, &mask)?;
        let first_token = hidden.i((.., 0))?;
        let pooled = self.pre_classifier.forward(&first_token)?.relu()?;
        let logits = self.classifier.forward(&pooled)?;

        let probabilities = candle_nn::ops::softmax(&logits, D::Minus1)?
            .to_dtype(DType::F32)?
            .to_vec2::<f32>()?;
        Ok(probabilities)
    }
}

impl SentimentAnalysisModel for DistilBertSentimentModel {
    fn load(files: &ModelFiles, device: &Device) -> Result<Self> {
        DistilBertSentimentModel::load(files, device)
    }

    fn configure_tokenizer(tokenizer: &mut Tokenizer) -> Result<()> {
        let pad_id = tokenizer.get_padding().map_or(0, |p| p.pad_id);
        let pad_token = tokenizer
            .id_to_token(pad_id)
            .unwrap_or_else(|| "[PAD]".to_string());
        tokenizer.with_padding(Some(PaddingParams {
            strategy: PaddingStrategy::BatchLongest,
            pad_id,
            pad_token,
            ..Default::default()
        }));
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_SEQUENCE_LENGTH,
                ..Default::default()
            }))
            .map_err(|e| SentimentError::Tokenization(e.to_string()))?;
        Ok(())
    }

    fn predict_with_score_batch(
        &self,
        tokenizer: &Tokenizer,
        texts: &[&str],
    ) -> Result<Vec<ClassificationResult>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.probabilities(tokenizer, texts)?
            .iter()
            .map(|row| best_label(row, &self.id2label))
            .collect()
    }

    fn device(&self) -> &Device {
        &self.device
    }
}

fn load_var_builder(weights: &Path, device: &Device) -> Result<VarBuilder<'static>> {
    let dtype = DType::F32;
    match weights.extension().and_then(|ext| ext.to_str()) {
        // SAFETY: the hub cache file is not modified while mapped.
        Some("safetensors") => Ok(unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights], dtype, device)?
        }),
        Some("bin") => Ok(VarBuilder::from_pth(weights, dtype, device)?),
        _ => Err(SentimentError::ModelFormat(format!(
            "Unsupported weight file format: {weights:?}"
        ))),
    }
}

/// Orders `id2label` by numeric class id; ids must be exactly `0..n`.
fn labels_in_order(id2label: &HashMap<String, String>) -> Result<Vec<String>> {
    if id2label.is_empty() {
        return Err(SentimentError::ModelMetadata(
            "id2label is empty".to_string(),
        ));
    }
    let mut labels = vec![None; id2label.len()];
    for (id, label) in id2label {
        let index: usize = id
            .parse()
            .map_err(|_| SentimentError::ModelMetadata(format!("non-numeric class id '{id}'")))?;
        let slot = labels.get_mut(index).ok_or_else(|| {
            SentimentError::ModelMetadata(format!("class id {index} out of range"))
        })?;
        *slot = Some(label.clone());
    }
    labels
        .into_iter()
        .enumerate()
        .map(|(i, label)| {
            label.ok_or_else(|| SentimentError::ModelMetadata(format!("class id {i} missing")))
        })
        .collect()
}

/// Picks the most probable class of one row.
fn best_label(probabilities: &[f32], labels: &[String]) -> Result<ClassificationResult> {
    let (index, score) = probabilities
        .iter()
        .copied()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .ok_or_else(|| SentimentError::Inference("model returned no logits".to_string()))?;
    let label = labels.get(index).ok_or_else(|| {
        SentimentError::ModelMetadata(format!(
            "Predicted ID '{index}' not found in id2label map"
        ))
    })?;
    Ok(ClassificationResult::new(label.clone(), score))
}
