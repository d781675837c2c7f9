use super::model::SentimentAnalysisModel;
use crate::analyzer::ClassificationBackend;
use crate::core::{ClassificationResult, Result, SentimentError};
use tokenizers::Tokenizer;

/// A loaded model together with its tokenizer.
///
/// Construct with [`SentimentAnalysisPipelineBuilder`](super::SentimentAnalysisPipelineBuilder).
pub struct SentimentAnalysisPipeline<M: SentimentAnalysisModel> {
    pub(crate) model: M,
    pub(crate) tokenizer: Tokenizer,
}

impl<M: SentimentAnalysisModel> SentimentAnalysisPipeline<M> {
    /// Predict sentiment with a structured result containing label and confidence score.
    pub fn predict(&self, text: &str) -> Result<ClassificationResult> {
        self.model.predict_with_score(&self.tokenizer, text)
    }

    /// Predict every text in one padded batch, preserving input order.
    pub fn predict_batch(&self, texts: &[&str]) -> Result<Vec<ClassificationResult>> {
        let results = self.model.predict_with_score_batch(&self.tokenizer, texts)?;
        if results.len() != texts.len() {
            return Err(SentimentError::Inference(format!(
                "expected {} predictions, model returned {}",
                texts.len(),
                results.len()
            )));
        }
        Ok(results)
    }

    pub fn device(&self) -> &candle_core::Device {
        self.model.device()
    }
}

impl<M: SentimentAnalysisModel> ClassificationBackend for SentimentAnalysisPipeline<M> {
    fn classify(&self, text: &str) -> Result<ClassificationResult> {
        self.predict(text)
    }

    fn classify_batch(&self, texts: &[&str]) -> Result<Vec<ClassificationResult>> {
        self.predict_batch(texts)
    }
}
