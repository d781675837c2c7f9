use crate::core::{ClassificationResult, Result, SentimentError};
use crate::loaders::ModelFiles;
use tokenizers::Tokenizer;

/// A sequence-classification network that scores text sentiment.
pub trait SentimentAnalysisModel: Send + Sync {
    /// Builds the model from downloaded checkpoint files.
    fn load(files: &ModelFiles, device: &candle_core::Device) -> Result<Self>
    where
        Self: Sized;

    /// Applies the padding/truncation the model expects to a freshly loaded tokenizer.
    fn configure_tokenizer(_tokenizer: &mut Tokenizer) -> Result<()> {
        Ok(())
    }

    /// Scores every text in one forward pass. Returns one result per input, in order.
    fn predict_with_score_batch(
        &self,
        tokenizer: &Tokenizer,
        texts: &[&str],
    ) -> Result<Vec<ClassificationResult>>;

    fn predict_with_score(&self, tokenizer: &Tokenizer, text: &str) -> Result<ClassificationResult> {
        self.predict_with_score_batch(tokenizer, &[text])?
            .pop()
            .ok_or_else(|| SentimentError::Inference("No predictions returned".into()))
    }

    fn device(&self) -> &candle_core::Device;
}
