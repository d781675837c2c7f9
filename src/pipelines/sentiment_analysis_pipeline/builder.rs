use super::model::SentimentAnalysisModel;
use super::pipeline::SentimentAnalysisPipeline;
use crate::core::{Result, DEFAULT_MODEL};
use crate::loaders::{ModelFilesLoader, TokenizerLoader};
use crate::models::DistilBertSentimentModel;
use crate::pipelines::utils::{DeviceRequest, DeviceSelectable};
use std::marker::PhantomData;

/// Builder for a sentiment pipeline backed by a Hugging Face Hub checkpoint.
///
/// Start with [`SentimentAnalysisPipelineBuilder::distilbert`], then chain
/// optional settings:
/// - `.revision(String)`: git revision (branch, tag, commit hash), `main` by default.
/// - `.cpu()`, `.cuda_device(i)`, `.device(d)`, `.device_request(r)`: device selection.
///
/// Finally, `.build().await` downloads whatever is not cached yet and loads the model.
pub struct SentimentAnalysisPipelineBuilder<M: SentimentAnalysisModel> {
    model_id: String,
    revision: String,
    device_request: DeviceRequest,
    _model: PhantomData<M>,
}

impl<M: SentimentAnalysisModel> SentimentAnalysisPipelineBuilder<M> {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            revision: "main".to_string(),
            device_request: DeviceRequest::Default,
            _model: PhantomData,
        }
    }

    pub fn revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = revision.into();
        self
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub async fn build(self) -> Result<SentimentAnalysisPipeline<M>> {
        let device = self.device_request.resolve()?;

        tracing::info!(
            model = %self.model_id,
            revision = %self.revision,
            "loading sentiment model (this might take a while)"
        );
        let files = ModelFilesLoader::new(&self.model_id, &self.revision)
            .load()
            .await?;
        let mut tokenizer = TokenizerLoader::new(&self.model_id, &self.revision)
            .load()
            .await?;
        M::configure_tokenizer(&mut tokenizer)?;

        let model = M::load(&files, &device)?;
        tracing::info!(model = %self.model_id, "sentiment model loaded");

        Ok(SentimentAnalysisPipeline { model, tokenizer })
    }
}

impl<M: SentimentAnalysisModel> DeviceSelectable for SentimentAnalysisPipelineBuilder<M> {
    fn device_request_mut(&mut self) -> &mut DeviceRequest {
        &mut self.device_request
    }
}

impl SentimentAnalysisPipelineBuilder<DistilBertSentimentModel> {
    /// DistilBERT sequence classifier, e.g. the default multilingual sentiment model.
    pub fn distilbert(model_id: impl Into<String>) -> Self {
        Self::new(model_id)
    }

    pub fn multilingual() -> Self {
        Self::new(DEFAULT_MODEL)
    }
}
