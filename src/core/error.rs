use thiserror::Error;

/// Errors produced anywhere between the hub download and the rendered page.
#[derive(Error, Debug)]
pub enum SentimentError {
    // Model loading
    #[error("Download failed: {0}")]
    Download(String),

    #[error("Invalid model format: {0}")]
    ModelFormat(String),

    #[error("Model metadata missing: {0}")]
    ModelMetadata(String),

    // Tokenization
    #[error("Tokenization failed: {0}")]
    Tokenization(String),

    // Inference
    #[error("Inference failed: {0}")]
    Inference(String),

    // Device
    #[error("Device error: {0}")]
    Device(String),

    // Configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    // HTTP server
    #[error("Server error: {0}")]
    Server(String),

    // Pass-through from dependencies
    #[error(transparent)]
    Candle(#[from] candle_core::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    #[error(transparent)]
    Template(#[from] minijinja::Error),

    #[error("Inference task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, SentimentError>;

impl From<hf_hub::api::tokio::ApiError> for SentimentError {
    fn from(value: hf_hub::api::tokio::ApiError) -> Self {
        SentimentError::Download(value.to_string())
    }
}
