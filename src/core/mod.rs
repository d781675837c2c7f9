pub mod classification;
pub mod config;
pub mod error;

pub use classification::{ClassificationResult, SentimentCategory};
pub use config::{AppConfig, DEFAULT_MODEL};
pub use error::{Result, SentimentError};
