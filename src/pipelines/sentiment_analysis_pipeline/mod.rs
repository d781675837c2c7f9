//! Sentiment analysis pipeline for classifying the emotional tone of text.
//!
//! ## Main Types
//!
//! - [`SentimentAnalysisPipeline`] - loaded model plus tokenizer, single and batch prediction
//! - [`SentimentAnalysisPipelineBuilder`] - hub download, device selection and loading
//! - [`SentimentAnalysisModel`] - trait for classifier implementations
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use sentiment_demo::pipelines::sentiment_analysis_pipeline::*;
//!
//! # async fn run() -> sentiment_demo::core::Result<()> {
//! let pipeline = SentimentAnalysisPipelineBuilder::multilingual().build().await?;
//!
//! let result = pipeline.predict("I love this product!")?;
//! println!("Sentiment: {} (confidence: {:.2})", result.label, result.score);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod model;
pub mod pipeline;

pub use builder::SentimentAnalysisPipelineBuilder;
pub use model::SentimentAnalysisModel;
pub use pipeline::SentimentAnalysisPipeline;
