//! Multilingual sentiment analysis demo.
//!
//! A [`SentimentAnalyzer`] lazily binds a classification backend (by default a
//! DistilBERT checkpoint from the Hugging Face Hub, run locally with Candle)
//! and the [`web`] module serves a single page plus a JSON API on top of it.

pub mod analyzer;
pub mod core;
pub mod loaders;
pub mod models;
pub mod pipelines;
pub mod presentation;
pub mod web;

pub use analyzer::{ClassificationBackend, SentimentAnalyzer};
pub use crate::core::{AppConfig, ClassificationResult, SentimentCategory, SentimentError};
