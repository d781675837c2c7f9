//! The analyzer wrapper: a lazily bound, shared classification backend.
//!
//! The backend is not a process-wide global. A [`SentimentAnalyzer`] is built
//! once at startup with a [`BackendFactory`] and handed to whatever needs
//! classification; the factory runs on first use and its result is kept for
//! the life of the analyzer.

use crate::core::{ClassificationResult, Result};
use crate::pipelines::sentiment_analysis_pipeline::SentimentAnalysisPipelineBuilder;
use crate::pipelines::utils::{DeviceRequest, DeviceSelectable};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Anything that can turn text into a sentiment label and score.
pub trait ClassificationBackend: Send + Sync {
    fn classify(&self, text: &str) -> Result<ClassificationResult>;

    /// One result per input, in input order.
    fn classify_batch(&self, texts: &[&str]) -> Result<Vec<ClassificationResult>>;
}

pub type SharedBackend = Arc<dyn ClassificationBackend>;

pub type BackendFuture = Pin<Box<dyn Future<Output = Result<SharedBackend>> + Send>>;

/// Creates the backend for a model name. Called at most once per analyzer.
pub type BackendFactory = Box<dyn Fn(String) -> BackendFuture + Send + Sync>;

pub struct SentimentAnalyzer {
    model_name: String,
    factory: BackendFactory,
    backend: OnceCell<SharedBackend>,
}

impl SentimentAnalyzer {
    pub fn new(model_name: impl Into<String>, factory: BackendFactory) -> Self {
        Self {
            model_name: model_name.into(),
            factory,
            backend: OnceCell::new(),
        }
    }

    /// An analyzer whose backend downloads `model_name` from the hub and runs
    /// it locally as a DistilBERT classifier.
    pub fn from_hub(
        model_name: impl Into<String>,
        revision: impl Into<String>,
        device: DeviceRequest,
    ) -> Self {
        let revision = revision.into();
        let factory: BackendFactory = Box::new(move |model_name: String| {
            let revision = revision.clone();
            let device = device.clone();
            Box::pin(async move {
                let pipeline = SentimentAnalysisPipelineBuilder::distilbert(model_name)
                    .revision(revision)
                    .device_request(device)
                    .build()
                    .await?;
                Ok(Arc::new(pipeline) as SharedBackend)
            }) as BackendFuture
        });
        Self::new(model_name, factory)
    }

    /// An analyzer bound to an already constructed backend.
    pub fn with_backend(model_name: impl Into<String>, backend: SharedBackend) -> Self {
        let factory: BackendFactory = Box::new(|model_name: String| {
            Box::pin(async move {
                Err::<SharedBackend, _>(crate::core::SentimentError::Config(format!(
                    "backend for {model_name} was expected to be preset"
                )))
            }) as BackendFuture
        });
        Self {
            model_name: model_name.into(),
            factory,
            backend: OnceCell::new_with(Some(backend)),
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn is_loaded(&self) -> bool {
        self.backend.initialized()
    }

    /// Binds the backend if that has not happened yet and returns it.
    ///
    /// Concurrent callers wait for a single initialisation. A failed
    /// initialisation leaves the analyzer unbound, so the next call tries again.
    pub async fn load(&self) -> Result<SharedBackend> {
        let backend = self
            .backend
            .get_or_try_init(|| {
                tracing::info!(model = %self.model_name, "binding classification backend");
                (self.factory)(self.model_name.clone())
            })
            .await?;
        Ok(Arc::clone(backend))
    }

    /// Classifies one text. The text is passed through unvalidated.
    pub async fn analyze(&self, text: &str) -> Result<ClassificationResult> {
        let backend = self.load().await?;
        let text = text.to_owned();
        let result = tokio::task::spawn_blocking(move || backend.classify(&text)).await??;
        tracing::debug!(label = %result.label, score = result.score, "analyzed text");
        Ok(result)
    }

    /// Classifies every text with a single backend call, preserving order.
    pub async fn analyze_batch(&self, texts: &[String]) -> Result<Vec<ClassificationResult>> {
        let backend = self.load().await?;
        let texts = texts.to_vec();
        let results = tokio::task::spawn_blocking(move || {
            let borrowed: Vec<&str> = texts.iter().map(String::as_str).collect();
            backend.classify_batch(&borrowed)
        })
        .await??;
        tracing::debug!(count = results.len(), "analyzed batch");
        Ok(results)
    }
}

impl std::fmt::Debug for SentimentAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentAnalyzer")
            .field("model_name", &self.model_name)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SentimentError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Labels a text "Positive" if it contains "love", else "Negative".
    struct KeywordBackend;

    impl ClassificationBackend for KeywordBackend {
        fn classify(&self, text: &str) -> Result<ClassificationResult> {
            let label = if text.contains("love") { "Positive" } else { "Negative" };
            Ok(ClassificationResult::new(label, 0.9))
        }

        fn classify_batch(&self, texts: &[&str]) -> Result<Vec<ClassificationResult>> {
            texts.iter().map(|text| self.classify(text)).collect()
        }
    }

    struct FailingBackend;

    impl ClassificationBackend for FailingBackend {
        fn classify(&self, _text: &str) -> Result<ClassificationResult> {
            Err(SentimentError::Inference("backend exploded".into()))
        }

        fn classify_batch(&self, _texts: &[&str]) -> Result<Vec<ClassificationResult>> {
            Err(SentimentError::Inference("backend exploded".into()))
        }
    }

    fn counting_analyzer(calls: Arc<AtomicUsize>) -> SentimentAnalyzer {
        SentimentAnalyzer::new(
            "test/model",
            Box::new(move |name: String| {
                let calls = Arc::clone(&calls);
                Box::pin(async move {
                    assert_eq!(name, "test/model");
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(Arc::new(KeywordBackend) as SharedBackend)
                }) as BackendFuture
            }),
        )
    }

    #[tokio::test]
    async fn backend_is_bound_lazily_and_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let analyzer = counting_analyzer(Arc::clone(&calls));
        assert!(!analyzer.is_loaded());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        analyzer.analyze("I love it").await.unwrap();
        analyzer.analyze("meh").await.unwrap();
        analyzer
            .analyze_batch(&["a".to_string(), "b".to_string()])
            .await
            .unwrap();

        assert!(analyzer.is_loaded());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_first_calls_initialise_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let analyzer = Arc::new(counting_analyzer(Arc::clone(&calls)));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let analyzer = Arc::clone(&analyzer);
                tokio::spawn(async move { analyzer.analyze("I love it").await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn batch_preserves_order_and_length() {
        let analyzer = SentimentAnalyzer::with_backend("test/model", Arc::new(KeywordBackend));
        let results = analyzer
            .analyze_batch(&["terrible".to_string(), "I love it".to_string()])
            .await
            .unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].label, "Negative");
        assert_eq!(results[1].label, "Positive");
    }

    #[tokio::test]
    async fn backend_errors_propagate_unchanged() {
        let analyzer = SentimentAnalyzer::with_backend("test/model", Arc::new(FailingBackend));
        let err = analyzer.analyze("anything").await.unwrap_err();
        assert!(matches!(err, SentimentError::Inference(ref msg) if msg == "backend exploded"));
    }

    #[tokio::test]
    async fn failed_load_is_retried_on_next_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let analyzer = SentimentAnalyzer::new(
            "test/model",
            Box::new(move |_: String| {
                let counter = Arc::clone(&counter);
                Box::pin(async move {
                    if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                        Err(SentimentError::Download("hub unreachable".into()))
                    } else {
                        Ok(Arc::new(KeywordBackend) as SharedBackend)
                    }
                }) as BackendFuture
            }),
        );

        let err = analyzer.analyze("I love it").await.unwrap_err();
        assert!(matches!(err, SentimentError::Download(_)));
        assert!(!analyzer.is_loaded());

        let result = analyzer.analyze("I love it").await.unwrap();
        assert_eq!(result.label, "Positive");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn preset_backend_is_already_loaded() {
        let analyzer = SentimentAnalyzer::with_backend("test/model", Arc::new(KeywordBackend));
        assert!(analyzer.is_loaded());
        assert_eq!(analyzer.model_name(), "test/model");
    }
}
