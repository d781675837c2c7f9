use crate::core::error::{Result, SentimentError};
use crate::pipelines::utils::DeviceRequest;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

/// Hub repository of the default multilingual sentiment model.
pub const DEFAULT_MODEL: &str = "tabularisai/multilingual-sentiment-analysis";

/// Runtime configuration for the demo server.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub model_name: String,
    pub model_revision: String,
    pub device: DeviceRequest,
    /// Pause before each page analysis so the spinner is visible.
    pub analysis_delay: Duration,
    /// Load the model before accepting requests instead of on first use.
    pub preload: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 8501,
            model_name: DEFAULT_MODEL.to_string(),
            model_revision: "main".to_string(),
            device: DeviceRequest::Default,
            analysis_delay: Duration::from_millis(500),
            preload: false,
        }
    }
}

impl AppConfig {
    /// Reads `SENTIMENT_*` variables, loading a `.env` file first if one exists.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Missing keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("SENTIMENT_HOST") {
            config.host = parse("SENTIMENT_HOST", &host)?;
        }
        if let Some(port) = lookup("SENTIMENT_PORT") {
            config.port = parse("SENTIMENT_PORT", &port)?;
        }
        if let Some(model) = lookup("SENTIMENT_MODEL") {
            if model.trim().is_empty() {
                return Err(SentimentError::Config(
                    "SENTIMENT_MODEL must not be empty".to_string(),
                ));
            }
            config.model_name = model.trim().to_string();
        }
        if let Some(revision) = lookup("SENTIMENT_MODEL_REVISION") {
            config.model_revision = revision.trim().to_string();
        }
        if let Some(device) = lookup("SENTIMENT_DEVICE") {
            config.device = parse("SENTIMENT_DEVICE", &device)?;
        }
        if let Some(delay) = lookup("SENTIMENT_ANALYSIS_DELAY_MS") {
            config.analysis_delay = Duration::from_millis(parse("SENTIMENT_ANALYSIS_DELAY_MS", &delay)?);
        }
        if let Some(preload) = lookup("SENTIMENT_PRELOAD") {
            config.preload = parse("SENTIMENT_PRELOAD", &preload)?;
        }

        Ok(config)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| SentimentError::Config(format!("{key}={value:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.model_name, DEFAULT_MODEL);
        assert_eq!(config.model_revision, "main");
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8501");
        assert_eq!(config.analysis_delay, Duration::from_millis(500));
        assert!(!config.preload);
        assert!(matches!(config.device, DeviceRequest::Default));
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("SENTIMENT_HOST", "0.0.0.0"),
            ("SENTIMENT_PORT", "9000"),
            ("SENTIMENT_MODEL", "someone/other-model"),
            ("SENTIMENT_DEVICE", "cuda:1"),
            ("SENTIMENT_ANALYSIS_DELAY_MS", "0"),
            ("SENTIMENT_PRELOAD", "true"),
        ]))
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:9000");
        assert_eq!(config.model_name, "someone/other-model");
        assert!(matches!(config.device, DeviceRequest::Cuda(1)));
        assert_eq!(config.analysis_delay, Duration::ZERO);
        assert!(config.preload);
    }

    #[test]
    fn rejects_bad_values() {
        let err = AppConfig::from_lookup(lookup(&[("SENTIMENT_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, SentimentError::Config(_)));
        assert!(err.to_string().contains("SENTIMENT_PORT"));

        let err = AppConfig::from_lookup(lookup(&[("SENTIMENT_DEVICE", "tpu")])).unwrap_err();
        assert!(matches!(err, SentimentError::Config(_)));

        let err = AppConfig::from_lookup(lookup(&[("SENTIMENT_MODEL", "  ")])).unwrap_err();
        assert!(matches!(err, SentimentError::Config(_)));
    }
}
