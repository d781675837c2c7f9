use anyhow::Context;
use sentiment_demo::web::{self, AppState};
use sentiment_demo::{AppConfig, SentimentAnalyzer};
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::from_env().context("failed to read configuration")?;
    tracing::info!(model = %config.model_name, device = ?config.device, "starting sentiment demo");

    let analyzer = Arc::new(SentimentAnalyzer::from_hub(
        config.model_name.clone(),
        config.model_revision.clone(),
        config.device.clone(),
    ));

    if config.preload {
        analyzer
            .load()
            .await
            .with_context(|| format!("failed to load model {}", config.model_name))?;
    }

    let state = Arc::new(AppState::new(Arc::clone(&analyzer), config.analysis_delay)?);
    web::serve(&config, state).await?;
    Ok(())
}
