//! The page and JSON API served by the demo.
//!
//! | Route | |
//! |-------|--|
//! | `GET /` | the page; `?example=<key>` pre-fills the text area |
//! | `POST /analyze` | form submission, re-renders the page with results |
//! | `POST /api/analyze` | `{"text": ...}` → `{"label": ..., "score": ...}` |
//! | `POST /api/analyze/batch` | `{"texts": [...]}` → one result per text, same order |
//! | `GET /health` | model name and whether it is loaded |

pub mod examples;
pub mod handlers;
pub mod view;

use crate::analyzer::SentimentAnalyzer;
use crate::core::{AppConfig, Result, SentimentError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use minijinja::Environment;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

/// Shared, read-only state handed to every handler.
pub struct AppState {
    pub analyzer: Arc<SentimentAnalyzer>,
    pub templates: Environment<'static>,
    pub analysis_delay: Duration,
}

impl AppState {
    pub fn new(analyzer: Arc<SentimentAnalyzer>, analysis_delay: Duration) -> Result<Self> {
        let mut templates = Environment::new();
        templates.add_template("index.html", include_str!("templates/index.html"))?;
        Ok(Self {
            analyzer,
            templates,
            analysis_delay,
        })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/analyze", post(handlers::analyze_page))
        .route("/api/analyze", post(handlers::analyze_json))
        .route("/api/analyze/batch", post(handlers::analyze_batch_json))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves until Ctrl-C.
pub async fn serve(config: &AppConfig, state: Arc<AppState>) -> Result<()> {
    let addr = config.socket_addr();
    let server = axum::Server::try_bind(&addr)
        .map_err(|e| SentimentError::Server(format!("cannot bind {addr}: {e}")))?;
    tracing::info!(%addr, "listening on http://{addr}");

    server
        .serve(router(state).into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| SentimentError::Server(e.to_string()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

/// Error surface of the HTTP layer.
#[derive(Debug)]
pub enum WebError {
    /// Rejected before reaching the analyzer.
    BadRequest(String),
    Internal(SentimentError),
}

impl From<SentimentError> for WebError {
    fn from(value: SentimentError) -> Self {
        WebError::Internal(value)
    }
}

impl From<minijinja::Error> for WebError {
    fn from(value: minijinja::Error) -> Self {
        WebError::Internal(value.into())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            WebError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            WebError::Internal(error) => {
                tracing::error!(error = %error, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
