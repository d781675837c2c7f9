use super::view::{PageView, ResultView, EMPTY_INPUT_WARNING};
use super::{AppState, WebError};
use crate::core::ClassificationResult;
use axum::extract::{Form, Json, Query, State};
use axum::response::Html;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    pub example: Option<String>,
}

/// Checkboxes are only submitted when ticked.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeForm {
    #[serde(default)]
    pub text: String,
    pub show_raw: Option<String>,
    pub show_chart: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeBatchRequest {
    pub texts: Vec<String>,
}

fn render(state: &AppState, page: &PageView) -> Result<Html<String>, WebError> {
    let html = state.templates.get_template("index.html")?.render(page)?;
    Ok(Html(html))
}

pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IndexQuery>,
) -> Result<Html<String>, WebError> {
    let example = query.example.as_deref();
    let text = example
        .and_then(super::examples::find)
        .map_or("", |example| example.text);
    let page = PageView::new(state.analyzer.model_name(), text, example, false, true);
    render(&state, &page)
}

pub async fn analyze_page(
    State(state): State<Arc<AppState>>,
    Form(form): Form<AnalyzeForm>,
) -> Result<Html<String>, WebError> {
    let show_raw = form.show_raw.is_some();
    let show_chart = form.show_chart.is_some();
    let mut page = PageView::new(
        state.analyzer.model_name(),
        form.text.as_str(),
        None,
        show_raw,
        show_chart,
    );

    if form.text.trim().is_empty() {
        warn!("rejected empty input");
        page.warning = Some(EMPTY_INPUT_WARNING);
        return render(&state, &page);
    }

    if !state.analysis_delay.is_zero() {
        tokio::time::sleep(state.analysis_delay).await;
    }

    let result = state.analyzer.analyze(&form.text).await?;
    page.result = Some(ResultView::new(&result, show_raw, show_chart)?);
    render(&state, &page)
}

pub async fn analyze_json(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<ClassificationResult>, WebError> {
    if request.text.trim().is_empty() {
        warn!("rejected empty input");
        return Err(WebError::BadRequest(EMPTY_INPUT_WARNING.to_string()));
    }
    let result = state.analyzer.analyze(&request.text).await?;
    Ok(Json(result))
}

pub async fn analyze_batch_json(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeBatchRequest>,
) -> Result<Json<Vec<ClassificationResult>>, WebError> {
    if request.texts.is_empty() {
        return Err(WebError::BadRequest("texts must not be empty".to_string()));
    }
    if let Some(index) = request.texts.iter().position(|text| text.trim().is_empty()) {
        warn!(index, "rejected empty input in batch");
        return Err(WebError::BadRequest(format!(
            "texts[{index}]: {EMPTY_INPUT_WARNING}"
        )));
    }
    let results = state.analyzer.analyze_batch(&request.texts).await?;
    Ok(Json(results))
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "model": state.analyzer.model_name(),
        "loaded": state.analyzer.is_loaded(),
    }))
}
