use crate::error::AppError;
use crate::state::DashboardState;
use crate::telemetry::{record_validation_error, PredictionSource};
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// Health endpoints
// ============================================================================

pub async fn health(State(state): State<DashboardState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "classifier": state.classifier.name(),
        "labels": state.classifier.labels(),
        "notifier": state.notifier.name(),
    }))
}

// ============================================================================
// Classification endpoints
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f32,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub id: i64,
    pub text: String,
    pub label: String,
    pub score: f32,
    pub scores: Vec<LabelScore>,
    pub latency_us: u64,
}

pub async fn classify(
    State(state): State<DashboardState>,
    Json(req): Json<ClassifyRequest>,
) -> Result<Json<ClassifyResponse>, AppError> {
    // Same rule as the single-text page: only the empty string is rejected
    if req.text.is_empty() {
        record_validation_error("api");
        return Err(AppError::InvalidRequest("Please enter some text.".to_string()));
    }

    let recorded = state
        .classify_and_record(&req.text, PredictionSource::Api)
        .await?;
    let result = recorded.result;

    let scores = result
        .metadata
        .all_scores
        .unwrap_or_default()
        .into_iter()
        .map(|(label, score)| LabelScore { label, score })
        .collect();

    Ok(Json(ClassifyResponse {
        id: recorded.id,
        text: req.text,
        label: result.label,
        score: result.score,
        scores,
        latency_us: result.latency_us,
    }))
}

// ============================================================================
// Prediction history endpoints
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PredictionsQuery {
    pub limit: Option<usize>,
}

pub async fn list_predictions(
    State(state): State<DashboardState>,
    Query(query): Query<PredictionsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let limit = query.limit.unwrap_or(state.config.recent_limit);
    let records = state.recent(limit).await?;
    Ok(Json(records))
}

pub async fn label_stats(State(state): State<DashboardState>) -> Result<impl IntoResponse, AppError> {
    let counts = state.label_counts().await?;
    Ok(Json(counts))
}

// ============================================================================
// Metrics
// ============================================================================

pub async fn metrics(State(state): State<DashboardState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub async fn fallback() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found")
}
