//! Assistant passthrough handlers (timeline, sentiment, chat) and liveness

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use steward_core::advisor::AdvisorBackend;
use steward_core::models::AdvisorOperation;

use crate::{ApiResponse, AppError, AppState};

#[derive(Serialize)]
pub struct AssistantReply {
    pub response: String,
}

/// POST /api/gemini/predict - Timeline predictions from a snapshot of the
/// user's data (the caller supplies the snapshot, as the SPA does)
pub async fn predict_timeline(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<ApiResponse<AssistantReply>>, AppError> {
    let advisor = state
        .advisor
        .as_ref()
        .ok_or_else(|| AppError::unavailable("Advisor backend is not configured"))?;

    let response = advisor.predict_timeline(&body).await?;
    state.db.log_advisor_call(
        AdvisorOperation::Timeline,
        &body.to_string(),
        &response,
    )?;

    Ok(ApiResponse::ok(AssistantReply { response }))
}

#[derive(Debug, Deserialize)]
pub struct SentimentRequest {
    pub text: Option<String>,
}

/// POST /api/gemini/sentiment - Classify a purchase as essential /
/// non-essential / impulse / goal-aligned
pub async fn classify_sentiment(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SentimentRequest>,
) -> Result<Json<ApiResponse<AssistantReply>>, AppError> {
    let text = match body.text {
        Some(t) if !t.trim().is_empty() => t,
        _ => return Err(AppError::bad_request("Text is required")),
    };

    let advisor = state
        .advisor
        .as_ref()
        .ok_or_else(|| AppError::unavailable("Advisor backend is not configured"))?;

    let response = advisor.classify_purchase_sentiment(&text).await?;
    state
        .db
        .log_advisor_call(AdvisorOperation::Sentiment, &text, &response)?;

    Ok(ApiResponse::ok(AssistantReply { response }))
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
}

/// POST /api/gemini/chat - Conversational support
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ApiResponse<AssistantReply>>, AppError> {
    let message = match body.message {
        Some(m) if !m.trim().is_empty() => m,
        _ => return Err(AppError::bad_request("Message is required")),
    };

    let advisor = state
        .advisor
        .as_ref()
        .ok_or_else(|| AppError::unavailable("Advisor backend is not configured"))?;

    let response = advisor.chat(&message).await?;
    state
        .db
        .log_advisor_call(AdvisorOperation::Chat, &message, &response)?;

    Ok(ApiResponse::ok(AssistantReply { response }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: &'static str,
    pub advisor_configured: bool,
    pub advisor_reachable: bool,
}

/// GET /api/health - Liveness plus advisor availability
pub async fn health(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<HealthStatus>>, AppError> {
    let (configured, reachable) = match state.advisor.as_ref() {
        Some(advisor) => (true, advisor.health_check().await),
        None => (false, false),
    };

    Ok(ApiResponse::ok(HealthStatus {
        status: "ok",
        advisor_configured: configured,
        advisor_reachable: reachable,
    }))
}
