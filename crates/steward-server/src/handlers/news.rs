//! News sentiment cache handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use steward_core::advisor::AdvisorBackend;
use steward_core::models::{AdvisorOperation, NewNewsArticle, NewsArticle};

use crate::{ApiResponse, AppError, AppState};

#[derive(Debug, Deserialize)]
pub struct NewsQuery {
    pub limit: Option<i64>,
}

/// GET /api/financial-news - Recent articles with sentiment scores
pub async fn financial_news(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NewsQuery>,
) -> Result<Json<ApiResponse<Vec<NewsArticle>>>, AppError> {
    let limit = params.limit.unwrap_or(10).clamp(1, 100);
    let articles = state.db.recent_news(limit)?;
    Ok(ApiResponse::ok(articles))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeNewsRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub source: Option<String>,
}

/// POST /api/news - Analyze an article's sentiment and append it to the cache
pub async fn analyze_news(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AnalyzeNewsRequest>,
) -> Result<Json<ApiResponse<NewsArticle>>, AppError> {
    let title = match body.title {
        Some(t) if !t.trim().is_empty() => t,
        _ => return Err(AppError::bad_request("Article title is required")),
    };
    let content = match body.content {
        Some(c) if !c.trim().is_empty() => c,
        _ => return Err(AppError::bad_request("Article content is required")),
    };

    let advisor = state
        .advisor
        .as_ref()
        .ok_or_else(|| AppError::unavailable("Advisor backend is not configured"))?;

    let analysis = advisor.analyze_news_sentiment(&content).await?;
    state.db.log_advisor_call(
        AdvisorOperation::NewsSentiment,
        &title,
        &serde_json::to_string(&analysis).unwrap_or_default(),
    )?;

    // Scores from the advisor are clamped into the documented range
    let sentiment_score = analysis.sentiment_score.unwrap_or(0.0).clamp(-1.0, 1.0);
    let article = state.db.insert_news(&NewNewsArticle {
        title,
        content,
        source: body.source.unwrap_or_default(),
        sentiment_score,
        keywords: analysis.keywords,
        summary: analysis.summary,
    })?;

    Ok(ApiResponse::ok(article))
}
