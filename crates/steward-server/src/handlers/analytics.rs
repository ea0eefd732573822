//! Analytics handlers: spending, habits, forecast, health score

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use steward_core::analytics::{forecast, habits, health, spending, Jitter};
use steward_core::models::{ExpenseForecast, HabitReport, HealthReport, SpendingAnalysis};

use super::{clamp_months, resolve_user, transactions::UserQuery};
use crate::{ApiResponse, AppError, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsQuery {
    pub user_id: Option<String>,
    pub months: Option<u32>,
}

/// GET /api/analytics/spending - Category breakdown over a trailing window
pub async fn spending_analysis(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AnalyticsQuery>,
) -> Result<Json<ApiResponse<SpendingAnalysis>>, AppError> {
    let user_id = resolve_user(params.user_id.as_deref());
    let analysis = spending::spending_analysis(
        &state.db,
        state.advisor.as_ref(),
        &user_id,
        clamp_months(params.months),
        Utc::now().date_naive(),
    )
    .await?;
    Ok(ApiResponse::ok(analysis))
}

/// GET /api/analytics/habits - Recurring patterns with habit classification
pub async fn spending_habits(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AnalyticsQuery>,
) -> Result<Json<ApiResponse<HabitReport>>, AppError> {
    let user_id = resolve_user(params.user_id.as_deref());
    let report = habits::habit_report(
        &state.db,
        state.advisor.as_ref(),
        &user_id,
        clamp_months(params.months),
        Utc::now().date_naive(),
    )
    .await?;
    Ok(ApiResponse::ok(report))
}

/// GET /api/analytics/forecast - Three-month expense projection
pub async fn expense_forecast(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AnalyticsQuery>,
) -> Result<Json<ApiResponse<ExpenseForecast>>, AppError> {
    let user_id = resolve_user(params.user_id.as_deref());
    let forecast = forecast::expense_forecast(
        &state.db,
        &user_id,
        clamp_months(params.months),
        Utc::now().date_naive(),
        &mut Jitter::from_entropy(),
    )
    .await?;
    Ok(ApiResponse::ok(forecast))
}

/// GET /api/analytics/health-score - Financial ratios plus the advisor's score
pub async fn health_score(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UserQuery>,
) -> Result<Json<ApiResponse<HealthReport>>, AppError> {
    let user_id = resolve_user(params.user_id.as_deref());
    let report = health::health_report(
        &state.db,
        state.advisor.as_ref(),
        &user_id,
        Utc::now().date_naive(),
    )
    .await?;
    Ok(ApiResponse::ok(report))
}
