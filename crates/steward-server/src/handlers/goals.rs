//! Goal handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use steward_core::advisor::types::GoalSuggestions;
use steward_core::advisor::AdvisorBackend;
use steward_core::analytics::health;
use steward_core::models::{AdvisorOperation, Goal, NewGoal};

use super::{resolve_user, transactions::UserQuery};
use crate::{ApiResponse, AppError, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGoalRequest {
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub target_amount: Option<f64>,
    pub current_amount: Option<f64>,
    pub target_date: Option<NaiveDate>,
    pub category: Option<String>,
}

/// POST /api/goals - Create a savings goal
pub async fn create_goal(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateGoalRequest>,
) -> Result<Json<ApiResponse<Goal>>, AppError> {
    let name = match body.name {
        Some(n) if !n.trim().is_empty() => n,
        _ => return Err(AppError::bad_request("Goal name is required")),
    };
    let target_amount = match body.target_amount {
        Some(t) if t > 0.0 => t,
        _ => {
            return Err(AppError::bad_request(
                "Goal target amount is required and must be greater than zero",
            ))
        }
    };

    let goal = state.db.insert_goal(&NewGoal {
        user_id: resolve_user(body.user_id.as_deref()),
        name,
        target_amount,
        current_amount: body.current_amount.unwrap_or(0.0).max(0.0),
        target_date: body.target_date,
        category: body.category.filter(|c| !c.trim().is_empty()),
    })?;

    Ok(ApiResponse::ok(goal))
}

/// GET /api/goals - A user's goals, newest first
pub async fn list_goals(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UserQuery>,
) -> Result<Json<ApiResponse<Vec<Goal>>>, AppError> {
    let user_id = resolve_user(params.user_id.as_deref());
    let goals = state.db.list_goals(&user_id)?;
    Ok(ApiResponse::ok(goals))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgressRequest {
    pub goal_id: Option<i64>,
    pub amount: Option<f64>,
}

/// POST /api/goals/progress - Add to a goal's saved amount.
/// Progress and status come back recomputed from the new amounts.
pub async fn add_goal_progress(
    State(state): State<Arc<AppState>>,
    Json(body): Json<GoalProgressRequest>,
) -> Result<Json<ApiResponse<Goal>>, AppError> {
    let goal_id = match body.goal_id {
        Some(id) => id,
        None => return Err(AppError::bad_request("Goal id is required")),
    };
    let amount = match body.amount {
        Some(a) if a != 0.0 => a,
        _ => {
            return Err(AppError::bad_request(
                "Progress amount is required and cannot be zero",
            ))
        }
    };

    let goal = state.db.add_goal_progress(goal_id, amount)?;
    Ok(ApiResponse::ok(goal))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalSuggestionsResponse {
    pub goal: Goal,
    pub suggestions: GoalSuggestions,
}

/// GET /api/goals/:goal_id/suggestions - Advisor plan for reaching the goal
pub async fn goal_suggestions(
    State(state): State<Arc<AppState>>,
    Path(goal_id): Path<i64>,
) -> Result<Json<ApiResponse<GoalSuggestionsResponse>>, AppError> {
    let goal = state
        .db
        .get_goal(goal_id)?
        .ok_or_else(|| AppError::not_found("Goal not found"))?;

    let advisor = state
        .advisor
        .as_ref()
        .ok_or_else(|| AppError::unavailable("Advisor backend is not configured"))?;

    let report = health::health_report(&state.db, None, &goal.user_id, Utc::now().date_naive())
        .await?;
    let suggestions = advisor.suggest_goal_plan(&goal, &report.raw_metrics).await?;

    state.db.log_advisor_call(
        AdvisorOperation::GoalPlan,
        &serde_json::to_string(&goal).unwrap_or_default(),
        &serde_json::to_string(&suggestions).unwrap_or_default(),
    )?;

    Ok(ApiResponse::ok(GoalSuggestionsResponse { goal, suggestions }))
}

#[derive(Serialize)]
pub struct DeletedGoal {
    pub deleted: bool,
}

/// DELETE /api/goals/:goal_id - Remove a goal
pub async fn delete_goal(
    State(state): State<Arc<AppState>>,
    Path(goal_id): Path<i64>,
) -> Result<Json<ApiResponse<DeletedGoal>>, AppError> {
    state.db.delete_goal(goal_id)?;
    Ok(ApiResponse::ok(DeletedGoal { deleted: true }))
}
