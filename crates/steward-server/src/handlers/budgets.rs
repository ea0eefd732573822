//! Budget and bill handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use steward_core::models::{Bill, BillStatus, Budget, BudgetDetails, BudgetExpense, NewBill};

use super::{resolve_user, transactions::UserQuery};
use crate::{ApiResponse, AppError, AppState};

/// GET /api/budget - Budget details with shortfall and upcoming bills.
/// A user without a budget gets zeros and empty lists, not an error.
pub async fn get_budget(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UserQuery>,
) -> Result<Json<ApiResponse<BudgetDetails>>, AppError> {
    let user_id = resolve_user(params.user_id.as_deref());
    let today = Utc::now().date_naive();

    let budget = state.db.get_budget(&user_id)?;
    let upcoming_bills = state.db.upcoming_bills(&user_id, today, 30)?;

    let details = match budget {
        Some(budget) => BudgetDetails {
            income: budget.income,
            shortfall: budget.shortfall(),
            expenses: budget.expenses,
            upcoming_bills,
        },
        None => BudgetDetails {
            income: 0.0,
            expenses: vec![],
            shortfall: 0.0,
            upcoming_bills,
        },
    };

    Ok(ApiResponse::ok(details))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBudgetRequest {
    pub user_id: Option<String>,
    pub income: Option<f64>,
    #[serde(default)]
    pub expenses: Vec<BudgetExpense>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedBudget {
    #[serde(flatten)]
    pub budget: Budget,
    pub shortfall: f64,
}

/// POST /api/budget/update - Create or replace the user's budget
pub async fn update_budget(
    State(state): State<Arc<AppState>>,
    Json(body): Json<UpdateBudgetRequest>,
) -> Result<Json<ApiResponse<UpdatedBudget>>, AppError> {
    let income = match body.income {
        Some(i) if i > 0.0 => i,
        _ => {
            return Err(AppError::bad_request(
                "Budget income is required and must be greater than zero",
            ))
        }
    };

    let user_id = resolve_user(body.user_id.as_deref());
    let budget = state.db.upsert_budget(&user_id, income, &body.expenses)?;
    let shortfall = budget.shortfall();

    Ok(ApiResponse::ok(UpdatedBudget { budget, shortfall }))
}

/// GET /api/bills - All of a user's bills, sorted by due date
pub async fn list_bills(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UserQuery>,
) -> Result<Json<ApiResponse<Vec<Bill>>>, AppError> {
    let user_id = resolve_user(params.user_id.as_deref());
    let bills = state.db.list_bills(&user_id)?;
    Ok(ApiResponse::ok(bills))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBillRequest {
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub amount: Option<f64>,
    pub due_date: Option<NaiveDate>,
    pub category: Option<String>,
}

/// POST /api/bill - Schedule a bill (always created `upcoming`)
pub async fn create_bill(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateBillRequest>,
) -> Result<Json<ApiResponse<Bill>>, AppError> {
    let name = match body.name {
        Some(n) if !n.trim().is_empty() => n,
        _ => return Err(AppError::bad_request("Bill name is required")),
    };
    let amount = match body.amount {
        Some(a) if a > 0.0 => a,
        _ => {
            return Err(AppError::bad_request(
                "Bill amount is required and must be greater than zero",
            ))
        }
    };
    let due_date = match body.due_date {
        Some(d) => d,
        None => return Err(AppError::bad_request("Bill due date is required")),
    };

    let bill = state.db.insert_bill(&NewBill {
        user_id: resolve_user(body.user_id.as_deref()),
        name,
        amount,
        due_date,
        category: body
            .category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| "Bills".to_string()),
    })?;

    Ok(ApiResponse::ok(bill))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBillStatusRequest {
    pub status: Option<String>,
}

/// POST /api/bills/:id/status - Transition a bill (upcoming -> paid)
pub async fn update_bill_status(
    State(state): State<Arc<AppState>>,
    Path(bill_id): Path<i64>,
    Json(body): Json<UpdateBillStatusRequest>,
) -> Result<Json<ApiResponse<Bill>>, AppError> {
    let status: BillStatus = body
        .status
        .as_deref()
        .unwrap_or("")
        .parse()
        .map_err(|_| AppError::bad_request("Bill status must be 'upcoming' or 'paid'"))?;

    let bill = state.db.update_bill_status(bill_id, status)?;
    Ok(ApiResponse::ok(bill))
}
