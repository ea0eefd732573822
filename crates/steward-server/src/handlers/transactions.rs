//! Transaction handlers: listing, creation, balance, and the advisory
//! flows built on top of them (shortfall, purchase evaluation, advice)

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use steward_core::advisor::types::{AdviceContext, PurchaseContext, PurchaseDetails};
use steward_core::advisor::AdvisorBackend;
use steward_core::analytics::shortfall;
use steward_core::db::TransactionQueryOptions;
use steward_core::models::{
    AdvisorOperation, NewTransaction, PaymentMethod, PurchaseEvaluation, ShortfallPrediction,
    Transaction, TransactionKind,
};

use super::resolve_user;
use crate::{ApiResponse, AppError, AppState, MAX_PAGE_LIMIT};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListQuery {
    pub user_id: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub method: Option<String>,
    pub limit: Option<i64>,
}

/// GET /api/transactions - List a user's transactions with optional filters
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TransactionListQuery>,
) -> Result<Json<ApiResponse<Vec<Transaction>>>, AppError> {
    let user_id = resolve_user(params.user_id.as_deref());

    let kind = params
        .kind
        .as_deref()
        .map(|s| s.parse::<TransactionKind>())
        .transpose()
        .map_err(|_| AppError::bad_request("Invalid transaction type"))?;
    let method = params
        .method
        .as_deref()
        .map(|s| s.parse::<PaymentMethod>())
        .transpose()
        .map_err(|_| AppError::bad_request("Invalid payment method"))?;

    let options = TransactionQueryOptions {
        start_date: params.start_date,
        end_date: params.end_date,
        category: params.category,
        kind,
        method,
    };

    let limit = params.limit.unwrap_or(100).clamp(1, MAX_PAGE_LIMIT);
    let transactions = state.db.list_transactions(&user_id, &options, limit)?;
    Ok(ApiResponse::ok(transactions))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    pub user_id: Option<String>,
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
    pub method: Option<PaymentMethod>,
}

/// POST /api/transaction - Record a new transaction
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateTransactionRequest>,
) -> Result<Json<ApiResponse<Transaction>>, AppError> {
    let amount = match body.amount {
        Some(a) if a != 0.0 => a,
        _ => {
            return Err(AppError::bad_request(
                "Transaction amount is required and cannot be zero",
            ))
        }
    };

    let new_tx = NewTransaction {
        user_id: resolve_user(body.user_id.as_deref()),
        amount,
        description: body.description.unwrap_or_default(),
        category: body
            .category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| "Uncategorized".to_string()),
        method: body
            .method
            .unwrap_or_else(|| PaymentMethod::default_for_amount(amount)),
        date: body.date.unwrap_or_else(|| Utc::now().date_naive()),
    };

    let created = state.db.insert_transaction(&new_tx)?;
    Ok(ApiResponse::ok(created))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub user_id: Option<String>,
}

#[derive(Serialize)]
pub struct BalanceResponse {
    pub balance: f64,
}

/// GET /api/balance - Current balance (signed sum of all transactions)
pub async fn get_balance(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UserQuery>,
) -> Result<Json<ApiResponse<BalanceResponse>>, AppError> {
    let user_id = resolve_user(params.user_id.as_deref());
    let balance = state.db.balance(&user_id)?;
    Ok(ApiResponse::ok(BalanceResponse { balance }))
}

/// GET /api/predict-shortfall - Will upcoming bills outrun the balance?
pub async fn predict_shortfall(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UserQuery>,
) -> Result<Json<ApiResponse<ShortfallPrediction>>, AppError> {
    let user_id = resolve_user(params.user_id.as_deref());
    let prediction = shortfall::predict_shortfall(
        &state.db,
        state.advisor.as_ref(),
        &user_id,
        Utc::now().date_naive(),
    )
    .await?;
    Ok(ApiResponse::ok(prediction))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatePurchaseRequest {
    pub user_id: Option<String>,
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub category: Option<String>,
}

/// POST /api/evaluate-purchase - Is this purchase a good idea right now?
pub async fn evaluate_purchase(
    State(state): State<Arc<AppState>>,
    Json(body): Json<EvaluatePurchaseRequest>,
) -> Result<Json<ApiResponse<PurchaseEvaluation>>, AppError> {
    let amount = match body.amount {
        Some(a) if a > 0.0 => a,
        _ => {
            return Err(AppError::bad_request(
                "Purchase amount is required and must be greater than zero",
            ))
        }
    };

    let user_id = resolve_user(body.user_id.as_deref());
    let today = Utc::now().date_naive();

    let balance = state.db.balance(&user_id)?;
    let upcoming_bills = state.db.upcoming_bills(&user_id, today, 30)?;
    let budget = state.db.get_budget(&user_id)?;

    let context = PurchaseContext {
        balance,
        purchase: PurchaseDetails {
            amount,
            description: body.description.unwrap_or_default(),
            category: body
                .category
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| "Uncategorized".to_string()),
        },
        upcoming_bills,
        budget,
    };

    let mut evaluation = PurchaseEvaluation {
        current_balance: balance,
        purchase_amount: amount,
        balance_after_purchase: balance - amount,
        purchase_advice: None,
    };

    if let Some(advisor) = state.advisor.as_ref() {
        match advisor.evaluate_purchase(&context).await {
            Ok(advice) => {
                state.db.log_advisor_call(
                    AdvisorOperation::EvaluatePurchase,
                    &serde_json::to_string(&context.purchase).unwrap_or_default(),
                    &serde_json::to_string(&advice).unwrap_or_default(),
                )?;
                evaluation.purchase_advice = Some(advice);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Advisor purchase evaluation unavailable");
            }
        }
    }

    Ok(ApiResponse::ok(evaluation))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceRequest {
    pub user_id: Option<String>,
    pub question: Option<String>,
}

#[derive(Serialize)]
pub struct AdviceResponse {
    pub advice: String,
}

/// POST /api/financial-advice - Free-form advice grounded in the user's data
pub async fn financial_advice(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AdviceRequest>,
) -> Result<Json<ApiResponse<AdviceResponse>>, AppError> {
    let question = match body.question {
        Some(q) if !q.trim().is_empty() => q,
        _ => return Err(AppError::bad_request("Question is required")),
    };

    let advisor = state
        .advisor
        .as_ref()
        .ok_or_else(|| AppError::unavailable("Advisor backend is not configured"))?;

    let user_id = resolve_user(body.user_id.as_deref());
    let today = Utc::now().date_naive();

    let context = AdviceContext {
        balance: state.db.balance(&user_id)?,
        budget: state.db.get_budget(&user_id)?,
        upcoming_bills: state.db.upcoming_bills(&user_id, today, 30)?,
        recent_transactions: state
            .db
            .list_transactions(&user_id, &Default::default(), 5)?,
    };

    let advice = advisor.financial_advice(&question, &context).await?;

    state
        .db
        .log_advisor_call(AdvisorOperation::Advice, &question, &advice)?;

    Ok(ApiResponse::ok(AdviceResponse { advice }))
}
