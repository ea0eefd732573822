//! Financial health ratios
//!
//! Computes the deterministic metrics (savings rate, debt-to-income,
//! emergency-fund months) that the advisor turns into a 0-100 score.

use chrono::NaiveDate;
use tracing::warn;

use crate::advisor::{AdvisorBackend, AdvisorClient};
use crate::db::Database;
use crate::error::Result;
use crate::models::{AdvisorOperation, Bill, Budget, HealthMetrics, HealthReport, Transaction};

use super::window_start;

/// Window the ratios are computed over
pub const HEALTH_WINDOW_MONTHS: u32 = 3;

/// Sentinel for emergency-fund months when monthly expenses are zero:
/// ten years of runway, large but still serializable.
pub const EMERGENCY_MONTHS_CAP: f64 = 120.0;

/// Bill category that counts towards the debt-to-income ratio
const DEBT_CATEGORY: &str = "Debt";

/// Derive health metrics from a window of transactions plus the stored
/// budget and upcoming bills.
pub fn compute_metrics(
    current_balance: f64,
    transactions: &[Transaction],
    budget: Option<&Budget>,
    upcoming_bills: &[Bill],
    window_months: u32,
) -> HealthMetrics {
    let window_months = window_months.max(1) as f64;

    let income: f64 = transactions
        .iter()
        .filter(|t| t.amount > 0.0)
        .map(|t| t.amount)
        .sum();
    let expenses: f64 = transactions
        .iter()
        .filter(|t| t.amount < 0.0)
        .map(|t| t.amount.abs())
        .sum();

    // Income here is a sum of positive amounts, so it cannot go negative;
    // the only guard needed is the zero case.
    let savings_rate = if income > 0.0 {
        (income - expenses) / income
    } else {
        0.0
    };

    let monthly_income = budget
        .map(|b| b.income)
        .unwrap_or(income / window_months);

    // Prefer the budgeted expense total; an empty budget falls back to the
    // historical average, matching how the income fallback behaves.
    let budgeted_expenses: f64 = budget
        .map(|b| b.expenses.iter().map(|e| e.amount).sum())
        .unwrap_or(0.0);
    let monthly_expenses = if budgeted_expenses > 0.0 {
        budgeted_expenses
    } else {
        expenses / window_months
    };

    let debt_total: f64 = upcoming_bills
        .iter()
        .filter(|b| b.category == DEBT_CATEGORY)
        .map(|b| b.amount)
        .sum();
    let debt_to_income_ratio = if monthly_income > 0.0 {
        debt_total / monthly_income
    } else {
        0.0
    };

    let emergency_fund_months = if monthly_expenses > 0.0 {
        current_balance / monthly_expenses
    } else {
        EMERGENCY_MONTHS_CAP
    };

    HealthMetrics {
        current_balance,
        savings_rate,
        monthly_income,
        monthly_expenses,
        debt_to_income_ratio,
        emergency_fund_months,
    }
}

/// Compute a user's health metrics and, when the advisor is configured,
/// its 0-100 assessment of them.
pub async fn health_report(
    db: &Database,
    advisor: Option<&AdvisorClient>,
    user_id: &str,
    today: NaiveDate,
) -> Result<HealthReport> {
    let balance = db.balance(user_id)?;
    let budget = db.get_budget(user_id)?;
    let bills = db.upcoming_bills(user_id, today, 30)?;
    let transactions =
        db.transactions_in_range(user_id, window_start(today, HEALTH_WINDOW_MONTHS), today)?;

    let metrics = compute_metrics(
        balance,
        &transactions,
        budget.as_ref(),
        &bills,
        HEALTH_WINDOW_MONTHS,
    );

    let mut report = HealthReport {
        raw_metrics: metrics,
        health_score: None,
    };

    if let Some(advisor) = advisor {
        match advisor
            .assess_financial_health(&report.raw_metrics, bills.len(), transactions.len())
            .await
        {
            Ok(assessment) => {
                db.log_advisor_call(
                    AdvisorOperation::HealthScore,
                    &serde_json::to_string(&report.raw_metrics).unwrap_or_default(),
                    &serde_json::to_string(&assessment).unwrap_or_default(),
                )?;
                report.health_score = Some(assessment);
            }
            Err(e) => {
                warn!(error = %e, "Advisor health assessment unavailable");
            }
        }
    }

    Ok(report)
}
