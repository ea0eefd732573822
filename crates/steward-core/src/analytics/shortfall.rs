//! Bill-shortfall prediction
//!
//! The one fully deterministic piece of forward-looking logic: project the
//! balance after budgeted income and upcoming bills, and flag whether the
//! user is on course to miss payments.

use chrono::NaiveDate;
use tracing::warn;

use crate::advisor::{AdvisorBackend, AdvisorClient};
use crate::db::Database;
use crate::error::Result;
use crate::models::{AdvisorOperation, Bill, ShortfallPrediction};

/// Days ahead to include when gathering upcoming bills
pub const UPCOMING_BILL_WINDOW_DAYS: i64 = 30;

/// Project the balance after income and bills.
/// Returns (projected_balance, will_miss_bills).
pub fn project_balance(
    current_balance: f64,
    projected_income: f64,
    total_upcoming_bills: f64,
) -> (f64, bool) {
    let projected = current_balance + projected_income - total_upcoming_bills;
    (projected, projected < 0.0)
}

/// Assemble a shortfall prediction from already-fetched records
pub fn predict(current_balance: f64, projected_income: f64, bills: Vec<Bill>) -> ShortfallPrediction {
    let total: f64 = bills.iter().map(|b| b.amount).sum();
    let (projected_balance, will_miss_bills) =
        project_balance(current_balance, projected_income, total);

    ShortfallPrediction {
        current_balance,
        upcoming_bills: bills,
        projected_income,
        projected_balance,
        will_miss_bills,
        risk_analysis: None,
    }
}

/// Predict whether the user will miss upcoming bills, with the advisor's
/// risk narrative when available.
pub async fn predict_shortfall(
    db: &Database,
    advisor: Option<&AdvisorClient>,
    user_id: &str,
    today: NaiveDate,
) -> Result<ShortfallPrediction> {
    let balance = db.balance(user_id)?;
    let bills = db.upcoming_bills(user_id, today, UPCOMING_BILL_WINDOW_DAYS)?;
    let projected_income = db.get_budget(user_id)?.map(|b| b.income).unwrap_or(0.0);

    let mut prediction = predict(balance, projected_income, bills);

    if let Some(advisor) = advisor {
        match advisor.analyze_bill_risk(&prediction).await {
            Ok(analysis) => {
                db.log_advisor_call(
                    AdvisorOperation::BillRisk,
                    &serde_json::to_string(&prediction).unwrap_or_default(),
                    &serde_json::to_string(&analysis).unwrap_or_default(),
                )?;
                prediction.risk_analysis = Some(analysis);
            }
            Err(e) => {
                warn!(error = %e, "Advisor risk analysis unavailable");
            }
        }
    }

    Ok(prediction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BillStatus;
    use chrono::Utc;

    fn bill(amount: f64) -> Bill {
        Bill {
            id: 0,
            user_id: "u1".to_string(),
            name: "bill".to_string(),
            amount,
            due_date: NaiveDate::from_ymd_opt(2026, 4, 10).unwrap(),
            status: BillStatus::Upcoming,
            category: "Bills".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn shortfall_scenario() {
        // balance 500, income 2000, bills 3000 => -500, will miss
        let prediction = predict(500.0, 2000.0, vec![bill(1000.0), bill(2000.0)]);
        assert!((prediction.projected_balance + 500.0).abs() < 1e-9);
        assert!(prediction.will_miss_bills);
    }

    #[test]
    fn projection_truth_table() {
        for (balance, income, bills_total) in [
            (0.0, 0.0, 0.0),
            (0.0, 100.0, 50.0),
            (100.0, 0.0, 100.0),
            (-50.0, 0.0, 0.0),
            (500.0, 2000.0, 3000.0),
            (10.0, 0.0, 10.01),
        ] {
            let (projected, will_miss) = project_balance(balance, income, bills_total);
            assert!((projected - (balance + income - bills_total)).abs() < 1e-9);
            assert_eq!(will_miss, balance + income - bills_total < 0.0);
        }
    }

    #[test]
    fn empty_bills_only_miss_when_balance_negative() {
        let ok = predict(0.0, 0.0, vec![]);
        assert!(!ok.will_miss_bills);

        let negative = predict(-1.0, 0.0, vec![]);
        assert!(negative.will_miss_bills);
    }
}
