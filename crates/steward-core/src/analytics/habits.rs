//! Recurring-pattern detection
//!
//! Finds merchants a user pays on a regular cadence: group transactions by
//! category and exact description, then test the day-gaps between
//! consecutive charges against weekly / bi-weekly / monthly periods.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::warn;

use crate::advisor::types::SpendingContext;
use crate::advisor::{AdvisorBackend, AdvisorClient};
use crate::db::Database;
use crate::error::Result;
use crate::models::{AdvisorOperation, Frequency, HabitReport, RecurringPattern, Transaction};

use super::window_start;

/// Minimum charges from one merchant before a pattern is considered
const MIN_OCCURRENCES: usize = 3;

/// Every gap must fall within this share of the canonical period
const GAP_TOLERANCE: f64 = 0.25;

/// Every amount must fall within this share of the group mean
const AMOUNT_TOLERANCE: f64 = 0.15;

/// Detect recurring merchant patterns in a set of transactions.
///
/// Output is sorted by (category, merchant) so results are stable.
pub fn detect_recurring_patterns(transactions: &[Transaction]) -> Vec<RecurringPattern> {
    // Category -> merchant (exact description) -> transactions
    let mut groups: HashMap<(String, String), Vec<&Transaction>> = HashMap::new();
    for tx in transactions {
        groups
            .entry((tx.category.clone(), tx.description.clone()))
            .or_default()
            .push(tx);
    }

    let mut patterns = Vec::new();
    for ((category, merchant), mut txs) in groups {
        if txs.len() < MIN_OCCURRENCES {
            continue;
        }

        txs.sort_by_key(|t| t.date);
        let frequency = match classify_frequency(&txs) {
            Some(f) => f,
            None => continue,
        };

        let average_amount =
            txs.iter().map(|t| t.amount.abs()).sum::<f64>() / txs.len() as f64;

        patterns.push(RecurringPattern {
            category,
            merchant,
            frequency,
            average_amount,
            transaction_count: txs.len() as i64,
            is_regular_amount: amounts_are_consistent(&txs),
        });
    }

    patterns.sort_by(|a, b| {
        a.category
            .cmp(&b.category)
            .then_with(|| a.merchant.cmp(&b.merchant))
    });
    patterns
}

/// Classify the cadence of date-sorted transactions.
///
/// Buckets are checked in order (weekly, bi-weekly, monthly); the first
/// period where every gap falls within tolerance wins.
fn classify_frequency(sorted: &[&Transaction]) -> Option<Frequency> {
    let gaps: Vec<i64> = sorted
        .windows(2)
        .map(|w| (w[1].date - w[0].date).num_days())
        .collect();

    if gaps.is_empty() {
        return None;
    }

    for frequency in [Frequency::Weekly, Frequency::BiWeekly, Frequency::Monthly] {
        if matches_period(&gaps, frequency.period_days()) {
            return Some(frequency);
        }
    }
    None
}

/// Whether every gap is within ±25% of the canonical period
fn matches_period(gaps: &[i64], period_days: i64) -> bool {
    let tolerance = period_days as f64 * GAP_TOLERANCE;
    gaps.iter()
        .all(|&gap| (gap as f64 - period_days as f64).abs() <= tolerance)
}

/// Whether every amount is within 15% of the group mean
fn amounts_are_consistent(txs: &[&Transaction]) -> bool {
    if txs.len() < MIN_OCCURRENCES {
        return false;
    }
    let amounts: Vec<f64> = txs.iter().map(|t| t.amount.abs()).collect();
    let mean = amounts.iter().sum::<f64>() / amounts.len() as f64;
    if mean <= 0.0 {
        return false;
    }
    amounts
        .iter()
        .all(|a| (a - mean).abs() / mean <= AMOUNT_TOLERANCE)
}

/// Detect a user's recurring patterns and, when the advisor is configured,
/// its healthy/unhealthy classification of them.
pub async fn habit_report(
    db: &Database,
    advisor: Option<&AdvisorClient>,
    user_id: &str,
    months: u32,
    today: NaiveDate,
) -> Result<HabitReport> {
    let transactions = db.transactions_in_range(user_id, window_start(today, months), today)?;
    let patterns = detect_recurring_patterns(&transactions);

    let mut report = HabitReport {
        patterns,
        assessment: None,
    };

    if let Some(advisor) = advisor {
        if !report.patterns.is_empty() {
            let context = spending_context(&transactions);
            match advisor.classify_habits(&report.patterns, &context).await {
                Ok(assessment) => {
                    db.log_advisor_call(
                        AdvisorOperation::ClassifyHabits,
                        &serde_json::to_string(&report.patterns).unwrap_or_default(),
                        &serde_json::to_string(&assessment).unwrap_or_default(),
                    )?;
                    report.assessment = Some(assessment);
                }
                Err(e) => {
                    warn!(error = %e, "Advisor habit classification unavailable");
                }
            }
        }
    }

    Ok(report)
}

/// Aggregate context handed to the habit classifier alongside the patterns
fn spending_context(transactions: &[Transaction]) -> SpendingContext {
    let average_amount = if transactions.is_empty() {
        0.0
    } else {
        transactions.iter().map(|t| t.amount.abs()).sum::<f64>() / transactions.len() as f64
    };

    let mut by_category: HashMap<&str, f64> = HashMap::new();
    for tx in transactions {
        *by_category.entry(tx.category.as_str()).or_insert(0.0) += tx.amount.abs();
    }
    let mut ranked: Vec<(&str, f64)> = by_category.into_iter().collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    SpendingContext {
        transaction_count: transactions.len(),
        average_amount,
        top_categories: ranked
            .into_iter()
            .take(3)
            .map(|(category, total)| format!("{} (${:.2})", category, total))
            .collect(),
    }
}
