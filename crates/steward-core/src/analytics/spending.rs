//! Category spending aggregation
//!
//! Groups a user's expense transactions over a trailing window by category
//! and computes totals, percentages, and per-transaction averages.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::warn;

use crate::advisor::{AdvisorBackend, AdvisorClient};
use crate::db::Database;
use crate::error::Result;
use crate::models::{AdvisorOperation, CategorySpending, SpendingAnalysis, Transaction};

use super::{category_or_default, window_start};

/// Aggregate expense transactions by category.
///
/// Only negative amounts count; percentages are of total spend and are all
/// zero when there is no spend. Output is sorted by total, descending.
pub fn analyze_categories(transactions: &[Transaction]) -> SpendingAnalysis {
    let mut groups: HashMap<String, (f64, i64)> = HashMap::new();

    for tx in transactions {
        if tx.amount >= 0.0 {
            continue;
        }
        let category = category_or_default(&tx.category);
        let entry = groups.entry(category).or_insert((0.0, 0));
        entry.0 += tx.amount.abs();
        entry.1 += 1;
    }

    let total_spent: f64 = groups.values().map(|(total, _)| total).sum();

    let mut categories: Vec<CategorySpending> = groups
        .into_iter()
        .map(|(category, (total, count))| CategorySpending {
            category,
            total,
            percentage: if total_spent > 0.0 {
                total / total_spent * 100.0
            } else {
                0.0
            },
            transaction_count: count,
            average_transaction: if count > 0 { total / count as f64 } else { 0.0 },
        })
        .collect();

    // Descending by total; category name breaks ties so output is stable
    categories.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.category.cmp(&b.category))
    });

    SpendingAnalysis {
        total_spent,
        categories,
        optimization: None,
    }
}

/// Full spending analysis for a user: aggregate the trailing window, then
/// ask the advisor (when configured) for optimization suggestions.
pub async fn spending_analysis(
    db: &Database,
    advisor: Option<&AdvisorClient>,
    user_id: &str,
    months: u32,
    today: NaiveDate,
) -> Result<SpendingAnalysis> {
    let transactions = db.transactions_in_range(user_id, window_start(today, months), today)?;
    let mut analysis = analyze_categories(&transactions);

    if let Some(advisor) = advisor {
        match advisor
            .optimization_suggestions(&analysis.categories, analysis.total_spent)
            .await
        {
            Ok(advice) => {
                db.log_advisor_call(
                    AdvisorOperation::OptimizeSpending,
                    &serde_json::to_string(&analysis.categories).unwrap_or_default(),
                    &serde_json::to_string(&advice).unwrap_or_default(),
                )?;
                analysis.optimization = Some(advice);
            }
            Err(e) => {
                warn!(error = %e, "Advisor optimization unavailable, returning analysis without it");
            }
        }
    }

    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PaymentMethod, TransactionKind};
    use chrono::Utc;

    fn expense(amount: f64, category: &str) -> Transaction {
        Transaction {
            id: 0,
            user_id: "u1".to_string(),
            amount,
            description: String::new(),
            category: category.to_string(),
            method: PaymentMethod::Debit,
            kind: TransactionKind::from_amount(amount),
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn groups_and_sorts_descending_by_total() {
        // Housing (200) must come before Food (150)
        let txs = vec![
            expense(-100.0, "Food"),
            expense(-50.0, "Food"),
            expense(-200.0, "Housing"),
        ];

        let analysis = analyze_categories(&txs);
        assert!((analysis.total_spent - 350.0).abs() < 1e-9);
        assert_eq!(analysis.categories.len(), 2);

        let housing = &analysis.categories[0];
        assert_eq!(housing.category, "Housing");
        assert!((housing.total - 200.0).abs() < 1e-9);
        assert!((housing.percentage - 200.0 / 350.0 * 100.0).abs() < 1e-9);

        let food = &analysis.categories[1];
        assert_eq!(food.category, "Food");
        assert!((food.total - 150.0).abs() < 1e-9);
        assert_eq!(food.transaction_count, 2);
        assert!((food.average_transaction - 75.0).abs() < 1e-9);
    }

    #[test]
    fn category_totals_sum_to_total_spent() {
        let txs = vec![
            expense(-12.34, "Food"),
            expense(-0.66, "Food"),
            expense(-99.99, ""),
            expense(-7.01, "Transport"),
            expense(500.0, "Income"), // deposits are excluded
        ];

        let analysis = analyze_categories(&txs);
        let category_sum: f64 = analysis.categories.iter().map(|c| c.total).sum();
        assert!((category_sum - analysis.total_spent).abs() < 1e-9);
        assert!((analysis.total_spent - 120.0).abs() < 1e-9);

        // Empty category lands in Uncategorized
        assert!(analysis
            .categories
            .iter()
            .any(|c| c.category == "Uncategorized"));
    }

    #[test]
    fn percentages_sum_to_one_hundred() {
        let txs = vec![
            expense(-30.0, "A"),
            expense(-30.0, "B"),
            expense(-40.0, "C"),
        ];
        let analysis = analyze_categories(&txs);
        let pct_sum: f64 = analysis.categories.iter().map(|c| c.percentage).sum();
        assert!((pct_sum - 100.0).abs() < 1e-6);
    }

    #[test]
    fn no_transactions_means_empty_analysis() {
        let analysis = analyze_categories(&[]);
        assert_eq!(analysis.total_spent, 0.0);
        assert!(analysis.categories.is_empty());
    }

    #[test]
    fn deposits_only_means_zero_percentages() {
        let txs = vec![expense(100.0, "Income"), expense(250.0, "Income")];
        let analysis = analyze_categories(&txs);
        assert_eq!(analysis.total_spent, 0.0);
        assert!(analysis.categories.is_empty());
    }
}
