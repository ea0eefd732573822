//! Expense projection
//!
//! Extrapolates per-category monthly averages over the next three calendar
//! months, folds in known upcoming bills, and applies bounded jitter from
//! an injectable source so tests can pin exact output.

use std::collections::BTreeMap;

use chrono::{Datelike, Months, NaiveDate};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::db::Database;
use crate::error::Result;
use crate::models::{Bill, ExpenseForecast, ForecastMonth, Transaction};

use super::{category_or_default, window_start};

/// Number of future calendar months to project
pub const FORECAST_MONTHS: u32 = 3;

/// Jitter spread applied to each projected category amount
const JITTER_SPREAD: f64 = 0.1;

/// Category assigned to bills that lack one
const BILLS_CATEGORY: &str = "Bills";

/// Randomness source for forecast variability.
///
/// `None` pins every factor at 1.0 (exact averages, used in tests);
/// `Uniform` samples a factor in [0.9, 1.1] per category per month.
pub enum Jitter {
    None,
    Uniform(SmallRng),
}

impl Jitter {
    /// No variability: every factor is exactly 1.0
    pub fn none() -> Self {
        Self::None
    }

    /// Reproducible variability from a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self::Uniform(SmallRng::seed_from_u64(seed))
    }

    /// OS-entropy variability (the serving default)
    pub fn from_entropy() -> Self {
        Self::Uniform(SmallRng::from_entropy())
    }

    fn factor(&mut self) -> f64 {
        match self {
            Self::None => 1.0,
            Self::Uniform(rng) => rng.gen_range(1.0 - JITTER_SPREAD..=1.0 + JITTER_SPREAD),
        }
    }
}

/// Project the next three calendar months of expenses.
///
/// `transactions` is the trailing `months_window`-month history; only
/// expenses (negative amounts) contribute. Upcoming bills are added to
/// their category in whichever projected month their due date falls.
pub fn project(
    transactions: &[Transaction],
    bills: &[Bill],
    months_window: u32,
    today: NaiveDate,
    jitter: &mut Jitter,
) -> ExpenseForecast {
    let months_window = months_window.max(1);

    // Average monthly spend per category over the window
    let mut category_averages: BTreeMap<String, f64> = BTreeMap::new();
    for tx in transactions {
        if tx.amount >= 0.0 {
            continue;
        }
        *category_averages
            .entry(category_or_default(&tx.category))
            .or_insert(0.0) += tx.amount.abs();
    }
    for total in category_averages.values_mut() {
        *total /= months_window as f64;
    }

    let historical_monthly_average: f64 = category_averages.values().sum();

    let mut forecast = Vec::with_capacity(FORECAST_MONTHS as usize);
    for i in 1..=FORECAST_MONTHS {
        let month_date = today
            .checked_add_months(Months::new(i))
            .unwrap_or(today);

        let mut categories: BTreeMap<String, f64> = BTreeMap::new();
        for (category, average) in &category_averages {
            categories.insert(category.clone(), average * jitter.factor());
        }

        // Known bills land in their calendar month at face value
        for bill in bills {
            if bill.due_date.year() == month_date.year()
                && bill.due_date.month() == month_date.month()
            {
                let category = if bill.category.trim().is_empty() {
                    BILLS_CATEGORY.to_string()
                } else {
                    bill.category.clone()
                };
                *categories.entry(category).or_insert(0.0) += bill.amount;
            }
        }

        let total = categories.values().sum();
        forecast.push(ForecastMonth {
            month: month_date.format("%Y-%m").to_string(),
            categories,
            total,
        });
    }

    ExpenseForecast {
        historical_monthly_average,
        category_averages,
        forecast,
    }
}

/// Forecast a user's expenses from the record store.
pub async fn expense_forecast(
    db: &Database,
    user_id: &str,
    months: u32,
    today: NaiveDate,
    jitter: &mut Jitter,
) -> Result<ExpenseForecast> {
    let transactions = db.transactions_in_range(user_id, window_start(today, months), today)?;
    // 120 days covers bills due in any of the three projected calendar months
    let bills = db.upcoming_bills(user_id, today, 120)?;
    Ok(project(&transactions, &bills, months, today, jitter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BillStatus, PaymentMethod, TransactionKind};
    use chrono::Utc;

    fn expense(amount: f64, category: &str, date: NaiveDate) -> Transaction {
        Transaction {
            id: 0,
            user_id: "u1".to_string(),
            amount,
            description: String::new(),
            category: category.to_string(),
            method: PaymentMethod::Debit,
            kind: TransactionKind::from_amount(amount),
            date,
            created_at: Utc::now(),
        }
    }

    fn bill(amount: f64, category: &str, due: NaiveDate) -> Bill {
        Bill {
            id: 0,
            user_id: "u1".to_string(),
            name: "bill".to_string(),
            amount,
            due_date: due,
            status: BillStatus::Upcoming,
            category: category.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn no_jitter_projects_exact_averages() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        let txs = vec![
            expense(-300.0, "Food", NaiveDate::from_ymd_opt(2026, 1, 10).unwrap()),
            expense(-150.0, "Food", NaiveDate::from_ymd_opt(2026, 2, 10).unwrap()),
            expense(-90.0, "Transport", NaiveDate::from_ymd_opt(2026, 2, 20).unwrap()),
        ];

        let forecast = project(&txs, &[], 3, today, &mut Jitter::none());

        assert!((forecast.category_averages["Food"] - 150.0).abs() < 1e-9);
        assert!((forecast.category_averages["Transport"] - 30.0).abs() < 1e-9);
        assert!((forecast.historical_monthly_average - 180.0).abs() < 1e-9);

        assert_eq!(forecast.forecast.len(), 3);
        assert_eq!(forecast.forecast[0].month, "2026-04");
        assert_eq!(forecast.forecast[1].month, "2026-05");
        assert_eq!(forecast.forecast[2].month, "2026-06");
        for month in &forecast.forecast {
            assert!((month.categories["Food"] - 150.0).abs() < 1e-9);
            assert!((month.total - 180.0).abs() < 1e-9);
        }
    }

    #[test]
    fn bills_fold_into_their_calendar_month() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        let bills = vec![
            bill(120.0, "Utilities", NaiveDate::from_ymd_opt(2026, 4, 12).unwrap()),
            // No category: lands in "Bills"
            bill(55.0, "", NaiveDate::from_ymd_opt(2026, 5, 1).unwrap()),
        ];

        let forecast = project(&[], &bills, 3, today, &mut Jitter::none());

        let april = &forecast.forecast[0];
        assert!((april.categories["Utilities"] - 120.0).abs() < 1e-9);
        assert!((april.total - 120.0).abs() < 1e-9);

        let may = &forecast.forecast[1];
        assert!((may.categories["Bills"] - 55.0).abs() < 1e-9);

        let june = &forecast.forecast[2];
        assert!(june.categories.is_empty());
        assert_eq!(june.total, 0.0);
    }

    #[test]
    fn seeded_jitter_is_reproducible_and_bounded() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        let txs = vec![expense(
            -300.0,
            "Food",
            NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
        )];

        let a = project(&txs, &[], 3, today, &mut Jitter::seeded(7));
        let b = project(&txs, &[], 3, today, &mut Jitter::seeded(7));
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );

        let average = a.category_averages["Food"];
        for month in &a.forecast {
            let projected = month.categories["Food"];
            assert!(projected >= average * 0.9 - 1e-9);
            assert!(projected <= average * 1.1 + 1e-9);
        }
    }

    #[test]
    fn year_rollover_months_are_labelled_correctly() {
        let today = NaiveDate::from_ymd_opt(2026, 11, 20).unwrap();
        let forecast = project(&[], &[], 3, today, &mut Jitter::none());
        let labels: Vec<&str> = forecast.forecast.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(labels, vec!["2026-12", "2027-01", "2027-02"]);
    }
}
