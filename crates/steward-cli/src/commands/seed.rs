//! Seed command - generate a deterministic demo dataset
//!
//! Produces the kind of history the analytics are built for: a salary,
//! rent, a couple of subscriptions on a strict monthly cadence, and
//! variable everyday spending. Amounts come from a fixed-seed RNG so two
//! runs against fresh databases produce identical data.

use std::path::Path;

use anyhow::Result;
use chrono::{Datelike, Duration, Months, NaiveDate, Utc};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use steward_core::db::Database;
use steward_core::models::{BudgetExpense, NewBill, NewGoal, NewTransaction, PaymentMethod};

const SEED: u64 = 42;

pub fn cmd_seed(db_path: &Path, user: &str, months: u32) -> Result<()> {
    let db = super::open_db(db_path)?;
    let today = Utc::now().date_naive();
    let mut rng = SmallRng::seed_from_u64(SEED);

    let mut tx_count = 0;
    for months_back in (0..months).rev() {
        let month_start = today
            .checked_sub_months(Months::new(months_back))
            .unwrap_or(today)
            .with_day(1)
            .unwrap_or(today);

        let mut push = |db: &Database, day: u32, amount: f64, description: &str, category: &str| {
            let date = month_start.with_day(day).unwrap_or(month_start);
            if date > today {
                return Ok::<(), anyhow::Error>(());
            }
            db.insert_transaction(&NewTransaction {
                user_id: user.to_string(),
                amount,
                description: description.to_string(),
                category: category.to_string(),
                method: PaymentMethod::default_for_amount(amount),
                date,
            })?;
            tx_count += 1;
            Ok(())
        };

        // Fixed monthly flows
        push(&db, 1, 3250.0, "ACME PAYROLL", "Income")?;
        push(&db, 3, -1400.0, "SUNRISE APARTMENTS", "Housing")?;
        push(&db, 7, -15.99, "NETFLIX", "Entertainment")?;
        push(&db, 12, -9.99, "SPOTIFY", "Entertainment")?;

        // Variable spending
        for day in [2, 9, 16, 23] {
            let amount = -rng.gen_range(60.0..110.0);
            push(&db, day, amount, "GREENLEAF MARKET", "Food")?;
        }
        for day in [6, 19] {
            let amount = -rng.gen_range(15.0..60.0);
            push(&db, day, amount, "CORNER BISTRO", "Dining")?;
        }
        push(&db, 15, -rng.gen_range(30.0..70.0), "CITY TRANSIT", "Transport")?;
    }

    // Upcoming bills
    let bills = [
        ("Rent", 1400.0, 30, "Housing"),
        ("Electricity", 90.0, 10, "Utilities"),
        ("Internet", 65.0, 14, "Utilities"),
        ("Car loan", 250.0, 20, "Debt"),
    ];
    for &(name, amount, days_ahead, category) in &bills {
        db.insert_bill(&NewBill {
            user_id: user.to_string(),
            name: name.to_string(),
            amount,
            due_date: today + Duration::days(days_ahead),
            category: category.to_string(),
        })?;
    }

    // Budget
    db.upsert_budget(
        user,
        3250.0,
        &[
            expense("Housing", 1400.0),
            expense("Food", 500.0),
            expense("Transport", 150.0),
            expense("Entertainment", 80.0),
            expense("Savings", 400.0),
        ],
    )?;

    // Goals
    db.insert_goal(&NewGoal {
        user_id: user.to_string(),
        name: "Emergency fund".to_string(),
        target_amount: 5000.0,
        current_amount: 1200.0,
        target_date: Some(end_of_year(today)),
        category: Some("Savings".to_string()),
    })?;
    db.insert_goal(&NewGoal {
        user_id: user.to_string(),
        name: "Vacation".to_string(),
        target_amount: 1500.0,
        current_amount: 300.0,
        target_date: Some(today + Duration::days(180)),
        category: Some("Travel".to_string()),
    })?;

    println!(
        "Seeded {} transactions, {} bills, 1 budget, 2 goals for user '{}'",
        tx_count,
        bills.len(),
        user
    );
    Ok(())
}

fn expense(category: &str, amount: f64) -> BudgetExpense {
    BudgetExpense {
        category: category.to_string(),
        amount,
        description: None,
    }
}

fn end_of_year(today: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn seed_is_deterministic() {
        let dir = TempDir::new().unwrap();
        let path_a = dir.path().join("a.db");
        let path_b = dir.path().join("b.db");

        cmd_seed(&path_a, "demo", 3).unwrap();
        cmd_seed(&path_b, "demo", 3).unwrap();

        let db_a = Database::new(&path_a.to_string_lossy()).unwrap();
        let db_b = Database::new(&path_b.to_string_lossy()).unwrap();

        let txs_a = db_a
            .list_transactions("demo", &Default::default(), 1000)
            .unwrap();
        let txs_b = db_b
            .list_transactions("demo", &Default::default(), 1000)
            .unwrap();

        assert!(!txs_a.is_empty());
        assert_eq!(txs_a.len(), txs_b.len());
        for (a, b) in txs_a.iter().zip(txs_b.iter()) {
            assert_eq!(a.amount, b.amount);
            assert_eq!(a.date, b.date);
            assert_eq!(a.description, b.description);
        }
    }

    #[test]
    fn seeded_history_contains_recurring_merchants() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("seed.db");
        cmd_seed(&path, "demo", 6).unwrap();

        let db = Database::new(&path.to_string_lossy()).unwrap();
        let txs = db
            .list_transactions("demo", &Default::default(), 1000)
            .unwrap();
        let netflix = txs.iter().filter(|t| t.description == "NETFLIX").count();
        assert!(netflix >= 3);
    }
}
