//! Budget operations
//!
//! One budget per user. The expense list is stored as a JSON column so the
//! caller's ordering is preserved, and updates are a single upsert statement
//! so a concurrent reader never observes a half-written budget.

use rusqlite::{params, OptionalExtension};

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Budget, BudgetExpense};

impl Database {
    /// Fetch a user's budget, if one has been set
    pub fn get_budget(&self, user_id: &str) -> Result<Option<Budget>> {
        let conn = self.conn()?;
        let budget = conn
            .query_row(
                "SELECT user_id, income, expenses, updated_at FROM budgets WHERE user_id = ?",
                params![user_id],
                Self::row_to_budget,
            )
            .optional()?;
        Ok(budget)
    }

    /// Create or replace a user's budget
    pub fn upsert_budget(
        &self,
        user_id: &str,
        income: f64,
        expenses: &[BudgetExpense],
    ) -> Result<Budget> {
        if income <= 0.0 {
            return Err(Error::InvalidData(
                "Budget income must be greater than zero".to_string(),
            ));
        }

        let expenses_json = serde_json::to_string(expenses)?;
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO budgets (user_id, income, expenses, updated_at)
            VALUES (?, ?, ?, CURRENT_TIMESTAMP)
            ON CONFLICT(user_id) DO UPDATE SET
                income = excluded.income,
                expenses = excluded.expenses,
                updated_at = CURRENT_TIMESTAMP
            "#,
            params![user_id, income, expenses_json],
        )?;

        let budget = conn.query_row(
            "SELECT user_id, income, expenses, updated_at FROM budgets WHERE user_id = ?",
            params![user_id],
            Self::row_to_budget,
        )?;
        Ok(budget)
    }

    fn row_to_budget(row: &rusqlite::Row) -> rusqlite::Result<Budget> {
        let expenses_json: String = row.get(2)?;
        let updated_at_str: String = row.get(3)?;
        Ok(Budget {
            user_id: row.get(0)?,
            income: row.get(1)?,
            expenses: serde_json::from_str(&expenses_json).unwrap_or_default(),
            updated_at: parse_datetime(&updated_at_str),
        })
    }
}
