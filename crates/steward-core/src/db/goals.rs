//! Goal operations
//!
//! Only the amounts are stored; progress and status are derived in
//! `row_to_goal` on every read, so they cannot go stale.

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Goal, NewGoal};

impl Database {
    /// Insert a goal
    pub fn insert_goal(&self, goal: &NewGoal) -> Result<Goal> {
        if goal.target_amount <= 0.0 {
            return Err(Error::InvalidData(
                "Goal target amount must be greater than zero".to_string(),
            ));
        }
        if goal.current_amount < 0.0 {
            return Err(Error::InvalidData(
                "Goal current amount cannot be negative".to_string(),
            ));
        }

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO goals (user_id, name, target_amount, current_amount, target_date, category)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            params![
                goal.user_id,
                goal.name,
                goal.target_amount,
                goal.current_amount,
                goal.target_date.map(|d| d.to_string()),
                goal.category,
            ],
        )?;

        let id = conn.last_insert_rowid();
        self.get_goal(id)?
            .ok_or_else(|| Error::NotFound(format!("Goal {} not found after insert", id)))
    }

    /// A user's goals, newest first
    pub fn list_goals(&self, user_id: &str) -> Result<Vec<Goal>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, name, target_amount, current_amount, target_date, category,
                    created_at, updated_at
             FROM goals WHERE user_id = ? ORDER BY created_at DESC, id DESC",
        )?;

        let goals = stmt
            .query_map(params![user_id], Self::row_to_goal)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(goals)
    }

    /// Fetch one goal
    pub fn get_goal(&self, goal_id: i64) -> Result<Option<Goal>> {
        let conn = self.conn()?;
        let goal = conn
            .query_row(
                "SELECT id, user_id, name, target_amount, current_amount, target_date, category,
                        created_at, updated_at
                 FROM goals WHERE id = ?",
                params![goal_id],
                Self::row_to_goal,
            )
            .optional()?;
        Ok(goal)
    }

    /// Add to a goal's saved amount and return the recomputed goal
    pub fn add_goal_progress(&self, goal_id: i64, amount: f64) -> Result<Goal> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE goals
             SET current_amount = MAX(0, current_amount + ?), updated_at = CURRENT_TIMESTAMP
             WHERE id = ?",
            params![amount, goal_id],
        )?;
        if changed == 0 {
            return Err(Error::NotFound(format!("Goal {} not found", goal_id)));
        }

        self.get_goal(goal_id)?
            .ok_or_else(|| Error::NotFound(format!("Goal {} not found", goal_id)))
    }

    /// Delete a goal
    pub fn delete_goal(&self, goal_id: i64) -> Result<()> {
        let conn = self.conn()?;
        let changed = conn.execute("DELETE FROM goals WHERE id = ?", params![goal_id])?;
        if changed == 0 {
            return Err(Error::NotFound(format!("Goal {} not found", goal_id)));
        }
        Ok(())
    }

    fn row_to_goal(row: &rusqlite::Row) -> rusqlite::Result<Goal> {
        let target_amount: f64 = row.get(3)?;
        let current_amount: f64 = row.get(4)?;
        let target_date_str: Option<String> = row.get(5)?;
        let created_at_str: String = row.get(7)?;
        let updated_at_str: String = row.get(8)?;

        let (progress, status) = Goal::derive_progress(current_amount, target_amount);

        Ok(Goal {
            id: row.get(0)?,
            user_id: row.get(1)?,
            name: row.get(2)?,
            target_amount,
            current_amount,
            progress,
            status,
            target_date: target_date_str
                .and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()),
            category: row.get(6)?,
            created_at: parse_datetime(&created_at_str),
            updated_at: parse_datetime(&updated_at_str),
        })
    }
}
