//! Bill operations

use chrono::{Duration, NaiveDate};
use rusqlite::{params, OptionalExtension};

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Bill, BillStatus, NewBill};

impl Database {
    /// Insert a bill. Bills always start in the `upcoming` state.
    pub fn insert_bill(&self, bill: &NewBill) -> Result<Bill> {
        if bill.amount <= 0.0 {
            return Err(Error::InvalidData(
                "Bill amount must be greater than zero".to_string(),
            ));
        }

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO bills (user_id, name, amount, due_date, status, category)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            params![
                bill.user_id,
                bill.name,
                bill.amount,
                bill.due_date.to_string(),
                BillStatus::Upcoming.as_str(),
                bill.category,
            ],
        )?;

        let id = conn.last_insert_rowid();
        let created = conn.query_row(
            "SELECT id, user_id, name, amount, due_date, status, category, created_at
             FROM bills WHERE id = ?",
            params![id],
            Self::row_to_bill,
        )?;
        Ok(created)
    }

    /// All of a user's bills, sorted by due date
    pub fn list_bills(&self, user_id: &str) -> Result<Vec<Bill>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, name, amount, due_date, status, category, created_at
             FROM bills WHERE user_id = ? ORDER BY due_date ASC, id ASC",
        )?;

        let bills = stmt
            .query_map(params![user_id], Self::row_to_bill)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(bills)
    }

    /// Upcoming bills with a due date in [today, today + days]
    pub fn upcoming_bills(&self, user_id: &str, today: NaiveDate, days: i64) -> Result<Vec<Bill>> {
        let until = today + Duration::days(days);
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, name, amount, due_date, status, category, created_at
             FROM bills
             WHERE user_id = ? AND status = 'upcoming' AND due_date >= ? AND due_date <= ?
             ORDER BY due_date ASC, id ASC",
        )?;

        let bills = stmt
            .query_map(
                params![user_id, today.to_string(), until.to_string()],
                Self::row_to_bill,
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(bills)
    }

    /// Transition a bill's status (upcoming -> paid, or back)
    pub fn update_bill_status(&self, bill_id: i64, status: BillStatus) -> Result<Bill> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE bills SET status = ? WHERE id = ?",
            params![status.as_str(), bill_id],
        )?;
        if changed == 0 {
            return Err(Error::NotFound(format!("Bill {} not found", bill_id)));
        }

        let bill = conn.query_row(
            "SELECT id, user_id, name, amount, due_date, status, category, created_at
             FROM bills WHERE id = ?",
            params![bill_id],
            Self::row_to_bill,
        )?;
        Ok(bill)
    }

    /// Fetch one bill
    pub fn get_bill(&self, bill_id: i64) -> Result<Option<Bill>> {
        let conn = self.conn()?;
        let bill = conn
            .query_row(
                "SELECT id, user_id, name, amount, due_date, status, category, created_at
                 FROM bills WHERE id = ?",
                params![bill_id],
                Self::row_to_bill,
            )
            .optional()?;
        Ok(bill)
    }

    fn row_to_bill(row: &rusqlite::Row) -> rusqlite::Result<Bill> {
        let due_date_str: String = row.get(4)?;
        let status_str: String = row.get(5)?;
        let created_at_str: String = row.get(7)?;
        Ok(Bill {
            id: row.get(0)?,
            user_id: row.get(1)?,
            name: row.get(2)?,
            amount: row.get(3)?,
            due_date: NaiveDate::parse_from_str(&due_date_str, "%Y-%m-%d").unwrap_or_default(),
            status: status_str.parse().unwrap_or(BillStatus::Upcoming),
            category: row.get(6)?,
            created_at: parse_datetime(&created_at_str),
        })
    }
}
