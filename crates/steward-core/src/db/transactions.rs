//! Transaction operations

use chrono::NaiveDate;
use rusqlite::params;

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{NewTransaction, PaymentMethod, Transaction, TransactionKind};

/// Optional filters for transaction queries
#[derive(Debug, Clone, Default)]
pub struct TransactionQueryOptions {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub category: Option<String>,
    pub kind: Option<TransactionKind>,
    pub method: Option<PaymentMethod>,
}

impl Database {
    /// Insert a transaction
    ///
    /// Rejects zero amounts; everything else about a transaction is
    /// immutable once stored.
    pub fn insert_transaction(&self, tx: &NewTransaction) -> Result<Transaction> {
        if tx.amount == 0.0 {
            return Err(Error::InvalidData(
                "Transaction amount cannot be zero".to_string(),
            ));
        }

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO transactions (user_id, amount, description, category, method, date)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            params![
                tx.user_id,
                tx.amount,
                tx.description,
                tx.category,
                tx.method.as_str(),
                tx.date.to_string(),
            ],
        )?;

        let id = conn.last_insert_rowid();
        let created = conn.query_row(
            "SELECT id, user_id, amount, description, category, method, date, created_at
             FROM transactions WHERE id = ?",
            params![id],
            Self::row_to_transaction,
        )?;
        Ok(created)
    }

    /// List a user's transactions with optional filters, newest first
    pub fn list_transactions(
        &self,
        user_id: &str,
        options: &TransactionQueryOptions,
        limit: i64,
    ) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;

        let mut conditions = vec!["user_id = ?".to_string()];
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(user_id.to_string())];

        if let Some(start) = options.start_date {
            conditions.push("date >= ?".to_string());
            params.push(Box::new(start.to_string()));
        }
        if let Some(end) = options.end_date {
            conditions.push("date <= ?".to_string());
            params.push(Box::new(end.to_string()));
        }
        if let Some(ref category) = options.category {
            conditions.push("category = ? COLLATE NOCASE".to_string());
            params.push(Box::new(category.clone()));
        }
        if let Some(kind) = options.kind {
            // Derived field: filter on the sign of the amount
            match kind {
                TransactionKind::Deposit => conditions.push("amount > 0".to_string()),
                TransactionKind::Withdrawal => conditions.push("amount < 0".to_string()),
            }
        }
        if let Some(method) = options.method {
            conditions.push("method = ?".to_string());
            params.push(Box::new(method.as_str().to_string()));
        }

        let sql = format!(
            "SELECT id, user_id, amount, description, category, method, date, created_at
             FROM transactions WHERE {} ORDER BY date DESC, id DESC LIMIT ?",
            conditions.join(" AND ")
        );
        params.push(Box::new(limit));

        let params_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let mut stmt = conn.prepare(&sql)?;
        let transactions = stmt
            .query_map(params_refs.as_slice(), Self::row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// A user's transactions in [from, to], oldest first (for analysis windows)
    pub fn transactions_in_range(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, amount, description, category, method, date, created_at
             FROM transactions
             WHERE user_id = ? AND date >= ? AND date <= ?
             ORDER BY date ASC, id ASC",
        )?;

        let transactions = stmt
            .query_map(
                params![user_id, from.to_string(), to.to_string()],
                Self::row_to_transaction,
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Current balance: sum of all signed amounts for the user
    pub fn balance(&self, user_id: &str) -> Result<f64> {
        let conn = self.conn()?;
        let balance: f64 = conn.query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM transactions WHERE user_id = ?",
            params![user_id],
            |row| row.get(0),
        )?;
        Ok(balance)
    }

    /// Count a user's transactions
    pub fn count_transactions(&self, user_id: &str) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM transactions WHERE user_id = ?",
            params![user_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    pub(crate) fn row_to_transaction(row: &rusqlite::Row) -> rusqlite::Result<Transaction> {
        let amount: f64 = row.get(2)?;
        let method_str: String = row.get(5)?;
        let date_str: String = row.get(6)?;
        let created_at_str: String = row.get(7)?;
        Ok(Transaction {
            id: row.get(0)?,
            user_id: row.get(1)?,
            amount,
            description: row.get(3)?,
            category: row.get(4)?,
            method: method_str.parse().unwrap_or(PaymentMethod::Other),
            kind: TransactionKind::from_amount(amount),
            date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").unwrap_or_default(),
            created_at: parse_datetime(&created_at_str),
        })
    }
}
