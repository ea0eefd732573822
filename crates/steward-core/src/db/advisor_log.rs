//! Advisor call log operations (append-only)

use rusqlite::params;

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::{AdvisorLogEntry, AdvisorOperation};

impl Database {
    /// Record one round-trip to the advisor backend
    pub fn log_advisor_call(
        &self,
        operation: AdvisorOperation,
        input: &str,
        response: &str,
    ) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO advisor_log (operation, input, response) VALUES (?, ?, ?)",
            params![operation.as_str(), input, response],
        )?;
        Ok(())
    }

    /// Most recent advisor calls
    pub fn recent_advisor_calls(&self, limit: i64) -> Result<Vec<AdvisorLogEntry>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, operation, input, response, created_at
             FROM advisor_log ORDER BY id DESC LIMIT ?",
        )?;

        let entries = stmt
            .query_map(params![limit], |row| {
                let operation_str: String = row.get(1)?;
                let created_at_str: String = row.get(4)?;
                Ok(AdvisorLogEntry {
                    id: row.get(0)?,
                    operation: operation_str
                        .parse()
                        .unwrap_or(AdvisorOperation::Chat),
                    input: row.get(2)?,
                    response: row.get(3)?,
                    created_at: parse_datetime(&created_at_str),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Count logged advisor calls
    pub fn count_advisor_calls(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM advisor_log", [], |row| row.get(0))?;
        Ok(count)
    }
}
