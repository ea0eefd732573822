//! Report command - print analytics as JSON
//!
//! Runs the deterministic analytics only; advisor enrichment belongs to
//! the server, where failures can degrade per-request.

use std::path::Path;

use anyhow::Result;
use chrono::Utc;

use steward_core::analytics::{forecast, habits, spending, Jitter};

use crate::cli::ReportKind;

pub async fn cmd_report(db_path: &Path, kind: ReportKind) -> Result<()> {
    let db = super::open_db(db_path)?;
    let today = Utc::now().date_naive();

    let output = match kind {
        ReportKind::Spending { user, months } => {
            let analysis = spending::spending_analysis(&db, None, &user, months, today).await?;
            serde_json::to_string_pretty(&analysis)?
        }
        ReportKind::Forecast { user, months, seed } => {
            let mut jitter = match seed {
                Some(seed) => Jitter::seeded(seed),
                None => Jitter::from_entropy(),
            };
            let projection =
                forecast::expense_forecast(&db, &user, months, today, &mut jitter).await?;
            serde_json::to_string_pretty(&projection)?
        }
        ReportKind::Habits { user, months } => {
            let report = habits::habit_report(&db, None, &user, months, today).await?;
            serde_json::to_string_pretty(&report)?
        }
    };

    println!("{}", output);
    Ok(())
}
