//! Status command - record counts per store

use std::path::Path;

use anyhow::Result;

pub fn cmd_status(db_path: &Path) -> Result<()> {
    let db = super::open_db(db_path)?;
    let counts = db.store_counts()?;

    println!("Database: {}", db.path());
    println!("  transactions:  {}", counts.transactions);
    println!("  bills:         {}", counts.bills);
    println!("  budgets:       {}", counts.budgets);
    println!("  goals:         {}", counts.goals);
    println!("  news:          {}", counts.news);
    println!("  advisor calls: {}", counts.advisor_calls);
    Ok(())
}
