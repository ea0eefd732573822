//! Deterministic analytics over the record store
//!
//! Each submodule pairs a pure kernel (slice in, summary out — the part the
//! test suite pins down) with a composition function that fetches the
//! user's records and optionally enriches the result through the advisor.
//! Tenant identity is an explicit argument everywhere; nothing in here
//! falls back to a default user.

pub mod forecast;
pub mod habits;
pub mod health;
pub mod shortfall;
pub mod spending;

pub use forecast::Jitter;

use chrono::{Months, NaiveDate};

/// Start of a trailing analysis window of `months` calendar months.
pub(crate) fn window_start(today: NaiveDate, months: u32) -> NaiveDate {
    today
        .checked_sub_months(Months::new(months))
        .unwrap_or(today)
}

/// Category name fallback for uncategorized records
pub(crate) const UNCATEGORIZED: &str = "Uncategorized";

pub(crate) fn category_or_default(category: &str) -> String {
    if category.trim().is_empty() {
        UNCATEGORIZED.to_string()
    } else {
        category.to_string()
    }
}
