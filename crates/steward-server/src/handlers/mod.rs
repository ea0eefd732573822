//! HTTP request handlers organized by API area

pub mod analytics;
pub mod assistant;
pub mod budgets;
pub mod goals;
pub mod news;
pub mod transactions;

// Re-export all handlers for use in the router
pub use analytics::*;
pub use assistant::*;
pub use budgets::*;
pub use goals::*;
pub use news::*;
pub use transactions::*;

use crate::DEFAULT_USER_ID;

/// Resolve the tenant for a request. The boundary substitutes the
/// historical placeholder when the caller omits `userId`; everything below
/// this layer takes the user id explicitly.
pub(crate) fn resolve_user(user_id: Option<&str>) -> String {
    match user_id {
        Some(id) if !id.trim().is_empty() => id.to_string(),
        _ => DEFAULT_USER_ID.to_string(),
    }
}

/// Clamp a months window parameter to something sane
pub(crate) fn clamp_months(months: Option<u32>) -> u32 {
    months.unwrap_or(3).clamp(1, 24)
}
