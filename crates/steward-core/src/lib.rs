//! Steward Core Library
//!
//! Shared functionality for the Steward personal finance service:
//! - SQLite record store for transactions, bills, budgets, goals, and news
//! - Deterministic analytics: category aggregation, expense forecasting,
//!   financial health ratios, bill-shortfall prediction, and
//!   recurring-pattern detection
//! - Pluggable advisor backends (Gemini API, mock) behind a narrow
//!   prompt-in / typed-partial-result-out interface

pub mod advisor;
pub mod analytics;
pub mod db;
pub mod error;
pub mod models;

pub use advisor::{AdvisorBackend, AdvisorClient, GeminiBackend, MockBackend};
pub use db::Database;
pub use error::{Error, Result};
