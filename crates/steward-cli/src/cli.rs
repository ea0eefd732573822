//! CLI argument definitions using clap
//!
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Steward - Personal finance tracking with an AI advisor
#[derive(Parser)]
#[command(name = "steward")]
#[command(about = "Personal finance backend with analytics and an AI advisor", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "steward.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Allowed CORS origins (comma-separated; empty allows any origin)
        #[arg(long)]
        origins: Option<String>,
    },

    /// Seed the database with a deterministic demo dataset
    Seed {
        /// User the records belong to
        #[arg(short, long, default_value = "default-user")]
        user: String,

        /// Months of transaction history to generate
        #[arg(short, long, default_value = "6")]
        months: u32,
    },

    /// Print an analytics report as JSON
    Report {
        #[command(subcommand)]
        kind: ReportKind,
    },

    /// Show record counts per store
    Status,
}

#[derive(Subcommand)]
pub enum ReportKind {
    /// Category spending breakdown
    Spending {
        /// User to analyze
        #[arg(short, long, default_value = "default-user")]
        user: String,

        /// Trailing window in months
        #[arg(short, long, default_value = "3")]
        months: u32,
    },

    /// Three-month expense forecast
    Forecast {
        /// User to analyze
        #[arg(short, long, default_value = "default-user")]
        user: String,

        /// Trailing window in months
        #[arg(short, long, default_value = "3")]
        months: u32,

        /// Jitter seed for reproducible output (omit for entropy)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Recurring merchant patterns
    Habits {
        /// User to analyze
        #[arg(short, long, default_value = "default-user")]
        user: String,

        /// Trailing window in months
        #[arg(short, long, default_value = "3")]
        months: u32,
    },
}
