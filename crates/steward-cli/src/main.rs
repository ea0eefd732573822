//! Steward CLI - personal finance backend
//!
//! Usage:
//!   steward serve --port 3000     Start the REST API server
//!   steward seed --months 6       Generate a demo dataset
//!   steward report spending       Print analytics as JSON
//!   steward status                Show record counts

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Serve {
            port,
            host,
            origins,
        } => commands::cmd_serve(&cli.db, &host, port, origins.as_deref()).await,
        Commands::Seed { user, months } => commands::cmd_seed(&cli.db, &user, months),
        Commands::Report { kind } => commands::cmd_report(&cli.db, kind).await,
        Commands::Status => commands::cmd_status(&cli.db),
    }
}

#[cfg(test)]
mod tests {
    use super::cli::Cli;
    use clap::Parser;

    #[test]
    fn parses_serve_command() {
        let cli = Cli::parse_from(["steward", "serve", "--port", "8080"]);
        match cli.command {
            super::Commands::Serve { port, host, .. } => {
                assert_eq!(port, 8080);
                assert_eq!(host, "127.0.0.1");
            }
            _ => panic!("expected serve command"),
        }
    }

    #[test]
    fn parses_report_forecast_with_seed() {
        let cli = Cli::parse_from(["steward", "report", "forecast", "--seed", "42"]);
        match cli.command {
            super::Commands::Report {
                kind: super::ReportKind::Forecast { seed, months, .. },
            } => {
                assert_eq!(seed, Some(42));
                assert_eq!(months, 3);
            }
            _ => panic!("expected forecast report"),
        }
    }
}
