//! Serve command - run the REST API server

use std::path::Path;

use anyhow::Result;

use steward_server::{create_router, ServerConfig};

use super::open_db;

pub async fn cmd_serve(db_path: &Path, host: &str, port: u16, origins: Option<&str>) -> Result<()> {
    let db = open_db(db_path)?;

    let allowed_origins = origins
        .map(|s| {
            s.split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let router = create_router(db, ServerConfig { allowed_origins });
    steward_server::serve(router, host, port).await
}
