//! Command implementations

mod report;
mod seed;
mod serve;
mod status;

pub use report::cmd_report;
pub use seed::cmd_seed;
pub use serve::cmd_serve;
pub use status::cmd_status;

use std::path::Path;

use anyhow::Result;
use steward_core::db::Database;

/// Open the database at the given path
pub(crate) fn open_db(path: &Path) -> Result<Database> {
    let db = Database::new(&path.to_string_lossy())?;
    Ok(db)
}
