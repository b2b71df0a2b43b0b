pub mod models;
pub mod test_utils;

use sea_orm::{Database, DatabaseConnection, DbErr};
use std::path::Path;
use util::config;

/// Opens the configured database.
///
/// `DATABASE_PATH` may be a full DSN or a plain SQLite file path; for a file
/// path the parent directory is created first.
pub async fn connect() -> Result<DatabaseConnection, DbErr> {
    if let Some(file) = config::database_file() {
        ensure_parent_dir(&file);
    }

    let url = config::database_url();
    tracing::debug!(url = %url, "Connecting to database");
    Database::connect(&url).await
}

/// Creates the directory holding `file`. Failure is logged; the connect that
/// follows reports the real error.
pub fn ensure_parent_dir(file: &str) {
    let Some(parent) = Path::new(file).parent() else {
        return;
    };
    if parent.as_os_str().is_empty() {
        return;
    }
    if let Err(err) = std::fs::create_dir_all(parent) {
        tracing::warn!(error = %err, dir = %parent.display(), "Failed to create database directory");
    }
}
