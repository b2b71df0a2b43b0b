//! Application state container shared across Axum route handlers.
//!
//! Holds the database connection. Handlers receive it through Axum's
//! `State<AppState>` extractor.

use sea_orm::DatabaseConnection;

/// Central application state shared across the server.
///
/// `DatabaseConnection` is a pooled handle and cheap to clone.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns a shared reference to the internal `DatabaseConnection`.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
