use sea_orm::DbErr;
use thiserror::Error;

/// Failures surfaced by the service layer.
///
/// "Not found" is never an error here; lookups return `Option`.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input rejected before or by the store.
    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}
