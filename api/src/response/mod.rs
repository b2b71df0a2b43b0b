//! Response shapes shared by every handler.
//!
//! Successful calls return their document as the JSON body directly. Failures
//! go through [`ApiError`], which renders `{ "message": ... }` with the
//! matching status code; the ownership check answers with plain text.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use services::curation::LEGACY_FAILURE_CODE;
use services::error::ServiceError;

/// Envelope used by the health probe.
///
/// ```json
/// { "success": true, "data": "OK", "message": "Health check passed" }
/// ```
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }
}

/// JSON body for every error except the ownership rejection.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<char>,
}

#[derive(Debug)]
pub enum ApiError {
    /// Invalid input or a failed store operation.
    BadRequest(String),
    /// A curation that could not be applied; carries the legacy failure code.
    CurationFailed(String),
    Unauthorized(String),
    NotFound(String),
    /// Caller is authenticated but does not own the record.
    Forbidden,
}

impl ApiError {
    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest(m)
            | Self::CurationFailed(m)
            | Self::Unauthorized(m)
            | Self::NotFound(m) => m,
            Self::Forbidden => FORBIDDEN_MESSAGE,
        }
    }
}

pub const FORBIDDEN_MESSAGE: &str = "User is not authorized";

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, None),
            Self::CurationFailed(_) => (StatusCode::BAD_REQUEST, Some(LEGACY_FAILURE_CODE)),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, None),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, None),
            Self::Forbidden => return (StatusCode::FORBIDDEN, FORBIDDEN_MESSAGE).into_response(),
        };

        let body = ErrorResponse {
            message: self.message().to_owned(),
            code,
        };
        (status, Json(body)).into_response()
    }
}

/// Turns a store error into a message fit for clients.
pub fn store_message(err: &DbErr) -> String {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            return "An alteration with this gene and symbol already exists".into();
        }
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            return "Referenced user does not exist".into();
        }
        _ => {}
    }

    match err {
        DbErr::Custom(m) | DbErr::RecordNotFound(m) => m.clone(),
        other => other.to_string(),
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self::BadRequest(store_message(&err))
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(m) => Self::BadRequest(m),
            ServiceError::Database(db_err) => Self::from(db_err),
        }
    }
}
