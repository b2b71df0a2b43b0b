use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::mapping::Model as MappingModel;
use util::state::AppState;

use crate::response::ApiError;

/// GET /mappings/{nct_id}
///
/// Returns the trial's mapping document with its alteration entries and audit
/// log in insertion order, or `null` if the trial has never been curated.
pub async fn get_mapping(
    State(app_state): State<AppState>,
    Path(nct_id): Path<String>,
) -> impl IntoResponse {
    match MappingModel::find_document_by_nct_id(app_state.db(), nct_id.trim()).await {
        Ok(document) => (StatusCode::OK, Json(document)).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}
