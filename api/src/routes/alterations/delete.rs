use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use db::models::alteration::Model as AlterationModel;
use util::state::AppState;

use crate::response::ApiError;

/// DELETE /alterations/{alteration_symbol}/{gene_record_name}
///
/// Deletes the caller's alteration and returns the removed record. Trial
/// mappings that reference it are left as they are.
pub async fn delete_alteration(
    State(app_state): State<AppState>,
    Extension(existing): Extension<AlterationModel>,
) -> impl IntoResponse {
    let id = existing.id;

    match existing.delete(app_state.db()).await {
        Ok(deleted) => {
            tracing::info!(id, "Alteration deleted");
            (StatusCode::OK, Json(deleted)).into_response()
        }
        Err(err) => ApiError::from(err).into_response(),
    }
}
