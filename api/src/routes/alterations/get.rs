use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::alteration::Model as AlterationModel;
use services::alteration::AlterationService;
use util::state::AppState;

use crate::response::ApiError;

/// GET /alterations
///
/// Lists every alteration, newest first, with its creator's display name.
///
/// ### Responses
/// - `200 OK` with an array of alterations
/// - `400 Bad Request` if the store fails
pub async fn list_alterations(State(app_state): State<AppState>) -> impl IntoResponse {
    match AlterationModel::list(app_state.db()).await {
        Ok(alterations) => (StatusCode::OK, Json(alterations)).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Failed to list alterations");
            ApiError::from(err).into_response()
        }
    }
}

/// GET /alterations/{alteration_symbol}/{gene_record_name}
///
/// Returns the matching alteration, or `null` when none exists.
pub async fn read_alteration(
    State(app_state): State<AppState>,
    Path((alteration_symbol, gene_record_name)): Path<(String, String)>,
) -> impl IntoResponse {
    match AlterationModel::find_with_user(app_state.db(), &gene_record_name, &alteration_symbol)
        .await
    {
        Ok(found) => (StatusCode::OK, Json(found)).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}

/// GET /alterations/trials/{nct_ids}
///
/// Bulk lookup by a comma-separated list of alteration ids. Ids that do not
/// exist are left out of the result.
///
/// ### Responses
/// - `200 OK` with an array of alterations
/// - `400 Bad Request` if an id is not an integer
pub async fn read_alterations(
    State(app_state): State<AppState>,
    Path(nct_ids): Path<String>,
) -> impl IntoResponse {
    match AlterationService::find_by_id_list(app_state.db(), &nct_ids).await {
        Ok(alterations) => (StatusCode::OK, Json(alterations)).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}

/// GET /alterations/search/{keywords}
///
/// Returns alterations whose gene or symbol contains every comma-separated
/// keyword.
pub async fn search_alterations(
    State(app_state): State<AppState>,
    Path(keywords): Path<String>,
) -> impl IntoResponse {
    match AlterationService::search(app_state.db(), &keywords).await {
        Ok(alterations) => (StatusCode::OK, Json(alterations)).into_response(),
        Err(err) => {
            tracing::error!(error = %err, %keywords, "Alteration search failed");
            ApiError::from(err).into_response()
        }
    }
}
