use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use common::format_validation_errors;
use db::models::alteration::{AlterationPatch, Model as AlterationModel};
use util::state::AppState;
use validator::Validate;

use crate::{response::ApiError, routes::alterations::common::UpdateAlterationRequest};

/// PUT /alterations/{alteration_symbol}/{gene_record_name}
///
/// Renames the caller's alteration. Only `gene` and `alteration` are read from
/// the body; omitted fields keep their value.
///
/// ### Responses
/// - `200 OK` with the updated record
/// - `400 Bad Request` on a blank value or a clash with an existing pair
/// - `401 Unauthorized`, `403 Forbidden`, `404 Not Found` from the guards
pub async fn update_alteration(
    State(app_state): State<AppState>,
    Extension(existing): Extension<AlterationModel>,
    req: Result<Json<UpdateAlterationRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(req) = match req {
        Ok(req) => req,
        Err(rejection) => return ApiError::BadRequest(rejection.body_text()).into_response(),
    };

    if let Err(e) = req.validate() {
        return ApiError::BadRequest(format_validation_errors(&e)).into_response();
    }

    let patch = AlterationPatch {
        gene: req.gene,
        alteration: req.alteration,
    };

    match existing.update(app_state.db(), patch).await {
        Ok(updated) => (StatusCode::OK, Json(updated)).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}
