use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use common::format_validation_errors;
use db::models::alteration::Model as AlterationModel;
use services::curation::{CurationRequest, CurationService};
use util::state::AppState;
use validator::Validate;

use crate::{
    auth::AuthUser,
    response::ApiError,
    routes::alterations::common::{CreateAlterationRequest, CurationBody},
};

/// POST /alterations
///
/// Creates an alteration owned by the caller. Both names are stored
/// upper-cased.
///
/// ### Request Body
/// ```json
/// { "gene": "braf", "alteration": "v600e" }
/// ```
///
/// ### Responses
/// - `200 OK` with the created record
/// - `400 Bad Request` on a blank field or an existing pair
/// - `401 Unauthorized` without a valid token
pub async fn create_alteration(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    req: Result<Json<CreateAlterationRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(req) = match req {
        Ok(req) => req,
        Err(rejection) => return ApiError::BadRequest(rejection.body_text()).into_response(),
    };

    if let Err(e) = req.validate() {
        return ApiError::BadRequest(format_validation_errors(&e)).into_response();
    }

    match AlterationModel::create(app_state.db(), &req.gene, &req.alteration, claims.sub).await {
        Ok(alteration) => {
            tracing::info!(
                id = alteration.id,
                gene = %alteration.gene,
                alteration = %alteration.alteration,
                user = claims.sub,
                "Alteration created"
            );
            (StatusCode::OK, Json(alteration)).into_response()
        }
        Err(err) => ApiError::from(err).into_response(),
    }
}

/// POST /alterations/{alteration_symbol}/{gene_record_name}/{nct_id}
///
/// Records that the alteration applies to the trial, creating the alteration
/// and the trial mapping when they do not exist yet.
///
/// ### Request Body
/// ```json
/// { "type": "inclusion" }
/// ```
/// The body is optional; without one the entry has no `type`.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// { "outcome": "created_both", "code": "c", "mapping": { ... } }
/// ```
/// - `400 Bad Request` with `"code": "e"` if the curation fails
pub async fn curate_alteration(
    State(app_state): State<AppState>,
    Path((alteration_symbol, gene_record_name, nct_id)): Path<(String, String, String)>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    body: Result<Option<Json<CurationBody>>, JsonRejection>,
) -> impl IntoResponse {
    let body = match body {
        Ok(body) => body.map(|Json(body)| body).unwrap_or_default(),
        Err(rejection) => {
            return ApiError::CurationFailed(rejection.body_text()).into_response();
        }
    };

    let request = CurationRequest {
        gene: gene_record_name,
        alteration: alteration_symbol,
        nct_id,
        curation_type: body.curation_type,
        user_id: claims.sub,
    };

    match CurationService::curate(app_state.db(), request).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => {
            let message = ApiError::from(err).message().to_owned();
            tracing::warn!(user = claims.sub, %message, "Curation failed");
            ApiError::CurationFailed(message).into_response()
        }
    }
}
