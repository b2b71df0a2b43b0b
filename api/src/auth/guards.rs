use crate::auth::claims::AuthUser;
use crate::response::ApiError;
use axum::{
    body::Body,
    extract::{FromRequestParts, Path, State},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use db::models::alteration::Model as AlterationModel;
use util::state::AppState;

/// Validates the bearer token and stores the resulting `AuthUser` in the
/// request extensions for downstream handlers.
pub async fn allow_authenticated(req: Request<Body>, next: Next) -> Result<Response, ApiError> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &()).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Returns true when `user` created `alteration`.
pub fn has_authorization(user: &AuthUser, alteration: &AlterationModel) -> bool {
    alteration.user_id == user.user_id()
}

/// Resolves the alteration named by `/{alteration_symbol}/{gene_record_name}`
/// and lets the request through only for its owner.
///
/// Must run after [`allow_authenticated`]. The resolved record is inserted
/// into the request extensions so handlers can act on it without a second
/// lookup.
///
/// # Errors
/// - `404 Not Found` if no alteration matches the pair.
/// - `403 Forbidden` if the caller did not create it.
pub async fn require_alteration_owner(
    State(app_state): State<AppState>,
    Path((alteration_symbol, gene_record_name)): Path<(String, String)>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let user = req
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or_else(|| ApiError::Unauthorized("Authentication required".into()).into_response())?;

    let alteration = AlterationModel::find_by_gene_and_alteration(
        app_state.db(),
        &gene_record_name,
        &alteration_symbol,
    )
    .await
    .map_err(|err| ApiError::from(err).into_response())?
    .ok_or_else(|| ApiError::NotFound("Alteration not found".into()).into_response())?;

    if !has_authorization(&user, &alteration) {
        tracing::warn!(
            user = user.user_id(),
            owner = alteration.user_id,
            alteration = alteration.id,
            "Rejected change to alteration owned by another user"
        );
        return Err(ApiError::Forbidden.into_response());
    }

    req.extensions_mut().insert(alteration);
    Ok(next.run(req).await)
}
