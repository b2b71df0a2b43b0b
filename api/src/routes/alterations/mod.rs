//! Alteration routes.
//!
//! Reads are public. Creating and curating require a valid token; updating
//! and deleting additionally require that the caller created the record.

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post, put},
};
use util::state::AppState;

use crate::auth::guards::{allow_authenticated, require_alteration_owner};

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use delete::delete_alteration;
use get::{list_alterations, read_alteration, read_alterations, search_alterations};
use post::{create_alteration, curate_alteration};
use put::update_alteration;

pub fn alteration_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_alterations))
        .route(
            "/",
            post(create_alteration).route_layer(from_fn(allow_authenticated)),
        )
        .route("/search/{keywords}", get(search_alterations))
        .route("/trials/{nct_ids}", get(read_alterations))
        .route("/{alteration_symbol}/{gene_record_name}", get(read_alteration))
        .route(
            "/{alteration_symbol}/{gene_record_name}",
            put(update_alteration)
                .route_layer(from_fn_with_state(app_state.clone(), require_alteration_owner))
                .route_layer(from_fn(allow_authenticated)),
        )
        .route(
            "/{alteration_symbol}/{gene_record_name}",
            delete(delete_alteration)
                .route_layer(from_fn_with_state(app_state, require_alteration_owner))
                .route_layer(from_fn(allow_authenticated)),
        )
        .route(
            "/{alteration_symbol}/{gene_record_name}/{nct_id}",
            post(curate_alteration).route_layer(from_fn(allow_authenticated)),
        )
}
