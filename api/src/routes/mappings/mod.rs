use axum::{Router, routing::get};
use util::state::AppState;

pub mod get;

use get::get_mapping;

pub fn mapping_routes() -> Router<AppState> {
    Router::new().route("/{nct_id}", get(get_mapping))
}
