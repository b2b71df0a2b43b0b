//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → Health check endpoint (public)
//! - `/alterations` → Alteration catalog and curation (reads public, writes authenticated)
//! - `/mappings` → Trial mapping documents (public)

use crate::routes::{
    alterations::alteration_routes, health::health_routes, mappings::mapping_routes,
};
use axum::Router;
use util::state::AppState;

pub mod alterations;
pub mod health;
pub mod mappings;

/// Builds the application router for all HTTP endpoints.
///
/// The returned router has `AppState` as its state type; callers nest it under
/// `/api` and attach the state.
pub fn routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/health", health_routes())
        .nest("/alterations", alteration_routes(app_state))
        .nest("/mappings", mapping_routes())
}
