//! Router construction.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use vdoc_site::{CLIENT_SCRIPT_PATH, SEARCH_PATH};

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(SEARCH_PATH, get(handlers::search::search))
        .route(CLIENT_SCRIPT_PATH, get(handlers::assets::get_client_script))
        .route("/api/pages/{*path}", get(handlers::pages::get_json))
        .route("/", get(handlers::pages::get_root_html))
        .route("/{*path}", get(handlers::pages::get_html))
        .layer(security::security_headers())
        .with_state(state)
}
