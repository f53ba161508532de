//! Client script endpoint.

use axum::http::header;
use axum::response::IntoResponse;
use vdoc_site::CLIENT_SCRIPT;

/// Handle GET /assets/vdoc.js.
pub(crate) async fn get_client_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        CLIENT_SCRIPT,
    )
}
