//! Error types for the HTTP server.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use vdoc_search::SearchError;
use vdoc_site::NavigationError;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Request path does not resolve to a page.
    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("{0}")]
    Navigation(#[from] NavigationError),

    #[error("{0}")]
    Search(#[from] SearchError),

    /// A blocking search task panicked or was cancelled.
    #[error("Search task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            Self::PageNotFound(_) | Self::Search(SearchError::RootNotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            Self::Navigation(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        (status, Json(json!({"error": self.to_string()}))).into_response()
    }
}
