//! Page endpoints: HTML shell and JSON.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::Html;
use vdoc_site::Page;

use super::LocaleParams;
use crate::error::ServerError;
use crate::state::AppState;

/// Handle GET /.
pub(crate) async fn get_root_html(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LocaleParams>,
) -> Result<Html<String>, ServerError> {
    let page = load_page(&state, "", params.l.as_deref())?;
    Ok(Html(page.to_html()))
}

/// Handle GET /{*path}.
pub(crate) async fn get_html(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(params): Query<LocaleParams>,
) -> Result<Html<String>, ServerError> {
    let page = load_page(&state, &path, params.l.as_deref())?;
    Ok(Html(page.to_html()))
}

/// Handle GET /api/pages/{*path}.
pub(crate) async fn get_json(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(params): Query<LocaleParams>,
) -> Result<Json<Page>, ServerError> {
    load_page(&state, &path, params.l.as_deref()).map(Json)
}

fn load_page(state: &AppState, path: &str, locale: Option<&str>) -> Result<Page, ServerError> {
    let site = &state.site;
    let locale = site.resolve_locale(locale);
    let nav = site
        .resolve(path, locale)
        .ok_or_else(|| ServerError::PageNotFound(format!("/{path}")))?;
    tracing::debug!(path = %path, route = nav.route.as_str(), "Serving page");
    Ok(site.page(&nav)?)
}
