//! Search endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use vdoc_search::{DocumentSearch, Query as SearchQuery, SearchResponse};
use vdoc_site::html_root;

use crate::error::ServerError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchParams {
    v: Option<String>,
    q: Option<String>,
    l: Option<String>,
}

/// Handle GET /search.
///
/// Short, oversized and unknown-version queries get the "no results"
/// payload without touching the file tree.
pub(crate) async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ServerError> {
    let config = state.site.config();
    let locale = state.site.resolve_locale(params.l.as_deref()).to_owned();
    let version = config
        .resolve_version(params.v.as_deref().unwrap_or_default())
        .to_owned();

    let query = params.q.as_deref().and_then(|q| {
        SearchQuery::parse(q, config.search.min_query_len, config.search.max_keywords)
    });
    let known_version = config.versions.available.contains(&version);
    let Some(query) = query.filter(|_| known_version) else {
        return Ok(Json(SearchResponse::empty(&config.translations, &locale)));
    };

    let worker = Arc::clone(&state);
    let worker_locale = locale.clone();
    let hits = tokio::task::spawn_blocking(move || {
        let site = &worker.site;
        let config = site.config();
        let urls = site.urls(&worker_locale);
        DocumentSearch::new(
            html_root(&config.paths_resolved, &version, &worker_locale),
            urls.base(),
            version.as_str(),
        )
        .with_config(&config.search)
        .search(&query)
    })
    .await??;

    Ok(Json(SearchResponse::new(hits, &config.translations, &locale)))
}
