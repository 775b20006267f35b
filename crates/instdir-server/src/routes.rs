use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Path, Query, State},
    http::Uri,
    Json,
};
use instdir_core::{
    institution_detail, list_institutions, DbStats, InstitutionDetail, InstitutionSummary,
    ListQuery,
};
use serde::{Deserialize, Serialize};
use tokio::task::spawn_blocking;

use super::{error::ApiError, state::AppState};

/// Paginated list envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse {
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub page: usize,
    pub page_size: usize,
    #[serde(rename = "resultsLength")]
    pub results_length: usize,
    pub results: Vec<InstitutionSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountriesResponse {
    pub countries: Vec<String>,
}

/// Query pairs are read in order so a repeated key keeps its last value
/// instead of rejecting the request.
pub async fn list_handler(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<ListResponse>, ApiError> {
    let query = ListQuery::from_pairs(pairs);
    let page = spawn_blocking(move || {
        list_institutions(state.store.as_ref(), &query, &state.query)
    })
    .await??;

    Ok(Json(ListResponse {
        count: page.count,
        next: page.has_next.then(|| page_link(&uri, page.page + 1)),
        previous: page.has_previous.then(|| page_link(&uri, page.page - 1)),
        page: page.page,
        page_size: page.page_size,
        results_length: page.len(),
        results: page.items,
    }))
}

pub async fn detail_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<InstitutionDetail>, ApiError> {
    let detail = spawn_blocking(move || institution_detail(state.store.as_ref(), &id)).await??;
    Ok(Json(detail))
}

pub async fn countries_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CountriesResponse>, ApiError> {
    let countries = spawn_blocking(move || state.store.countries()).await??;
    Ok(Json(CountriesResponse { countries }))
}

pub async fn stats_handler(State(state): State<Arc<AppState>>) -> Result<Json<DbStats>, ApiError> {
    let stats = spawn_blocking(move || state.store.stats()).await??;
    Ok(Json(stats))
}

pub async fn health_handler() -> &'static str {
    "ok"
}

/// Same path and query with `page` replaced. Page 1 drops the parameter.
fn page_link(uri: &Uri, page: usize) -> String {
    let mut pairs: Vec<String> = uri
        .query()
        .unwrap_or("")
        .split('&')
        .filter(|p| !p.is_empty() && p.split('=').next() != Some("page"))
        .map(str::to_string)
        .collect();
    if page > 1 {
        pairs.push(format!("page={page}"));
    }

    if pairs.is_empty() {
        uri.path().to_string()
    } else {
        format!("{}?{}", uri.path(), pairs.join("&"))
    }
}
