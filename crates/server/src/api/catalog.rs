//! # Catalog API
//!
//! Search the loaded catalog and reload it from the source.

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ApiResponse, CatalogItem, SharedState};

#[derive(Debug, Deserialize, Default)]
pub struct SearchParams {
    /// Case-insensitive substring of the name
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogResponse {
    pub query: String,
    /// Entries in the whole catalog
    pub total: usize,
    pub entries: Vec<CatalogItem>,
}

pub fn catalog_routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(search_catalog))
        .route("/reload", post(reload_catalog))
}

/// Search the catalog
///
/// Without `q` the previous query is reused.
#[utoipa::path(
    get,
    path = "/api/v1/catalog",
    tag = "catalog",
    params(("q" = Option<String>, Query, description = "Name filter")),
    responses(
        (status = 200, description = "Matching entries with availability", body = CatalogResponse)
    )
)]
pub async fn search_catalog(
    State(state): State<SharedState>,
    Query(params): Query<SearchParams>,
) -> Json<CatalogResponse> {
    if let Some(q) = &params.q {
        state.sync.set_query(q).await;
    }

    let snapshot = state.sync.snapshot().await;
    let entries = snapshot
        .filtered_catalog()
        .into_iter()
        .map(|entry| CatalogItem::new(entry, &snapshot))
        .collect();

    Json(CatalogResponse {
        query: snapshot.query.clone(),
        total: snapshot.catalog.len(),
        entries,
    })
}

/// Reload the catalog from its source
#[utoipa::path(
    post,
    path = "/api/v1/catalog/reload",
    tag = "catalog",
    responses(
        (status = 200, description = "Catalog reloaded", body = ApiResponse)
    )
)]
pub async fn reload_catalog(State(state): State<SharedState>) -> Json<ApiResponse> {
    let count = state
        .sync
        .load_catalog(state.catalog.as_ref(), state.catalog_limit)
        .await;
    if count == 0 {
        Json(ApiResponse::failed("Catalog source returned no entries"))
    } else {
        Json(ApiResponse::ok(format!("Loaded {} catalog entries", count)))
    }
}
