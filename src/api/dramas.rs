//! Catalog endpoints
//!
//! Thin JSON proxy over the catalog client: validate, fetch, serialize.
//! Pagination and sorting stay upstream; the browser merges pages itself.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::models::{Drama, DramaDetail};
use crate::AppState;

/// Origin country codes the board can browse
pub const ORIGINS: [&str; 3] = ["KR", "JP", "CN"];

/// `origin` must be a known country code or `all` (drops the filter)
pub fn is_valid_origin(origin: &str) -> bool {
    origin == "all" || ORIGINS.contains(&origin)
}

#[derive(Debug, Deserialize)]
pub struct DiscoverQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_origin")]
    pub origin: String,
}

fn default_page() -> i64 {
    1
}

fn default_origin() -> String {
    "KR".to_string()
}

#[derive(Debug, Serialize)]
pub struct DramaListResponse {
    pub dramas: Vec<Drama>,
}

/// GET /api/dramas?page=&origin=
pub async fn list_dramas(
    State(state): State<AppState>,
    Query(query): Query<DiscoverQuery>,
) -> ApiResult<Json<DramaListResponse>> {
    if query.page < 1 {
        return Err(ApiError::BadRequest(format!(
            "page must be >= 1, got {}",
            query.page
        )));
    }
    if !is_valid_origin(&query.origin) {
        return Err(ApiError::BadRequest(format!(
            "unknown origin: {}",
            query.origin
        )));
    }

    let dramas = state.catalog.discover(query.page, &query.origin).await?;
    Ok(Json(DramaListResponse { dramas }))
}

/// GET /api/dramas/:id
pub async fn get_drama(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<DramaDetail>> {
    let detail = state.catalog.find(id).await?;
    Ok(Json(detail))
}

/// Build catalog routes
pub fn drama_routes() -> Router<AppState> {
    Router::new()
        .route("/api/dramas", get(list_dramas))
        .route("/api/dramas/:id", get(get_drama))
}
