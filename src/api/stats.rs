//! Interaction stats endpoint
//!
//! The board fetches stats in bulk for every card on screen; the detail page
//! asks for a single id. Results come back in request order so the client
//! can zip them against its card list.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::ratings;
use crate::error::{ApiError, ApiResult};
use crate::models::TitleStats;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    /// Comma-separated title ids
    #[serde(default)]
    pub ids: String,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub stats: Vec<TitleStats>,
}

/// Parse a comma-separated id list; blank segments are skipped, anything
/// non-numeric is a 400
pub fn parse_ids(raw: &str) -> Result<Vec<i64>, ApiError> {
    let mut ids = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let id: i64 = part
            .parse()
            .map_err(|_| ApiError::BadRequest(format!("invalid id: {}", part)))?;
        ids.push(id);
    }
    Ok(ids)
}

/// GET /api/stats?ids=1,2,3
pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> ApiResult<Json<StatsResponse>> {
    let ids = parse_ids(&query.ids)?;
    let stats = ratings::stats_for(&state.db, &state.guest_guid, &ids).await?;
    Ok(Json(StatsResponse { stats }))
}

/// Build stats routes
pub fn stats_routes() -> Router<AppState> {
    Router::new().route("/api/stats", get(get_stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ids() {
        assert_eq!(parse_ids("1,2,3").unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_ids(" 94796 , 67915 ").unwrap(), vec![94796, 67915]);
        assert_eq!(parse_ids("").unwrap(), Vec::<i64>::new());
        assert_eq!(parse_ids(",,").unwrap(), Vec::<i64>::new());
    }

    #[test]
    fn test_parse_ids_rejects_garbage() {
        assert!(parse_ids("1,abc").is_err());
        assert!(parse_ids("12.5").is_err());
    }
}
