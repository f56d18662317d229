//! Interaction endpoints
//!
//! All writes target the shared guest user's rows. Toggles answer with the
//! new flag value so the client can render without a second round trip;
//! bulk clears answer with how many rows they touched.

use axum::{
    extract::{Path, State},
    routing::{delete, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::ratings;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

// === Request types ===

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub score: i64,
}

#[derive(Debug, Deserialize)]
pub struct RatingRequest {
    pub score: i64,
    #[serde(default)]
    pub has_seen: bool,
}

// === Response types ===

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct SeenResponse {
    pub has_seen: bool,
}

#[derive(Debug, Serialize)]
pub struct FavoriteResponse {
    pub is_favorite: bool,
}

#[derive(Debug, Serialize)]
pub struct ClearedResponse {
    pub cleared: u64,
}

fn ok() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".to_string(),
    })
}

fn check_score(score: i64) -> Result<(), ApiError> {
    if ratings::is_valid_score(score) {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!(
            "score must be between {} and {}, got {}",
            ratings::MIN_SCORE,
            ratings::MAX_SCORE,
            score
        )))
    }
}

/// POST /api/dramas/:id/score
pub async fn set_score(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<ScoreRequest>,
) -> ApiResult<Json<StatusResponse>> {
    check_score(body.score)?;
    ratings::set_score(&state.db, &state.guest_guid, id, body.score).await?;
    Ok(ok())
}

/// POST /api/dramas/:id/rating
///
/// Score and seen flag in one write (the detail-page rating form).
pub async fn submit_rating(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<RatingRequest>,
) -> ApiResult<Json<StatusResponse>> {
    check_score(body.score)?;
    ratings::submit_rating(&state.db, &state.guest_guid, id, body.score, body.has_seen).await?;
    Ok(ok())
}

/// POST /api/dramas/:id/seen
pub async fn toggle_seen(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<SeenResponse>> {
    let has_seen = ratings::toggle_seen(&state.db, &state.guest_guid, id).await?;
    Ok(Json(SeenResponse { has_seen }))
}

/// POST /api/dramas/:id/favorite
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<FavoriteResponse>> {
    let is_favorite = ratings::toggle_favorite(&state.db, &state.guest_guid, id).await?;
    Ok(Json(FavoriteResponse { is_favorite }))
}

/// DELETE /api/dramas/:id/rating
///
/// Drops the whole interaction row; a missing row is still a success.
pub async fn reset_interaction(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<StatusResponse>> {
    ratings::reset(&state.db, &state.guest_guid, id).await?;
    Ok(ok())
}

/// DELETE /api/favorites
pub async fn clear_favorites(State(state): State<AppState>) -> ApiResult<Json<ClearedResponse>> {
    let cleared = ratings::clear_favorites(&state.db, &state.guest_guid).await?;
    Ok(Json(ClearedResponse { cleared }))
}

/// DELETE /api/watched
pub async fn clear_watched(State(state): State<AppState>) -> ApiResult<Json<ClearedResponse>> {
    let cleared = ratings::clear_watched(&state.db, &state.guest_guid).await?;
    Ok(Json(ClearedResponse { cleared }))
}

/// DELETE /api/scores
pub async fn clear_scores(State(state): State<AppState>) -> ApiResult<Json<ClearedResponse>> {
    let cleared = ratings::clear_scores(&state.db, &state.guest_guid).await?;
    Ok(Json(ClearedResponse { cleared }))
}

/// Build interaction routes
pub fn interaction_routes() -> Router<AppState> {
    Router::new()
        .route("/api/dramas/:id/score", post(set_score))
        .route(
            "/api/dramas/:id/rating",
            post(submit_rating).delete(reset_interaction),
        )
        .route("/api/dramas/:id/seen", post(toggle_seen))
        .route("/api/dramas/:id/favorite", post(toggle_favorite))
        .route("/api/favorites", delete(clear_favorites))
        .route("/api/watched", delete(clear_watched))
        .route("/api/scores", delete(clear_scores))
}
