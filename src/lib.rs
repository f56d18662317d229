//! dramaboard library interface
//!
//! Exposes the router and state for integration testing.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::services::TmdbClient;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Drama catalog client (TMDB or the built-in sample catalog)
    pub catalog: Arc<TmdbClient>,
    /// Guid of the guest user all interactions are recorded under
    pub guest_guid: String,
    /// Base URL for absolute links (sitemap)
    pub base_url: String,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool, catalog: TmdbClient, guest_guid: String, base_url: String) -> Self {
        Self {
            db,
            catalog: Arc::new(catalog),
            guest_guid,
            base_url,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // UI routes (HTML pages and static assets)
        .merge(api::ui_routes())
        // API routes
        .merge(api::drama_routes())
        .merge(api::stats_routes())
        .merge(api::interaction_routes())
        .merge(api::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // Enable CORS for local access
        .layer(CorsLayer::permissive())
}
