//! dramaboard - Asian drama tracker
//!
//! Server-rendered web application for browsing Asian television dramas
//! with per-user ratings, watch history and favorites backed by SQLite.
//! Catalog data comes from TMDB when an API key is configured, otherwise
//! from a built-in sample catalog.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dramaboard::config::{Cli, Config};
use dramaboard::db::{self, settings, users};
use dramaboard::services::TmdbClient;
use dramaboard::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::resolve(&cli)?;

    // Initialize tracing: RUST_LOG wins, then the configured level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting dramaboard v{} ({} {})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_PROFILE")
    );
    info!("Built: {}", env!("BUILD_TIMESTAMP"));

    config.ensure_root_folder()?;
    info!("Root folder: {}", config.root_folder.display());

    let db_path = config.database_path();
    info!("Database: {}", db_path.display());
    let pool = db::init_database(&db_path).await?;

    let guest = users::ensure_guest_user(&pool).await?;
    info!("Guest user: {}", guest.guid);

    // API key: CLI/env/TOML first, persisted for later runs; then the
    // settings table
    let api_key = settings::resolve_tmdb_api_key(&pool, config.tmdb_api_key.clone()).await?;
    if api_key.is_some() {
        info!("TMDB API key configured; serving the live catalog");
    } else {
        warn!("No TMDB API key configured; serving the built-in sample catalog");
    }

    let base_url = match config.site_base_url.clone() {
        Some(url) => url,
        None => settings::get_setting(&pool, settings::SITE_BASE_URL)
            .await?
            .unwrap_or_else(|| format!("http://localhost:{}", config.port)),
    };

    let catalog = TmdbClient::new(api_key)?;
    let state = AppState::new(pool, catalog, guest.guid, base_url);
    let app = dramaboard::build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://localhost:{}/health", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
