//! UI Routes - HTML pages for the dramaboard web interface
//!
//! Vanilla ES6+ JavaScript, no frameworks. Pages share the chrome in
//! `layout` and the card markup in `cards`:
//!
//! - **Board** (`board`): browsing grid, hydrated client-side from the JSON API
//! - **Detail** (`detail`): one drama, fully server-rendered
//! - **Saved lists** (`lists`): favorites, watch history, top rated
//! - **Sitemap** (`sitemap`): the four stable pages
//! - **Static Assets** (`static_assets`): CSS/JS file serving

use axum::{routing::get, Router};

use crate::AppState;

mod board;
mod cards;
mod detail;
mod layout;
mod lists;
mod sitemap;
mod static_assets;

use board::board_page;
use detail::detail_page;
use lists::{best_page, favorites_page, watched_page};
use sitemap::sitemap_xml;
use static_assets::{serve_app_css, serve_board_js, serve_detail_js, serve_lists_js};

/// Build the UI router with all page and static asset routes
pub fn ui_routes() -> Router<AppState> {
    Router::new()
        // Pages
        .route("/", get(board_page))
        .route("/drama/:id", get(detail_page))
        .route("/favorites", get(favorites_page))
        .route("/watched", get(watched_page))
        .route("/best", get(best_page))
        .route("/sitemap.xml", get(sitemap_xml))
        // Static assets
        .route("/static/app.css", get(serve_app_css))
        .route("/static/board.js", get(serve_board_js))
        .route("/static/detail.js", get(serve_detail_js))
        .route("/static/lists.js", get(serve_lists_js))
}
