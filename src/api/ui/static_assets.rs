//! Static asset handlers for the dramaboard UI
//!
//! Embeds and serves CSS/JS files at compile time

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

const APP_CSS: &str = include_str!("../../../static/app.css");
const BOARD_JS: &str = include_str!("../../../static/board.js");
const DETAIL_JS: &str = include_str!("../../../static/detail.js");
const LISTS_JS: &str = include_str!("../../../static/lists.js");

/// GET /static/app.css
///
/// Serves the shared stylesheet
pub async fn serve_app_css() -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", "text/css"),
            ("cache-control", "no-cache, no-store, must-revalidate"),
        ],
        APP_CSS,
    )
        .into_response()
}

/// GET /static/board.js
///
/// Serves the board page JavaScript
pub async fn serve_board_js() -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", "application/javascript"),
            ("cache-control", "no-cache, no-store, must-revalidate"),
        ],
        BOARD_JS,
    )
        .into_response()
}

/// GET /static/detail.js
///
/// Serves the detail page JavaScript
pub async fn serve_detail_js() -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", "application/javascript"),
            ("cache-control", "no-cache, no-store, must-revalidate"),
        ],
        DETAIL_JS,
    )
        .into_response()
}

/// GET /static/lists.js
///
/// Serves the saved-list pages JavaScript
pub async fn serve_lists_js() -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", "application/javascript"),
            ("cache-control", "no-cache, no-store, must-revalidate"),
        ],
        LISTS_JS,
    )
        .into_response()
}
