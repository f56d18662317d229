//! Board page handler - the main browsing grid
//!
//! The page itself is a static shell; `static/board.js` fetches
//! `/api/dramas` page by page and renders the cards client-side.

use axum::response::{Html, IntoResponse};

use super::layout;

/// GET /
///
/// Drama board with origin, search, actor and sort controls plus an
/// infinite-scroll card grid.
pub async fn board_page() -> impl IntoResponse {
    let body = r#"        <div class="filter-bar">
            <select id="origin-select" aria-label="Filter by origin country">
                <option value="KR">Korean</option>
                <option value="JP">Japanese</option>
                <option value="CN">Chinese</option>
                <option value="all">All origins</option>
            </select>
            <input type="search" id="search-input" placeholder="Search..." aria-label="Search by title">
            <select id="actor-select" aria-label="Filter by actor">
                <option value="">All Actors</option>
            </select>
            <select id="sort-select" aria-label="Sort order">
                <option value="popularity">TMDB Popularity</option>
                <option value="rating-highest">Highest Community Rating</option>
                <option value="rating-lowest">Lowest Community Rating</option>
                <option value="latest">Latest Released</option>
                <option value="oldest">Oldest Released</option>
            </select>
        </div>

        <div class="card-grid" id="board-grid"></div>

        <div class="empty-state hidden" id="board-empty">
            <h2>Nothing here</h2>
            <p>No dramas match your search or filters.</p>
            <button class="button" id="clear-filters">Clear all filters</button>
        </div>

        <div class="status-line" id="board-status"></div>
        <div id="scroll-sentinel"></div>"#;

    let html = layout::page(
        "DramaBoard",
        "/",
        "Asian drama tracker",
        body,
        Some("/static/board.js"),
    );
    Html(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[tokio::test]
    async fn board_page_has_grid_and_controls() {
        let response = board_page().await.into_response();
        assert_eq!(response.status(), axum::http::StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains(r#"id="board-grid""#));
        assert!(html.contains(r#"id="origin-select""#));
        assert!(html.contains(r#"id="scroll-sentinel""#));
        assert!(html.contains("/static/board.js"));
    }
}
