//! Saved-list pages: favorites, watch history, top rated
//!
//! All three share the same shape: ids come from the ratings table, details
//! are fetched from the catalog concurrently, and the result renders as the
//! card grid. A title whose detail lookup fails is dropped from the page
//! rather than failing the whole render.

use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use tracing::warn;

use crate::db::ratings;
use crate::error::ApiResult;
use crate::models::{Drama, DramaDetail, TitleStats};
use crate::services::TmdbClient;
use crate::AppState;

use super::cards::render_card;
use super::layout::{self, esc};

/// Static copy for one saved-list page.
struct ListMeta {
    title: &'static str,
    href: &'static str,
    subtitle: &'static str,
    empty_headline: &'static str,
    empty_hint: &'static str,
    clear_endpoint: &'static str,
    /// Noun used in the clear-all confirmation dialog.
    clear_what: &'static str,
}

const FAVORITES: ListMeta = ListMeta {
    title: "Your Favorites",
    href: "/favorites",
    subtitle: "Dramas you saved for later",
    empty_headline: "No favorites yet",
    empty_hint: "Start exploring and click the heart icon on any drama to save it here for later!",
    clear_endpoint: "/api/favorites",
    clear_what: "favorites",
};

const WATCHED: ListMeta = ListMeta {
    title: "Watched History",
    href: "/watched",
    subtitle: "Everything you marked as seen",
    empty_headline: "No watched dramas yet",
    empty_hint: "Toggle the seen switch on any drama to build your watch history.",
    clear_endpoint: "/api/watched",
    clear_what: "watched",
};

const BEST: ListMeta = ListMeta {
    title: "My Best Gems",
    href: "/best",
    subtitle: "Your highest rated dramas",
    empty_headline: "Finding your gems...",
    empty_hint: "Rate your dramas; anything scored 8 or above lands here.",
    clear_endpoint: "/api/scores",
    clear_what: "ratings",
};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    q: String,
}

/// GET /favorites
pub async fn favorites_page(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Response> {
    let ids = ratings::favorite_ids(&state.db, &state.guest_guid).await?;
    render_list(&state, &FAVORITES, &query.q, ids, false).await
}

/// GET /watched
pub async fn watched_page(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Response> {
    let ids = ratings::watched_ids(&state.db, &state.guest_guid).await?;
    render_list(&state, &WATCHED, &query.q, ids, false).await
}

/// GET /best
///
/// Dramas the user scored at or above the top-rated threshold, best first.
/// The first three carry rank badges.
pub async fn best_page(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Response> {
    let ids: Vec<i64> = ratings::top_rated(&state.db, &state.guest_guid)
        .await?
        .into_iter()
        .map(|(tmdb_id, _score)| tmdb_id)
        .collect();
    render_list(&state, &BEST, &query.q, ids, true).await
}

/// Fetch details for every id, dropping titles the catalog cannot resolve.
/// Order follows `ids`.
async fn fetch_details(catalog: &TmdbClient, ids: &[i64]) -> Vec<DramaDetail> {
    let lookups = ids.iter().map(|&id| catalog.find(id));
    let results = futures::future::join_all(lookups).await;

    let mut details = Vec::with_capacity(ids.len());
    for (id, result) in ids.iter().zip(results) {
        match result {
            Ok(detail) => details.push(detail),
            Err(e) => warn!("Dropping drama {} from list page: {}", id, e),
        }
    }
    details
}

async fn render_list(
    state: &AppState,
    meta: &ListMeta,
    q: &str,
    ids: Vec<i64>,
    ranked: bool,
) -> ApiResult<Response> {
    let saved_count = ids.len();

    // Rank reflects position in the saved list, before any search narrowing.
    let details = fetch_details(&state.catalog, &ids).await;
    let needle = q.trim().to_lowercase();
    let dramas: Vec<(usize, Drama)> = details
        .into_iter()
        .map(Drama::from)
        .enumerate()
        .filter(|(_, d)| needle.is_empty() || d.name.to_lowercase().contains(&needle))
        .collect();

    let visible_ids: Vec<i64> = dramas.iter().map(|(_, d)| d.id).collect();
    let stats = ratings::stats_for(&state.db, &state.guest_guid, &visible_ids).await?;

    let body = list_body(meta, q, saved_count, &dramas, &stats, ranked);
    let html = layout::page(meta.title, meta.href, meta.subtitle, &body, Some("/static/lists.js"));
    Ok(Html(html).into_response())
}

fn list_body(
    meta: &ListMeta,
    q: &str,
    saved_count: usize,
    dramas: &[(usize, Drama)],
    stats: &[TitleStats],
    ranked: bool,
) -> String {
    let mut body = String::new();

    if saved_count > 0 {
        body.push_str(&format!(
            r#"        <div class="list-toolbar">
            <input type="search" id="list-search" placeholder="Search..." value="{}" aria-label="Search this list">
            <button class="button button-danger" id="clear-all" data-endpoint="{}" data-what="{}">Clear All</button>
        </div>
"#,
            esc(q),
            meta.clear_endpoint,
            meta.clear_what,
        ));
    }

    if dramas.is_empty() {
        if saved_count == 0 {
            body.push_str(&format!(
                r#"        <div class="empty-state">
            <h2>{}</h2>
            <p>{}</p>
            <a href="/" class="button">Explore Dramas</a>
        </div>"#,
                meta.empty_headline, meta.empty_hint,
            ));
        } else {
            body.push_str(
                r#"        <div class="empty-state">
            <h2>Nothing here</h2>
            <p>No dramas match your search.</p>
        </div>"#,
            );
        }
        return body;
    }

    body.push_str(r#"        <div class="card-grid">"#);
    body.push('\n');
    for ((position, drama), title_stats) in dramas.iter().zip(stats) {
        let rank = if ranked { Some(*position) } else { None };
        body.push_str(&render_card(drama, title_stats, rank));
        body.push('\n');
    }
    body.push_str("        </div>");
    body
}
