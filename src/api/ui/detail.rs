//! Drama detail page - fully server-rendered
//!
//! Renders everything the catalog knows about one title plus the user's
//! interaction panel. `static/detail.js` wires the panel controls.

use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Response};

use crate::db::ratings;
use crate::error::ApiResult;
use crate::models::{DramaDetail, TitleStats};
use crate::services::TmdbError;
use crate::AppState;

use super::layout::{self, esc};

/// GET /drama/:id
///
/// The id arrives as a raw path segment so a non-numeric value renders the
/// HTML 404 page instead of axum's extractor rejection.
pub async fn detail_page(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Response> {
    let id: i64 = match raw_id.parse() {
        Ok(id) => id,
        Err(_) => return Ok(layout::not_found_page("That drama does not exist.")),
    };

    let detail = match state.catalog.find(id).await {
        Ok(detail) => detail,
        Err(TmdbError::NotFound(_)) => {
            return Ok(layout::not_found_page("That drama does not exist."))
        }
        Err(e) => return Err(e.into()),
    };

    let stats = ratings::stats_for(&state.db, &state.guest_guid, &[id])
        .await?
        .into_iter()
        .next()
        .unwrap_or_else(|| TitleStats::empty(id));

    let body = detail_body(&detail, &stats);
    let html = layout::page(
        &esc(&detail.name),
        "/",
        "Asian drama tracker",
        &body,
        Some("/static/detail.js"),
    );
    Ok(Html(html).into_response())
}

fn detail_body(detail: &DramaDetail, stats: &TitleStats) -> String {
    let name = esc(&detail.name);
    let year = detail.year().unwrap_or("");
    let origin = detail
        .origin_country
        .first()
        .map(|c| esc(c))
        .unwrap_or_default();

    let backdrop = match &detail.backdrop_path {
        Some(url) => format!(
            r#"<div class="backdrop" style="background-image: url('{}')"></div>"#,
            esc(url)
        ),
        None => r#"<div class="backdrop backdrop-fallback"></div>"#.to_string(),
    };

    let tmdb_score = (detail.vote_average * 10.0).round() as i64;
    let community = if stats.avg_score > 0.0 {
        format!("{:.1}", stats.avg_score)
    } else {
        "-".to_string()
    };
    let season_word = if detail.number_of_seasons == 1 {
        "Season"
    } else {
        "Seasons"
    };

    let overview = if detail.overview.is_empty() {
        "No overview available.".to_string()
    } else {
        esc(&detail.overview)
    };

    let trailer = match &detail.trailer_key {
        Some(key) => format!(
            r#"            <section class="detail-section">
                <h3>Official Trailer</h3>
                <div class="trailer-frame">
                    <iframe src="https://www.youtube.com/embed/{}?autoplay=0&amp;rel=0" title="Official trailer" allowfullscreen></iframe>
                </div>
            </section>
"#,
            esc(key)
        ),
        None => String::new(),
    };

    let mut cast = String::new();
    for character in &detail.characters {
        let actor = esc(&character.actor_name);
        let role = esc(&character.name);
        let portrait = match &character.profile_path {
            Some(path) => format!(r#"<img src="{}" alt="{actor}">"#, esc(path)),
            None => r#"<div class="cast-placeholder">?</div>"#.to_string(),
        };
        cast.push_str(&format!(
            r#"                    <div class="cast-member">
                        <div class="cast-portrait">{portrait}</div>
                        <p class="cast-actor">{actor}</p>
                        <p class="cast-role">{role}</p>
                    </div>
"#
        ));
    }
    let cast_section = if cast.is_empty() {
        String::new()
    } else {
        format!(
            r#"            <section class="detail-section">
                <h3>Series Cast</h3>
                <div class="cast-grid">
{cast}                </div>
            </section>
"#
        )
    };

    let favorite_class = if stats.is_favorite { " on" } else { "" };
    let favorite_label = if stats.is_favorite {
        "In Favorites"
    } else {
        "Add to Favorites"
    };
    let seen_class = if stats.has_seen { " on" } else { "" };
    let seen_checked = if stats.has_seen { "true" } else { "false" };

    let score = stats.score.unwrap_or(0);
    let mut stars = String::new();
    for n in 1..=10 {
        let filled = if n <= score { " filled" } else { "" };
        stars.push_str(&format!(
            r#"<button class="star{filled}" data-action="score" data-score="{n}" aria-label="Rate {n} stars">&#9733;</button>"#
        ));
    }

    format!(
        r#"        {backdrop}
        <div class="detail-layout" id="detail-root" data-id="{id}" data-name="{name}">
            <div class="detail-poster">
                <img src="{poster}" alt="Poster for {name}">
            </div>
            <div class="detail-main">
                <p class="detail-meta">{year} &bull; {origin}</p>

                <div class="score-row">
                    <div class="score-item">
                        <span class="score-ring score-tmdb">{tmdb_score}%</span>
                        <span class="score-label">TMDB Score</span>
                    </div>
                    <div class="score-item">
                        <span class="score-ring score-community" id="community-avg">&#9733; {community}</span>
                        <span class="score-label">Community</span>
                    </div>
                    <div class="chip">{seasons} {season_word} &bull; {episodes} Episodes</div>
                    <div class="chip" id="seen-count">{seen_count} seen</div>
                </div>

                <section class="detail-section">
                    <h3>Overview</h3>
                    <p class="overview">{overview}</p>
                </section>

{trailer}{cast_section}            </div>
            <aside class="interaction-panel">
                <button class="button favorite-button{favorite_class}" data-action="favorite">&#9829; <span id="favorite-label">{favorite_label}</span></button>
                <div class="control-row">
                    <span class="control-label">Mark as Seen</span>
                    <button class="switch{seen_class}" data-action="seen" role="switch" aria-checked="{seen_checked}"><span class="knob"></span></button>
                </div>
                <div class="control-row">
                    <span class="control-label">Your Rating</span>
                    <div class="star-row">{stars}</div>
                </div>
                <button class="button button-danger" data-action="reset">Reset</button>
            </aside>
        </div>"#,
        id = detail.id,
        poster = esc(&detail.poster_path),
        seasons = detail.number_of_seasons,
        episodes = detail.number_of_episodes,
        seen_count = stats.seen_count,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Character;

    fn sample_detail() -> DramaDetail {
        DramaDetail {
            id: 94796,
            name: "Crash Landing on You".to_string(),
            poster_path: "https://image.tmdb.org/t/p/w500/poster.jpg".to_string(),
            backdrop_path: Some("https://image.tmdb.org/t/p/w1280/backdrop.jpg".to_string()),
            overview: "A paragliding mishap.".to_string(),
            first_air_date: "2019-12-14".to_string(),
            vote_average: 8.7,
            popularity: 123.4,
            origin_country: vec!["KR".to_string()],
            number_of_seasons: 1,
            number_of_episodes: 16,
            characters: vec![Character {
                id: 1,
                name: "Yoon Se-ri".to_string(),
                actor_name: "Son Ye-jin".to_string(),
                profile_path: None,
            }],
            watch_providers: vec!["Netflix".to_string()],
            trailer_key: Some("GVQGWgeVc4k".to_string()),
        }
    }

    #[test]
    fn detail_body_renders_core_fields() {
        let body = detail_body(&sample_detail(), &TitleStats::empty(94796));
        assert!(body.contains("Crash Landing on You"));
        assert!(body.contains("87%"));
        assert!(body.contains("1 Season &bull; 16 Episodes"));
        assert!(body.contains("youtube.com/embed/GVQGWgeVc4k"));
        assert!(body.contains("Series Cast"));
        assert!(body.contains("Son Ye-jin"));
        assert!(body.contains(r#"data-id="94796""#));
    }

    #[test]
    fn detail_body_without_extras_omits_sections() {
        let mut detail = sample_detail();
        detail.trailer_key = None;
        detail.backdrop_path = None;
        detail.characters.clear();
        detail.number_of_seasons = 2;

        let body = detail_body(&detail, &TitleStats::empty(94796));
        assert!(!body.contains("Official Trailer"));
        assert!(!body.contains("Series Cast"));
        assert!(body.contains("backdrop-fallback"));
        assert!(body.contains("2 Seasons"));
    }

    #[test]
    fn detail_body_reflects_interaction_state() {
        let stats = TitleStats {
            tmdb_id: 94796,
            avg_score: 9.0,
            total_ratings: 4,
            seen_count: 7,
            score: Some(9),
            has_seen: true,
            is_favorite: true,
        };
        let body = detail_body(&sample_detail(), &stats);
        assert!(body.contains("In Favorites"));
        assert!(body.contains("&#9733; 9.0"));
        assert!(body.contains("7 seen"));
        assert!(body.contains(r#"aria-checked="true""#));
        assert_eq!(body.matches(r#"class="star filled""#).count(), 9);
    }
}
