//! Server-side drama card renderer for the saved-list pages
//!
//! Markup and class names mirror the client-side template in
//! `static/board.js`; `static/lists.js` wires the controls through the
//! same `data-action` attributes on both.

use crate::models::{Drama, TitleStats};

use super::layout::esc;

/// Render one drama card. `rank` is a zero-based position used by the
/// top-rated page to badge the first three entries.
pub fn render_card(drama: &Drama, stats: &TitleStats, rank: Option<usize>) -> String {
    let name = esc(&drama.name);
    let poster = esc(&drama.poster_path);
    let year = drama.year().unwrap_or("");

    let rank_badge = match rank {
        Some(i) if i < 3 => format!(
            r#"<div class="rank-badge rank-{n}">#{n}</div>"#,
            n = i + 1
        ),
        _ => String::new(),
    };

    let mut badges = String::new();
    if stats.has_seen {
        badges.push_str(r#"<span class="badge badge-watched">Watched</span>"#);
    }
    if stats.seen_count > 0 {
        badges.push_str(&format!(
            r#"<span class="badge badge-seen">{} Seen</span>"#,
            stats.seen_count
        ));
    }
    if let Some(provider) = drama.watch_providers.first() {
        badges.push_str(&format!(
            r#"<span class="badge badge-provider">{}</span>"#,
            esc(provider)
        ));
    }

    let avg_badge = if stats.avg_score > 0.0 {
        format!(
            r#"<div class="avg-badge">&#9733; {:.1}</div>"#,
            stats.avg_score
        )
    } else {
        String::new()
    };

    let heart_class = if stats.is_favorite { " on" } else { "" };
    let heart_label = if stats.is_favorite {
        "Remove from favorites"
    } else {
        "Add to favorites"
    };

    let providers = if drama.watch_providers.is_empty() {
        "Various".to_string()
    } else {
        esc(&drama.watch_providers.join(", "))
    };

    let mut cast = String::new();
    for character in &drama.characters {
        let actor = esc(&character.actor_name);
        match &character.profile_path {
            Some(path) => cast.push_str(&format!(
                r#"<img class="cast-avatar" src="{}" alt="{actor}" title="{actor}">"#,
                esc(path)
            )),
            None => {
                let initial = character.actor_name.chars().next().unwrap_or('?');
                cast.push_str(&format!(
                    r#"<span class="cast-avatar cast-initial" title="{actor}">{}</span>"#,
                    esc(&initial.to_string())
                ));
            }
        }
    }

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
        r#"<article class="drama-card" data-id="{id}" data-name="{name}">
    {rank_badge}
    <div class="poster-wrap">
        <a href="/drama/{id}"><img src="{poster}" alt="Poster for {name}" loading="lazy"></a>
        <div class="badges">{badges}</div>
        {avg_badge}
        <div class="card-actions">
            <button class="icon-btn" data-action="reset" title="Reset all stats for this drama">&#8634;</button>
            <button class="icon-btn heart{heart_class}" data-action="favorite" aria-label="{heart_label}">&#9829;</button>
        </div>
    </div>
    <div class="card-body">
        <a class="card-title" href="/drama/{id}">{name}</a>
        <p class="card-meta">{year} &bull; {providers}</p>
        <div class="cast-row">{cast}</div>
        <div class="card-controls">
            <div class="control-row">
                <span class="control-label">Seen?</span>
                <button class="switch{seen_class}" data-action="seen" role="switch" aria-checked="{seen_checked}"><span class="knob"></span></button>
            </div>
            <div class="control-row">
                <span class="control-label">Rate</span>
                <div class="star-row">{stars}</div>
            </div>
        </div>
    </div>
</article>"#,
        id = drama.id,
    )
}
