//! Shared page chrome for the HTML pages
//!
//! Every page carries the same header (title, nav) and footer (attribution,
//! build identification). Page bodies interpolate TMDB-sourced text, which
//! must pass through [`esc`] before it reaches the template.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

/// Escape text for interpolation into HTML body or attribute context.
pub fn esc(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Top navigation bar. `active` is the href of the current page.
pub fn nav_html(active: &str) -> String {
    let links = [
        ("/", "Board"),
        ("/favorites", "Favorites"),
        ("/watched", "Watched"),
        ("/best", "Best"),
    ];
    let mut out = String::from(r#"<nav class="nav">"#);
    for (href, label) in links {
        let class = if href == active { r#" class="active""# } else { "" };
        out.push_str(&format!(r#"<a href="{href}"{class}>{label}</a>"#));
    }
    out.push_str("</nav>");
    out
}

/// Page footer with attribution and build identification.
pub fn footer_html() -> String {
    let version = env!("CARGO_PKG_VERSION");
    let git_hash = env!("GIT_HASH");
    let build_profile = env!("BUILD_PROFILE");
    let build_timestamp = env!("BUILD_TIMESTAMP");
    let git_short = if git_hash.len() >= 8 {
        &git_hash[..8]
    } else {
        git_hash
    };

    format!(
        r#"<footer>
        <p class="attribution">Powered by TMDB</p>
        <div class="build-info">
            <div class="build-info-line">dramaboard v{version}</div>
            <div class="build-info-line">{git_short} ({build_profile})</div>
            <div class="build-info-line">{build_timestamp}</div>
        </div>
    </footer>"#
    )
}

/// Assemble a full page: shared stylesheet, header with nav, body, footer,
/// optional page script.
pub fn page(title: &str, active: &str, subtitle: &str, body: &str, script: Option<&str>) -> String {
    let nav = nav_html(active);
    let footer = footer_html();
    let script_tag = match script {
        Some(src) => format!(r#"<script src="{src}"></script>"#),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="/static/app.css">
</head>
<body>
    <header>
        <div class="header-content">
            <div class="header-left">
                <h1>{title}</h1>
                <p class="subtitle">{subtitle}</p>
            </div>
            <div class="header-right">
                {nav}
            </div>
        </div>
    </header>
    <div class="content">
{body}
    </div>
    {footer}
    {script_tag}
</body>
</html>"#
    )
}

/// 404 page used when a drama id does not resolve.
pub fn not_found_page(message: &str) -> Response {
    let body = format!(
        r#"        <div class="empty-state">
            <h2>Not found</h2>
            <p>{}</p>
            <a href="/" class="button">Back to the board</a>
        </div>"#,
        esc(message)
    );
    let html = page("DramaBoard", "/", "Asian drama tracker", &body, None);
    (StatusCode::NOT_FOUND, Html(html)).into_response()
}
