//! Sitemap endpoint
//!
//! Lists the four stable pages. Drama detail pages are not enumerated; the
//! catalog is paged and changes daily upstream.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{NaiveDate, Utc};

use crate::AppState;

const PAGES: [(&str, &str); 4] = [
    ("/", "1.0"),
    ("/favorites", "0.8"),
    ("/watched", "0.8"),
    ("/best", "0.8"),
];

/// GET /sitemap.xml
pub async fn sitemap_xml(State(state): State<AppState>) -> Response {
    let xml = render_sitemap(&state.base_url, Utc::now().date_naive());
    (
        StatusCode::OK,
        [("content-type", "application/xml; charset=utf-8")],
        xml,
    )
        .into_response()
}

fn render_sitemap(base_url: &str, today: NaiveDate) -> String {
    let base = base_url.trim_end_matches('/');
    let lastmod = today.format("%Y-%m-%d");

    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
"#,
    );
    for (path, priority) in PAGES {
        xml.push_str(&format!(
            "    <url>\n        <loc>{base}{path}</loc>\n        <lastmod>{lastmod}</lastmod>\n        <changefreq>daily</changefreq>\n        <priority>{priority}</priority>\n    </url>\n"
        ));
    }
    xml.push_str("</urlset>\n");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sitemap_lists_stable_pages() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 21).unwrap();
        let xml = render_sitemap("http://localhost:5740", date);
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains("<loc>http://localhost:5740/</loc>"));
        assert!(xml.contains("<loc>http://localhost:5740/favorites</loc>"));
        assert!(xml.contains("<loc>http://localhost:5740/watched</loc>"));
        assert!(xml.contains("<loc>http://localhost:5740/best</loc>"));
        assert!(xml.contains("<lastmod>2026-08-21</lastmod>"));
        assert_eq!(xml.matches("<changefreq>daily</changefreq>").count(), 4);
    }

    #[test]
    fn sitemap_trims_trailing_slash_from_base() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 21).unwrap();
        let xml = render_sitemap("https://dramas.example.com/", date);
        assert!(xml.contains("<loc>https://dramas.example.com/favorites</loc>"));
        assert!(!xml.contains(".com//"));
    }
}
