//! Settings table access
//!
//! Key/value runtime settings. Used as the lowest-priority source for the
//! TMDB API key and the sitemap base URL; a key handed in through bootstrap
//! configuration is persisted here so later keyless runs keep it.

use sqlx::SqlitePool;

use crate::config::is_valid_key;

/// Setting key for the TMDB API key
pub const TMDB_API_KEY: &str = "tmdb_api_key";

/// Setting key for the absolute base URL used in the sitemap
pub const SITE_BASE_URL: &str = "site_base_url";

/// Resolve the TMDB API key at startup
///
/// A configured key wins and is stored, so the next run keeps the live
/// catalog without the flag; without one, fall back to the stored value.
pub async fn resolve_tmdb_api_key(
    pool: &SqlitePool,
    configured: Option<String>,
) -> Result<Option<String>, sqlx::Error> {
    if let Some(key) = configured.filter(|key| is_valid_key(key)) {
        set_setting(pool, TMDB_API_KEY, &key).await?;
        return Ok(Some(key));
    }

    Ok(get_setting(pool, TMDB_API_KEY)
        .await?
        .filter(|key| is_valid_key(key)))
}

pub async fn get_setting(pool: &SqlitePool, key: &str) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await
}

pub async fn set_setting(pool: &SqlitePool, key: &str, value: &str) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO settings (key, value, updated_at) VALUES (?, ?, ?)
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(key)
    .bind(value)
    .bind(chrono::Utc::now().to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}
