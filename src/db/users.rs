//! User table access
//!
//! The application runs with a single shared guest account today. It is
//! created on first startup and looked up by username afterwards, so the
//! GUID survives restarts.

use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::models::User;

/// Username of the built-in shared account
pub const GUEST_USERNAME: &str = "guest_user";

pub async fn find_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    let row = sqlx::query("SELECT guid, username FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| User {
        guid: row.get("guid"),
        username: row.get("username"),
    }))
}

/// Find the guest user, creating it if this is the first run
pub async fn ensure_guest_user(pool: &SqlitePool) -> Result<User, sqlx::Error> {
    if let Some(user) = find_by_username(pool, GUEST_USERNAME).await? {
        return Ok(user);
    }

    let user = User {
        guid: Uuid::new_v4().to_string(),
        username: GUEST_USERNAME.to_string(),
    };

    // INSERT OR IGNORE: two concurrent first-runs must not race into an error
    sqlx::query("INSERT OR IGNORE INTO users (guid, username, created_at) VALUES (?, ?, ?)")
        .bind(&user.guid)
        .bind(&user.username)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(pool)
        .await?;

    // Re-read in case the insert was ignored
    match find_by_username(pool, GUEST_USERNAME).await? {
        Some(user) => Ok(user),
        None => Err(sqlx::Error::RowNotFound),
    }
}
