//! Rating table access
//!
//! One row per (user, title) carries all three interaction dimensions: an
//! optional 1-10 score, a seen flag and a favorite flag. Rows are created
//! lazily by whichever interaction happens first and deleted again when no
//! dimension is set, so the table only holds titles somebody actually
//! touched.

use std::collections::HashMap;

use sqlx::{Row, SqlitePool};

use crate::models::TitleStats;

/// Lowest accepted score
pub const MIN_SCORE: i64 = 1;

/// Highest accepted score
pub const MAX_SCORE: i64 = 10;

/// Scores at or above this qualify for the top-rated list
pub const TOP_RATED_THRESHOLD: i64 = 8;

/// Check score bounds before touching the database
pub fn is_valid_score(score: i64) -> bool {
    (MIN_SCORE..=MAX_SCORE).contains(&score)
}

/// One interaction row
#[derive(Debug, Clone)]
pub struct RatingRow {
    pub user_guid: String,
    pub tmdb_id: i64,
    pub score: Option<i64>,
    pub has_seen: bool,
    pub is_favorite: bool,
    pub created_at: String,
    pub updated_at: String,
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

pub async fn get(
    pool: &SqlitePool,
    user_guid: &str,
    tmdb_id: i64,
) -> Result<Option<RatingRow>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT user_guid, tmdb_id, score, has_seen, is_favorite, created_at, updated_at
        FROM ratings
        WHERE user_guid = ? AND tmdb_id = ?
        "#,
    )
    .bind(user_guid)
    .bind(tmdb_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| RatingRow {
        user_guid: row.get("user_guid"),
        tmdb_id: row.get("tmdb_id"),
        score: row.get("score"),
        has_seen: row.get("has_seen"),
        is_favorite: row.get("is_favorite"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }))
}

/// Set the user's score for a title, creating the row if needed
///
/// Other dimensions are untouched on existing rows. Callers validate the
/// score range first.
pub async fn set_score(
    pool: &SqlitePool,
    user_guid: &str,
    tmdb_id: i64,
    score: i64,
) -> Result<(), sqlx::Error> {
    let ts = now();
    sqlx::query(
        r#"
        INSERT INTO ratings (user_guid, tmdb_id, score, has_seen, is_favorite, created_at, updated_at)
        VALUES (?, ?, ?, 0, 0, ?, ?)
        ON CONFLICT(user_guid, tmdb_id) DO UPDATE SET
            score = excluded.score,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(user_guid)
    .bind(tmdb_id)
    .bind(score)
    .bind(&ts)
    .bind(&ts)
    .execute(pool)
    .await?;

    Ok(())
}

/// Set score and seen flag in one write (the detail-page rating form)
pub async fn submit_rating(
    pool: &SqlitePool,
    user_guid: &str,
    tmdb_id: i64,
    score: i64,
    has_seen: bool,
) -> Result<(), sqlx::Error> {
    let ts = now();
    sqlx::query(
        r#"
        INSERT INTO ratings (user_guid, tmdb_id, score, has_seen, is_favorite, created_at, updated_at)
        VALUES (?, ?, ?, ?, 0, ?, ?)
        ON CONFLICT(user_guid, tmdb_id) DO UPDATE SET
            score = excluded.score,
            has_seen = excluded.has_seen,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(user_guid)
    .bind(tmdb_id)
    .bind(score)
    .bind(has_seen)
    .bind(&ts)
    .bind(&ts)
    .execute(pool)
    .await?;

    Ok(())
}

/// Flip the seen flag, creating the row as seen on first use
///
/// Returns the new flag value.
pub async fn toggle_seen(
    pool: &SqlitePool,
    user_guid: &str,
    tmdb_id: i64,
) -> Result<bool, sqlx::Error> {
    let ts = now();
    sqlx::query(
        r#"
        INSERT INTO ratings (user_guid, tmdb_id, score, has_seen, is_favorite, created_at, updated_at)
        VALUES (?, ?, NULL, 1, 0, ?, ?)
        ON CONFLICT(user_guid, tmdb_id) DO UPDATE SET
            has_seen = 1 - has_seen,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(user_guid)
    .bind(tmdb_id)
    .bind(&ts)
    .bind(&ts)
    .execute(pool)
    .await?;

    let has_seen: bool =
        sqlx::query_scalar("SELECT has_seen FROM ratings WHERE user_guid = ? AND tmdb_id = ?")
            .bind(user_guid)
            .bind(tmdb_id)
            .fetch_one(pool)
            .await?;

    Ok(has_seen)
}

/// Flip the favorite flag, creating the row as favorited on first use
///
/// Returns the new flag value.
pub async fn toggle_favorite(
    pool: &SqlitePool,
    user_guid: &str,
    tmdb_id: i64,
) -> Result<bool, sqlx::Error> {
    let ts = now();
    sqlx::query(
        r#"
        INSERT INTO ratings (user_guid, tmdb_id, score, has_seen, is_favorite, created_at, updated_at)
        VALUES (?, ?, NULL, 0, 1, ?, ?)
        ON CONFLICT(user_guid, tmdb_id) DO UPDATE SET
            is_favorite = 1 - is_favorite,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(user_guid)
    .bind(tmdb_id)
    .bind(&ts)
    .bind(&ts)
    .execute(pool)
    .await?;

    let is_favorite: bool =
        sqlx::query_scalar("SELECT is_favorite FROM ratings WHERE user_guid = ? AND tmdb_id = ?")
            .bind(user_guid)
            .bind(tmdb_id)
            .fetch_one(pool)
            .await?;

    Ok(is_favorite)
}

/// Drop the user's row for a title; absent rows are a no-op
pub async fn reset(pool: &SqlitePool, user_guid: &str, tmdb_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM ratings WHERE user_guid = ? AND tmdb_id = ?")
        .bind(user_guid)
        .bind(tmdb_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Community aggregates plus the requesting user's state, one entry per
/// requested title in request order
///
/// Titles nobody interacted with come back zeroed. An empty id list returns
/// an empty vec without touching the database.
pub async fn stats_for(
    pool: &SqlitePool,
    user_guid: &str,
    ids: &[i64],
) -> Result<Vec<TitleStats>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; ids.len()].join(", ");

    // AVG/COUNT over score skip NULLs, which is exactly the unrated semantics
    let community_sql = format!(
        r#"
        SELECT tmdb_id,
               AVG(score) AS avg_score,
               COUNT(score) AS total_ratings,
               SUM(has_seen) AS seen_count
        FROM ratings
        WHERE tmdb_id IN ({})
        GROUP BY tmdb_id
        "#,
        placeholders
    );

    let mut community_query = sqlx::query(&community_sql);
    for id in ids {
        community_query = community_query.bind(id);
    }

    let mut community: HashMap<i64, (f64, i64, i64)> = HashMap::new();
    for row in community_query.fetch_all(pool).await? {
        let tmdb_id: i64 = row.get("tmdb_id");
        let avg_score: Option<f64> = row.get("avg_score");
        let total_ratings: i64 = row.get("total_ratings");
        let seen_count: Option<i64> = row.get("seen_count");
        community.insert(
            tmdb_id,
            (
                avg_score.unwrap_or(0.0),
                total_ratings,
                seen_count.unwrap_or(0),
            ),
        );
    }

    let user_sql = format!(
        r#"
        SELECT tmdb_id, score, has_seen, is_favorite
        FROM ratings
        WHERE user_guid = ? AND tmdb_id IN ({})
        "#,
        placeholders
    );

    let mut user_query = sqlx::query(&user_sql).bind(user_guid);
    for id in ids {
        user_query = user_query.bind(id);
    }

    let mut own: HashMap<i64, (Option<i64>, bool, bool)> = HashMap::new();
    for row in user_query.fetch_all(pool).await? {
        let tmdb_id: i64 = row.get("tmdb_id");
        own.insert(
            tmdb_id,
            (
                row.get("score"),
                row.get("has_seen"),
                row.get("is_favorite"),
            ),
        );
    }

    Ok(ids
        .iter()
        .map(|&tmdb_id| {
            let mut stats = TitleStats::empty(tmdb_id);
            if let Some(&(avg_score, total_ratings, seen_count)) = community.get(&tmdb_id) {
                stats.avg_score = avg_score;
                stats.total_ratings = total_ratings;
                stats.seen_count = seen_count;
            }
            if let Some(&(score, has_seen, is_favorite)) = own.get(&tmdb_id) {
                stats.score = score;
                stats.has_seen = has_seen;
                stats.is_favorite = is_favorite;
            }
            stats
        })
        .collect())
}

/// Title ids the user favorited, most recently updated first
pub async fn favorite_ids(pool: &SqlitePool, user_guid: &str) -> Result<Vec<i64>, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        SELECT tmdb_id FROM ratings
        WHERE user_guid = ? AND is_favorite = 1
        ORDER BY updated_at DESC
        "#,
    )
    .bind(user_guid)
    .fetch_all(pool)
    .await
}

/// Title ids the user marked as seen, most recently updated first
pub async fn watched_ids(pool: &SqlitePool, user_guid: &str) -> Result<Vec<i64>, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        SELECT tmdb_id FROM ratings
        WHERE user_guid = ? AND has_seen = 1
        ORDER BY updated_at DESC
        "#,
    )
    .bind(user_guid)
    .fetch_all(pool)
    .await
}

/// (tmdb_id, score) pairs the user scored at or above the top-rated
/// threshold, best first, recency breaking ties
pub async fn top_rated(pool: &SqlitePool, user_guid: &str) -> Result<Vec<(i64, i64)>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT tmdb_id, score FROM ratings
        WHERE user_guid = ? AND score >= ?
        ORDER BY score DESC, updated_at DESC
        "#,
    )
    .bind(user_guid)
    .bind(TOP_RATED_THRESHOLD)
    .fetch_all(pool)
    .await
}

/// Unfavorite everything; returns how many rows were favorites
pub async fn clear_favorites(pool: &SqlitePool, user_guid: &str) -> Result<u64, sqlx::Error> {
    // Bulk clears leave updated_at alone; they are not interactions
    let result =
        sqlx::query("UPDATE ratings SET is_favorite = 0 WHERE user_guid = ? AND is_favorite = 1")
            .bind(user_guid)
            .execute(pool)
            .await?;

    prune_empty(pool, user_guid).await?;

    Ok(result.rows_affected())
}

/// Unmark everything seen; returns how many rows were seen
pub async fn clear_watched(pool: &SqlitePool, user_guid: &str) -> Result<u64, sqlx::Error> {
    let result =
        sqlx::query("UPDATE ratings SET has_seen = 0 WHERE user_guid = ? AND has_seen = 1")
            .bind(user_guid)
            .execute(pool)
            .await?;

    prune_empty(pool, user_guid).await?;

    Ok(result.rows_affected())
}

/// Drop all scores; returns how many rows had one
pub async fn clear_scores(pool: &SqlitePool, user_guid: &str) -> Result<u64, sqlx::Error> {
    let result =
        sqlx::query("UPDATE ratings SET score = NULL WHERE user_guid = ? AND score IS NOT NULL")
            .bind(user_guid)
            .execute(pool)
            .await?;

    prune_empty(pool, user_guid).await?;

    Ok(result.rows_affected())
}

/// Delete rows left with no interaction in any dimension
async fn prune_empty(pool: &SqlitePool, user_guid: &str) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        DELETE FROM ratings
        WHERE user_guid = ? AND score IS NULL AND has_seen = 0 AND is_favorite = 0
        "#,
    )
    .bind(user_guid)
    .execute(pool)
    .await?;

    Ok(())
}
