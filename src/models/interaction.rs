//! Per-user interaction types

use serde::{Deserialize, Serialize};

/// An application user
///
/// Only the shared guest account exists today; the table is keyed by GUID so
/// real accounts can be added without a schema change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub guid: String,
    pub username: String,
}

/// Community and personal interaction state for one title
///
/// One entry per requested title, in request order, zeroed when nobody has
/// interacted with the title yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleStats {
    pub tmdb_id: i64,

    /// Mean of all submitted scores (unrated rows excluded), 0.0 when none
    pub avg_score: f64,

    /// Number of users who submitted a score
    pub total_ratings: i64,

    /// Number of users who marked the title as seen
    pub seen_count: i64,

    /// Requesting user's score, `None` when unrated
    pub score: Option<i64>,

    pub has_seen: bool,

    pub is_favorite: bool,
}

impl TitleStats {
    /// Zeroed stats for a title with no interaction rows
    pub fn empty(tmdb_id: i64) -> Self {
        TitleStats {
            tmdb_id,
            avg_score: 0.0,
            total_ratings: 0,
            seen_count: 0,
            score: None,
            has_seen: false,
            is_favorite: false,
        }
    }
}
