//! Catalog types returned by the drama catalog provider
//!
//! These are the provider-independent shapes the rest of the application works
//! with. Image paths arrive fully resolved to absolute URLs; callers never see
//! raw provider path fragments.

use serde::{Deserialize, Serialize};

/// A cast member attached to a drama card (top billing only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    /// Provider id of the person
    pub id: i64,

    /// Character name as credited
    pub name: String,

    /// Actor's real name
    pub actor_name: String,

    /// Absolute profile image URL, if the provider has one
    pub profile_path: Option<String>,
}

/// A drama as it appears on the board and in saved lists
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drama {
    /// Provider id (stable key for interaction rows)
    pub id: i64,

    pub name: String,

    /// Absolute poster URL (placeholder substituted when the provider has none)
    pub poster_path: String,

    pub overview: String,

    /// First air date as `YYYY-MM-DD`, empty when unknown
    pub first_air_date: String,

    /// Provider-side community vote average (0.0 - 10.0)
    pub vote_average: f64,

    pub popularity: f64,

    /// Top-billed cast (at most two entries on list cards)
    pub characters: Vec<Character>,

    /// Streaming service names available in the configured region
    pub watch_providers: Vec<String>,
}

impl Drama {
    /// Release year for card display, `None` when the air date is missing
    /// or malformed
    pub fn year(&self) -> Option<&str> {
        self.first_air_date.get(..4)
    }
}

/// Full detail-page view of a drama
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DramaDetail {
    pub id: i64,
    pub name: String,
    pub poster_path: String,
    pub overview: String,
    pub first_air_date: String,
    pub vote_average: f64,
    pub popularity: f64,

    /// Absolute backdrop URL, if the provider has one
    pub backdrop_path: Option<String>,

    /// ISO 3166-1 origin country codes
    pub origin_country: Vec<String>,

    pub number_of_seasons: i64,
    pub number_of_episodes: i64,

    /// Full credited cast
    pub characters: Vec<Character>,

    pub watch_providers: Vec<String>,

    /// YouTube key of the first trailer, if any
    pub trailer_key: Option<String>,
}

impl DramaDetail {
    /// Release year, `None` when the air date is missing or malformed
    pub fn year(&self) -> Option<&str> {
        self.first_air_date.get(..4)
    }
}

impl From<DramaDetail> for Drama {
    fn from(detail: DramaDetail) -> Self {
        let mut characters = detail.characters;
        characters.truncate(2);
        Drama {
            id: detail.id,
            name: detail.name,
            poster_path: detail.poster_path,
            overview: detail.overview,
            first_air_date: detail.first_air_date,
            vote_average: detail.vote_average,
            popularity: detail.popularity,
            characters,
            watch_providers: detail.watch_providers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drama(date: &str) -> Drama {
        Drama {
            id: 1,
            name: "Test".to_string(),
            poster_path: "https://example.com/p.jpg".to_string(),
            overview: String::new(),
            first_air_date: date.to_string(),
            vote_average: 0.0,
            popularity: 0.0,
            characters: Vec::new(),
            watch_providers: Vec::new(),
        }
    }

    fn detail(date: &str) -> DramaDetail {
        DramaDetail {
            id: 1,
            name: "Test".to_string(),
            poster_path: String::new(),
            overview: String::new(),
            first_air_date: date.to_string(),
            vote_average: 0.0,
            popularity: 0.0,
            backdrop_path: None,
            origin_country: vec!["KR".to_string()],
            number_of_seasons: 1,
            number_of_episodes: 16,
            characters: Vec::new(),
            watch_providers: Vec::new(),
            trailer_key: None,
        }
    }

    #[test]
    fn test_year_from_air_date() {
        assert_eq!(drama("2019-12-14").year(), Some("2019"));
        assert_eq!(drama("").year(), None);
        assert_eq!(drama("20").year(), None);
    }

    #[test]
    fn test_year_ignores_malformed_air_date() {
        // Byte index 4 of "199é" falls inside the two-byte final character
        assert_eq!(drama("199é").year(), None);
        assert_eq!(detail("199é").year(), None);
        assert_eq!(detail("2016-12-02").year(), Some("2016"));
    }

    #[test]
    fn test_detail_to_card_truncates_cast() {
        let detail = DramaDetail {
            id: 7,
            name: "Test".to_string(),
            poster_path: String::new(),
            overview: String::new(),
            first_air_date: String::new(),
            vote_average: 8.1,
            popularity: 10.0,
            backdrop_path: None,
            origin_country: vec!["KR".to_string()],
            number_of_seasons: 1,
            number_of_episodes: 16,
            characters: (0..5)
                .map(|i| Character {
                    id: i,
                    name: format!("role {}", i),
                    actor_name: format!("actor {}", i),
                    profile_path: None,
                })
                .collect(),
            watch_providers: vec!["Netflix".to_string()],
            trailer_key: None,
        };

        let card: Drama = detail.into();
        assert_eq!(card.characters.len(), 2);
        assert_eq!(card.watch_providers, vec!["Netflix".to_string()]);
    }
}
