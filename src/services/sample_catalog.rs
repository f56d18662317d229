//! Built-in sample catalog
//!
//! Served whenever no TMDB API key is configured: four well-known titles,
//! paged like the real API. Integration tests run against this catalog so
//! they never touch the network. Origin filtering is skipped; the set is too
//! small to slice further.

use crate::models::{Character, Drama, DramaDetail};

/// Titles per page, matching the board's fetch granularity
pub const PAGE_SIZE: usize = 4;

/// The full sample catalog
pub fn all() -> Vec<DramaDetail> {
    vec![
        DramaDetail {
            id: 94796,
            name: "Crash Landing on You".to_string(),
            poster_path: "https://image.tmdb.org/t/p/w600_and_h900_bestv2/6oomDwsUCvS61KEv7kR3ueQNTSO.jpg".to_string(),
            overview: "A paragliding mishap drops a South Korean heiress in North Korea.".to_string(),
            first_air_date: "2019-12-14".to_string(),
            vote_average: 8.8,
            popularity: 250.5,
            backdrop_path: None,
            origin_country: vec!["KR".to_string()],
            number_of_seasons: 1,
            number_of_episodes: 16,
            characters: vec![
                Character {
                    id: 1,
                    name: "Yoon Se-ri".to_string(),
                    actor_name: "Son Ye-jin".to_string(),
                    profile_path: Some("https://image.tmdb.org/t/p/w200/6i8N2D6m4E8YhHaqD9i3InNfX9P.jpg".to_string()),
                },
                Character {
                    id: 2,
                    name: "Ri Jeong-hyeok".to_string(),
                    actor_name: "Hyun Bin".to_string(),
                    profile_path: Some("https://image.tmdb.org/t/p/w200/9y39CH8CH6N2D6m4E8YhHaqD9i3InNfX9P.jpg".to_string()),
                },
            ],
            watch_providers: vec!["Netflix".to_string()],
            trailer_key: None,
        },
        DramaDetail {
            id: 67915,
            name: "Goblin".to_string(),
            poster_path: "https://image.tmdb.org/t/p/w600_and_h900_bestv2/8v0BfNskm7fV0V2V2V2V2V2V2V.jpg".to_string(),
            overview: "In his quest for a bride to break his immortal curse, a 939-year-old guardian of souls meets a bright girl.".to_string(),
            first_air_date: "2016-12-02".to_string(),
            vote_average: 8.7,
            popularity: 180.2,
            backdrop_path: None,
            origin_country: vec!["KR".to_string()],
            number_of_seasons: 1,
            number_of_episodes: 16,
            characters: vec![
                Character {
                    id: 3,
                    name: "Kim Shin".to_string(),
                    actor_name: "Gong Yoo".to_string(),
                    profile_path: Some("https://image.tmdb.org/t/p/w200/6H6N2D6m4E8YhHaqD9i3InNfX9P.jpg".to_string()),
                },
                Character {
                    id: 4,
                    name: "Ji Eun-tak".to_string(),
                    actor_name: "Kim Go-eun".to_string(),
                    profile_path: Some("https://image.tmdb.org/t/p/w200/7H6N2D6m4E8YhHaqD9i3InNfX9P.jpg".to_string()),
                },
            ],
            watch_providers: vec!["Viki".to_string()],
            trailer_key: None,
        },
        DramaDetail {
            id: 110309,
            name: "Alice in Borderland".to_string(),
            poster_path: "https://image.tmdb.org/t/p/w600_and_h900_bestv2/20mC797v9nuVIdO9Ym9as.jpg".to_string(),
            overview: "An obsessive gamer and his friends find themselves in a parallel Tokyo where they must compete in games to survive.".to_string(),
            first_air_date: "2020-12-10".to_string(),
            vote_average: 8.2,
            popularity: 450.8,
            backdrop_path: None,
            origin_country: vec!["JP".to_string()],
            number_of_seasons: 2,
            number_of_episodes: 16,
            characters: vec![
                Character {
                    id: 101,
                    name: "Ryohei Arisu".to_string(),
                    actor_name: "Kento Yamazaki".to_string(),
                    profile_path: None,
                },
                Character {
                    id: 102,
                    name: "Yuzuha Usagi".to_string(),
                    actor_name: "Tao Tsuchiya".to_string(),
                    profile_path: None,
                },
            ],
            watch_providers: vec!["Netflix".to_string()],
            trailer_key: None,
        },
        DramaDetail {
            id: 82505,
            name: "The Untamed".to_string(),
            poster_path: "https://image.tmdb.org/t/p/w600_and_h900_bestv2/7vClS4pYpT76878S978jV0V.jpg".to_string(),
            overview: "Two talented disciples of rival clans form a friendship and work together to solve a series of mysteries.".to_string(),
            first_air_date: "2019-06-27".to_string(),
            vote_average: 8.5,
            popularity: 120.3,
            backdrop_path: None,
            origin_country: vec!["CN".to_string()],
            number_of_seasons: 1,
            number_of_episodes: 50,
            characters: vec![
                Character {
                    id: 201,
                    name: "Wei Wuxian".to_string(),
                    actor_name: "Xiao Zhan".to_string(),
                    profile_path: None,
                },
                Character {
                    id: 202,
                    name: "Lan Wangji".to_string(),
                    actor_name: "Wang Yibo".to_string(),
                    profile_path: None,
                },
            ],
            watch_providers: vec!["Netflix".to_string(), "Viki".to_string()],
            trailer_key: None,
        },
    ]
}

/// One page of sample cards; pages past the catalog come back empty
pub fn discover_page(page: i64) -> Vec<Drama> {
    if page < 1 {
        return Vec::new();
    }

    let start = (page as usize).saturating_sub(1).saturating_mul(PAGE_SIZE);
    all()
        .into_iter()
        .skip(start)
        .take(PAGE_SIZE)
        .map(Drama::from)
        .collect()
}

/// Look up one sample title by id
pub fn find(id: i64) -> Option<DramaDetail> {
    all().into_iter().find(|d| d.id == id)
}
