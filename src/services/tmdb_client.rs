//! TMDB API client
//!
//! The only external collaborator. Discovery proxies `/discover/tv` and
//! enriches every result with top-billed cast and regional streaming
//! providers; detail lookup additionally pulls seasons, full cast and a
//! trailer. Without an API key the client serves the built-in sample
//! catalog instead, which also keeps the integration tests off the network.

use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::models::{Character, Drama, DramaDetail};
use crate::services::sample_catalog;

const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
const USER_AGENT: &str = "dramaboard/0.1.0";

/// Shown when a title has no poster
const PLACEHOLDER_POSTER: &str = "https://www.themoviedb.org/assets/2/v4/glyphicons/basic/glyphicons-basic-38-picture-grey-c2ebdbb057f2a761418593530d7ca200d644d66e552c3a2969911457383a7c67.svg";

/// Streaming availability is looked up for this region
const WATCH_REGION: &str = "AR";

/// TMDB client errors
#[derive(Debug, Error)]
pub enum TmdbError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Drama not found: {0}")]
    NotFound(i64),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

// Wire types. Fields default so a sparse TMDB payload never fails the parse.

#[derive(Debug, Deserialize)]
struct DiscoverResponse {
    #[serde(default)]
    results: Vec<TvSummary>,
}

#[derive(Debug, Deserialize)]
struct TvSummary {
    id: i64,
    #[serde(default)]
    name: String,
    #[serde(default)]
    poster_path: Option<String>,
    #[serde(default)]
    overview: String,
    #[serde(default)]
    first_air_date: String,
    #[serde(default)]
    vote_average: f64,
    #[serde(default)]
    popularity: f64,
}

#[derive(Debug, Deserialize)]
struct TvDetail {
    id: i64,
    #[serde(default)]
    name: String,
    #[serde(default)]
    poster_path: Option<String>,
    #[serde(default)]
    backdrop_path: Option<String>,
    #[serde(default)]
    overview: String,
    #[serde(default)]
    first_air_date: String,
    #[serde(default)]
    vote_average: f64,
    #[serde(default)]
    popularity: f64,
    #[serde(default)]
    origin_country: Vec<String>,
    #[serde(default)]
    number_of_seasons: i64,
    #[serde(default)]
    number_of_episodes: i64,
}

#[derive(Debug, Deserialize)]
struct CreditsResponse {
    #[serde(default)]
    cast: Vec<CastEntry>,
}

#[derive(Debug, Deserialize)]
struct CastEntry {
    id: i64,
    /// Character name as credited
    #[serde(default)]
    character: String,
    /// Actor's real name
    #[serde(default)]
    name: String,
    #[serde(default)]
    profile_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProvidersResponse {
    #[serde(default)]
    results: HashMap<String, RegionProviders>,
}

#[derive(Debug, Deserialize, Default)]
struct RegionProviders {
    #[serde(default)]
    flatrate: Vec<ProviderEntry>,
}

#[derive(Debug, Deserialize)]
struct ProviderEntry {
    provider_name: String,
}

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    results: Vec<VideoEntry>,
}

#[derive(Debug, Deserialize)]
struct VideoEntry {
    #[serde(default)]
    key: String,
    #[serde(default)]
    site: String,
    #[serde(default, rename = "type")]
    kind: String,
}

/// Absolute poster URL (w500), or the placeholder image
pub fn poster_url(path: Option<&str>) -> String {
    match path.filter(|p| !p.is_empty()) {
        Some(p) => format!("{}/w500{}", IMAGE_BASE_URL, p),
        None => PLACEHOLDER_POSTER.to_string(),
    }
}

/// Absolute profile URL (w200); cast without a photo stays `None`
pub fn profile_url(path: Option<&str>) -> Option<String> {
    path.filter(|p| !p.is_empty())
        .map(|p| format!("{}/w200{}", IMAGE_BASE_URL, p))
}

/// Absolute backdrop URL (w1280)
pub fn backdrop_url(path: Option<&str>) -> Option<String> {
    path.filter(|p| !p.is_empty())
        .map(|p| format!("{}/w1280{}", IMAGE_BASE_URL, p))
}

/// First YouTube trailer, falling back to any YouTube video
fn pick_trailer(videos: &[VideoEntry]) -> Option<String> {
    videos
        .iter()
        .find(|v| v.site == "YouTube" && v.kind == "Trailer")
        .or_else(|| videos.iter().find(|v| v.site == "YouTube"))
        .map(|v| v.key.clone())
}

/// TMDB API client
pub struct TmdbClient {
    http_client: reqwest::Client,
    api_key: Option<String>,
}

impl TmdbClient {
    /// Create a client; `None` switches it to the sample catalog
    pub fn new(api_key: Option<String>) -> Result<Self, TmdbError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| TmdbError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// One page of dramas from the given origin, most popular first
    ///
    /// `origin == "all"` drops the origin-country filter. Each result is
    /// enriched concurrently with its two top-billed cast members and the
    /// streaming services carrying it; an enrichment failure degrades that
    /// card to empty lists rather than failing the page.
    pub async fn discover(&self, page: i64, origin: &str) -> Result<Vec<Drama>, TmdbError> {
        let api_key = match &self.api_key {
            Some(key) => key,
            None => return Ok(sample_catalog::discover_page(page)),
        };

        let url = format!("{}/discover/tv", TMDB_BASE_URL);
        let mut params: Vec<(&str, String)> = vec![
            ("api_key", api_key.clone()),
            ("sort_by", "popularity.desc".to_string()),
            ("page", page.to_string()),
        ];
        if origin != "all" {
            params.push(("with_origin_country", origin.to_string()));
        }

        tracing::debug!(page, origin, "Querying TMDB discover");
        let data: DiscoverResponse = self.get_json(&url, &params).await?;

        let cards = futures::future::join_all(
            data.results
                .into_iter()
                .map(|show| self.enrich_card(api_key, show)),
        )
        .await;

        Ok(cards)
    }

    /// Full detail for one title; 404 maps to [`TmdbError::NotFound`]
    pub async fn find(&self, id: i64) -> Result<DramaDetail, TmdbError> {
        let api_key = match &self.api_key {
            Some(key) => key,
            None => return sample_catalog::find(id).ok_or(TmdbError::NotFound(id)),
        };

        tracing::debug!(id, "Querying TMDB detail");
        let detail_url = format!("{}/tv/{}", TMDB_BASE_URL, id);
        let params: Vec<(&str, String)> = vec![("api_key", api_key.clone())];

        let (detail, characters, providers, trailer) = tokio::join!(
            self.get_json::<TvDetail>(&detail_url, &params),
            self.full_cast(api_key, id),
            self.flatrate_providers(api_key, id),
            self.videos(api_key, id),
        );

        let detail = match detail {
            Ok(detail) => detail,
            Err(TmdbError::Api(404, _)) => return Err(TmdbError::NotFound(id)),
            Err(err) => return Err(err),
        };

        // The side lookups degrade; only the main record is load-bearing
        let characters = characters.unwrap_or_else(|err| {
            tracing::warn!(id, error = %err, "TMDB credits lookup failed");
            Vec::new()
        });
        let watch_providers = providers.unwrap_or_else(|err| {
            tracing::warn!(id, error = %err, "TMDB providers lookup failed");
            Vec::new()
        });
        let trailer_key = trailer
            .map(|videos| pick_trailer(&videos))
            .unwrap_or_else(|err| {
                tracing::warn!(id, error = %err, "TMDB videos lookup failed");
                None
            });

        Ok(DramaDetail {
            id: detail.id,
            name: detail.name,
            poster_path: poster_url(detail.poster_path.as_deref()),
            overview: detail.overview,
            first_air_date: detail.first_air_date,
            vote_average: detail.vote_average,
            popularity: detail.popularity,
            backdrop_path: backdrop_url(detail.backdrop_path.as_deref()),
            origin_country: detail.origin_country,
            number_of_seasons: detail.number_of_seasons,
            number_of_episodes: detail.number_of_episodes,
            characters,
            watch_providers,
            trailer_key,
        })
    }

    /// Build one board card, degrading failed enrichment to empty lists
    async fn enrich_card(&self, api_key: &str, show: TvSummary) -> Drama {
        let (cast, providers) = tokio::join!(
            self.full_cast(api_key, show.id),
            self.flatrate_providers(api_key, show.id),
        );

        let mut characters = cast.unwrap_or_else(|err| {
            tracing::warn!(id = show.id, error = %err, "TMDB credits lookup failed");
            Vec::new()
        });
        characters.truncate(2);

        let watch_providers = providers.unwrap_or_else(|err| {
            tracing::warn!(id = show.id, error = %err, "TMDB providers lookup failed");
            Vec::new()
        });

        Drama {
            id: show.id,
            name: show.name,
            poster_path: poster_url(show.poster_path.as_deref()),
            overview: show.overview,
            first_air_date: show.first_air_date,
            vote_average: show.vote_average,
            popularity: show.popularity,
            characters,
            watch_providers,
        }
    }

    async fn full_cast(&self, api_key: &str, id: i64) -> Result<Vec<Character>, TmdbError> {
        let url = format!("{}/tv/{}/credits", TMDB_BASE_URL, id);
        let params: Vec<(&str, String)> = vec![("api_key", api_key.to_string())];
        let data: CreditsResponse = self.get_json(&url, &params).await?;

        Ok(data
            .cast
            .into_iter()
            .map(|c| Character {
                id: c.id,
                name: c.character,
                actor_name: c.name,
                profile_path: profile_url(c.profile_path.as_deref()),
            })
            .collect())
    }

    async fn flatrate_providers(&self, api_key: &str, id: i64) -> Result<Vec<String>, TmdbError> {
        let url = format!("{}/tv/{}/watch/providers", TMDB_BASE_URL, id);
        let params: Vec<(&str, String)> = vec![("api_key", api_key.to_string())];
        let mut data: ProvidersResponse = self.get_json(&url, &params).await?;

        Ok(data
            .results
            .remove(WATCH_REGION)
            .unwrap_or_default()
            .flatrate
            .into_iter()
            .map(|p| p.provider_name)
            .collect())
    }

    async fn videos(&self, api_key: &str, id: i64) -> Result<Vec<VideoEntry>, TmdbError> {
        let url = format!("{}/tv/{}/videos", TMDB_BASE_URL, id);
        let params: Vec<(&str, String)> = vec![("api_key", api_key.to_string())];
        let data: VideosResponse = self.get_json(&url, &params).await?;

        Ok(data.results)
    }

    /// GET with query parameters and a typed JSON response
    ///
    /// The API key travels in `params`, so the full request URL contains it.
    /// Reqwest errors embed that URL; strip it before stringifying so the key
    /// cannot reach a log line.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T, TmdbError> {
        let response = self
            .http_client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| TmdbError::Network(e.without_url().to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TmdbError::Api(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| TmdbError::Parse(e.without_url().to_string()))
    }
}
