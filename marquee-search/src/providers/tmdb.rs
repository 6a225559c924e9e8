//! TMDB provider for production use.

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use marquee_core::config::ApiConfig;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::MovieProvider;
use crate::errors::CatalogError;
use crate::types::{
    MovieDetails, MovieId, MovieSummary, ResultPage, TimeWindow, sanitize_vote_average,
};

/// TMDB v3 provider.
///
/// Every request carries the configured bearer credential and language, and
/// is bounded by the configured timeout so a hung request fails instead of
/// leaving a listing loading forever.
#[derive(Debug, Clone)]
pub struct TmdbProvider {
    client: reqwest::Client,
    base_url: String,
    bearer_token: String,
    language: String,
    discover_release_year: Option<u16>,
}

/// Paged list payload shared by discover, search and trending.
#[derive(Debug, Deserialize)]
struct TmdbListResponse {
    #[serde(default)]
    results: Vec<TmdbMovie>,
    total_pages: Option<u32>,
}

/// Movie record as found in list payloads.
#[derive(Debug, Deserialize)]
struct TmdbMovie {
    id: Option<u64>,
    title: Option<String>,
    release_date: Option<String>,
    vote_average: Option<f64>,
    vote_count: Option<u64>,
    poster_path: Option<String>,
    original_language: Option<String>,
    overview: Option<String>,
}

/// Payload of the `/movie/{id}` endpoint.
#[derive(Debug, Deserialize)]
struct TmdbMovieDetails {
    id: u64,
    title: Option<String>,
    tagline: Option<String>,
    overview: Option<String>,
    release_date: Option<String>,
    runtime: Option<u32>,
    #[serde(default)]
    genres: Vec<TmdbGenre>,
    vote_average: Option<f64>,
    vote_count: Option<u64>,
    poster_path: Option<String>,
    original_language: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbGenre {
    name: String,
}

impl TmdbMovie {
    /// Converts the loosely-typed record; records without an id are dropped.
    fn into_summary(self) -> Option<MovieSummary> {
        let id = self.id?;
        Some(MovieSummary {
            id: MovieId(id),
            title: self.title.unwrap_or_default(),
            release_year: self.release_date.as_deref().and_then(parse_release_year),
            vote_average: self.vote_average.and_then(sanitize_vote_average),
            vote_count: self.vote_count,
            poster_path: non_empty(self.poster_path),
            original_language: non_empty(self.original_language),
            overview: non_empty(self.overview),
        })
    }
}

impl From<TmdbMovieDetails> for MovieDetails {
    fn from(details: TmdbMovieDetails) -> Self {
        Self {
            id: MovieId(details.id),
            title: details.title.unwrap_or_default(),
            tagline: non_empty(details.tagline),
            overview: non_empty(details.overview),
            release_year: details.release_date.as_deref().and_then(parse_release_year),
            runtime_minutes: details.runtime.filter(|minutes| *minutes > 0),
            genres: details.genres.into_iter().map(|genre| genre.name).collect(),
            vote_average: details.vote_average.and_then(sanitize_vote_average),
            vote_count: details.vote_count,
            poster_path: non_empty(details.poster_path),
            original_language: non_empty(details.original_language),
        }
    }
}

impl TmdbProvider {
    /// Create a provider from API configuration.
    ///
    /// # Errors
    ///
    /// - `CatalogError::MissingCredential` - No bearer token configured
    /// - `CatalogError::Network` - HTTP client could not be constructed
    pub fn from_config(config: &ApiConfig) -> Result<Self, CatalogError> {
        let bearer_token = config
            .bearer_token
            .clone()
            .filter(|token| !token.trim().is_empty())
            .ok_or(CatalogError::MissingCredential)?;

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| CatalogError::Network {
                reason: format!("HTTP client setup failed: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bearer_token,
            language: config.language.clone(),
            discover_release_year: config.discover_release_year,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Query parameters of the discover feed.
    fn discover_params(&self, page: u32) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("include_adult", "false".to_string()),
            ("include_video", "false".to_string()),
            ("language", self.language.clone()),
            ("page", page.to_string()),
            ("sort_by", "popularity.desc".to_string()),
        ];

        if let Some(year) = self.discover_release_year {
            params.push(("primary_release_year", year.to_string()));
        }

        params
    }

    /// Query parameters of a title search.
    fn search_params(&self, term: &str, page: u32) -> Vec<(&'static str, String)> {
        vec![
            ("query", term.to_string()),
            ("include_adult", "false".to_string()),
            ("language", self.language.clone()),
            ("page", page.to_string()),
        ]
    }

    async fn get_body(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<String, CatalogError> {
        let url = self.endpoint(path);
        tracing::trace!(%url, "TMDB request");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(params)
            .send()
            .await
            .map_err(|e| CatalogError::Network {
                reason: if e.is_timeout() {
                    format!("TMDB request timed out: {url}")
                } else {
                    format!("TMDB request failed: {e}")
                },
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::HttpStatus {
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| CatalogError::Network {
            reason: format!("TMDB body read failed: {e}"),
        })
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, CatalogError> {
    serde_json::from_str(body).map_err(|e| CatalogError::Parse {
        reason: format!("TMDB JSON parsing failed: {e}"),
    })
}

/// Decodes a paged list payload into a committed page shape.
fn parse_listing(body: &str, requested_page: u32) -> Result<ResultPage, CatalogError> {
    let response: TmdbListResponse = decode(body)?;
    Ok(into_result_page(response, requested_page))
}

fn into_result_page(response: TmdbListResponse, requested_page: u32) -> ResultPage {
    let items = response
        .results
        .into_iter()
        .filter_map(TmdbMovie::into_summary)
        .collect();
    ResultPage::new(items, response.total_pages, requested_page)
}

/// Extracts the year of a `YYYY-MM-DD` release date; blank dates yield `None`.
fn parse_release_year(date: &str) -> Option<i32> {
    let date = date.trim();
    if let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(parsed.year());
    }

    let year = date.split('-').next()?;
    if year.len() == 4 {
        year.parse().ok()
    } else {
        None
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[async_trait]
impl MovieProvider for TmdbProvider {
    async fn discover(&self, page: u32) -> Result<ResultPage, CatalogError> {
        let body = self.get_body("discover/movie", &self.discover_params(page)).await?;
        parse_listing(&body, page)
    }

    async fn search(&self, term: &str, page: u32) -> Result<ResultPage, CatalogError> {
        let body = self.get_body("search/movie", &self.search_params(term, page)).await?;
        parse_listing(&body, page)
    }

    async fn trending(&self, window: TimeWindow) -> Result<Vec<MovieSummary>, CatalogError> {
        let path = format!("trending/movie/{}", window.as_str());
        let params = [("language", self.language.clone())];
        let response: TmdbListResponse = decode(&self.get_body(&path, &params).await?)?;
        Ok(response
            .results
            .into_iter()
            .filter_map(TmdbMovie::into_summary)
            .collect())
    }

    async fn movie_details(&self, id: MovieId) -> Result<MovieDetails, CatalogError> {
        let path = format!("movie/{id}");
        let params = [("language", self.language.clone())];
        match self.get_body(&path, &params).await {
            Ok(body) => decode::<TmdbMovieDetails>(&body).map(MovieDetails::from),
            Err(CatalogError::HttpStatus { status: 404 }) => Err(CatalogError::NotFound { id }),
            Err(e) => Err(e),
        }
    }
}
