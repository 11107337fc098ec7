//! TMDB (The Movie Database) catalog client
//!
//! Provides popular listings, movie search, movie details and poster URLs.
//! API docs: https://developer.themoviedb.org/docs

use anyhow::Result;
use reqwest::StatusCode;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{Config, ConfigError, DEFAULT_BASE_URL, DEFAULT_IMAGE_BASE_URL};
use crate::models::{Movie, MovieResponse};

/// Keys at least this long are v4 read access tokens (sent as Bearer)
const BEARER_TOKEN_MIN_LEN: usize = 64;
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// TMDB API error types
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Resource not found (404)")]
    NotFound,

    #[error("Rate limited (429), retries exhausted")]
    RateLimited,

    #[error("Server error: {0}")]
    ServerError(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

/// Poster/backdrop sizes offered by the image CDN
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageSize {
    W300,
    #[default]
    W500,
    Original,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::W300 => "w300",
            ImageSize::W500 => "w500",
            ImageSize::Original => "original",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the key is presented to TMDB
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthMode {
    /// v3 key as `api_key` query parameter
    QueryKey,
    /// v4 token as `Authorization: Bearer`
    Bearer,
}

impl AuthMode {
    fn for_key(key: &str) -> Self {
        if key.len() >= BEARER_TOKEN_MIN_LEN {
            AuthMode::Bearer
        } else {
            AuthMode::QueryKey
        }
    }
}

/// TMDB catalog client
#[derive(Debug, Clone)]
pub struct CatalogClient {
    api_key: String,
    base_url: String,
    image_base_url: String,
    client: reqwest::Client,
    max_retries: u32,
}

impl CatalogClient {
    /// Create a client with the given API key and default endpoints
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
            max_retries: 3,
        }
    }

    /// Create a client from application config
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let client = Self::with_base_url(config.api_key()?, &config.base_url)
            .with_image_base_url(&config.image_base_url);
        Ok(client)
    }

    /// Override the image CDN base URL
    pub fn with_image_base_url(mut self, url: impl Into<String>) -> Self {
        self.image_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override how many times a 429 is retried
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries.max(1);
        self
    }

    /// Make an authenticated GET request with retry logic for rate limits
    async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        let auth = AuthMode::for_key(&self.api_key);
        let mut retries = 0;

        loop {
            let mut request = self
                .client
                .get(&url)
                .header("Accept", "application/json")
                .query(query);
            request = match auth {
                AuthMode::Bearer => {
                    request.header("Authorization", format!("Bearer {}", self.api_key))
                }
                AuthMode::QueryKey => request.query(&[("api_key", self.api_key.as_str())]),
            };

            debug!(endpoint, "GET");
            let response = request.send().await.map_err(CatalogError::from)?;

            match response.status() {
                status if status.is_success() => {
                    let body = response.text().await.map_err(CatalogError::from)?;
                    let parsed: T = serde_json::from_str(&body).map_err(|e| {
                        CatalogError::InvalidResponse(format!("JSON parse error: {}", e))
                    })?;
                    return Ok(parsed);
                }
                StatusCode::NOT_FOUND => {
                    return Err(CatalogError::NotFound.into());
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    retries += 1;
                    if retries >= self.max_retries {
                        return Err(CatalogError::RateLimited.into());
                    }

                    // Get Retry-After header or default to exponential backoff
                    let wait_secs = response
                        .headers()
                        .get("Retry-After")
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(2u64.pow(retries));

                    warn!(endpoint, wait_secs, "rate limited, retrying");
                    tokio::time::sleep(Duration::from_secs(wait_secs)).await;
                    continue;
                }
                status => {
                    return Err(CatalogError::ServerError(status.as_u16()).into());
                }
            }
        }
    }

    /// Popular movies, one page at a time (pages start at 1)
    pub async fn popular_movies(&self, page: u32) -> Result<MovieResponse> {
        self.get("/movie/popular", &[("page", page.max(1).to_string())])
            .await
    }

    /// Search movies by title
    pub async fn search_movies(&self, query: &str, page: u32) -> Result<MovieResponse> {
        self.get(
            "/search/movie",
            &[
                ("query", query.to_string()),
                ("page", page.max(1).to_string()),
            ],
        )
        .await
    }

    /// Full movie details, including credits
    pub async fn movie_details(&self, id: u64) -> Result<Movie> {
        let endpoint = format!("/movie/{}", id);
        self.get(&endpoint, &[("append_to_response", "credits".to_string())])
            .await
    }

    /// Image URL for a poster/backdrop path, None when there is no image
    pub fn image_url(&self, path: Option<&str>, size: ImageSize) -> Option<String> {
        image_url(&self.image_base_url, path, size)
    }
}

/// Build an image CDN URL: `<base>/<size><path>`
pub fn image_url(base: &str, path: Option<&str>, size: ImageSize) -> Option<String> {
    let path = path.filter(|p| !p.is_empty())?;
    let sep = if path.starts_with('/') { "" } else { "/" };
    Some(format!("{}/{}{}{}", base.trim_end_matches('/'), size, sep, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_mode_by_key_length() {
        assert_eq!(AuthMode::for_key("abc123"), AuthMode::QueryKey);
        assert_eq!(AuthMode::for_key(&"x".repeat(64)), AuthMode::Bearer);
    }

    #[test]
    fn test_image_url() {
        let base = "https://image.tmdb.org/t/p";
        assert_eq!(
            image_url(base, Some("/abc.jpg"), ImageSize::W500).as_deref(),
            Some("https://image.tmdb.org/t/p/w500/abc.jpg")
        );
        assert_eq!(
            image_url(base, Some("abc.jpg"), ImageSize::Original).as_deref(),
            Some("https://image.tmdb.org/t/p/original/abc.jpg")
        );
        assert_eq!(image_url(base, None, ImageSize::W300), None);
        assert_eq!(image_url(base, Some(""), ImageSize::W300), None);
    }

    #[test]
    fn test_from_config_requires_key() {
        let config = Config::default();
        assert!(CatalogClient::from_config(&config).is_err());

        let config = Config {
            api_key: Some("abc".into()),
            image_base_url: "http://img.local/".into(),
            ..Config::default()
        };
        let client = CatalogClient::from_config(&config).unwrap();
        assert_eq!(
            client.image_url(Some("/p.jpg"), ImageSize::W300).as_deref(),
            Some("http://img.local/w300/p.jpg")
        );
    }
}
