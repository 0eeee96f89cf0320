//! TMDB (The Movie Database) API client.
//!
//! TMDB requires an API key, sent as the `api_key` query parameter.
//! Rate limits are generous (around 40 requests per second).

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::discover::DiscoverQuery;
use super::normalize::{normalize_details, normalize_page, RawDetails, RawPage};
use super::{Catalog, CatalogError};
use crate::media::{CatalogPage, MediaDetails, MediaKey, MediaType};
use crate::metrics::{CATALOG_REQUESTS, CATALOG_REQUEST_DURATION};

/// Shown in place of a missing poster.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://via.placeholder.com/500x750.png?text=No+Image";

const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// TMDB API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    /// TMDB API key (required).
    pub api_key: String,
    /// Base URL (default: https://api.themoviedb.org/3).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Image base URL for posters/backdrops.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base_url: Option<String>,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    30
}

/// Rendition size for artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    /// Grid cards and posters.
    W500,
    /// Hero and detail backdrops.
    Original,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::W500 => "w500",
            ImageSize::Original => "original",
        }
    }
}

/// Full URL of a poster/backdrop path, or the placeholder when there is none.
pub fn image_url(image_base_url: &str, path: Option<&str>, size: ImageSize) -> String {
    match path {
        Some(p) if !p.is_empty() => format!("{}/{}{}", image_base_url, size.as_str(), p),
        _ => PLACEHOLDER_IMAGE_URL.to_string(),
    }
}

/// TMDB API client.
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
    image_base_url: String,
}

impl TmdbClient {
    /// Create a new TMDB client.
    pub fn new(config: TmdbConfig) -> Result<Self, CatalogError> {
        if config.api_key.trim().is_empty() {
            return Err(CatalogError::NotConfigured(
                "TMDB API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let image_base_url = config
            .image_base_url
            .unwrap_or_else(|| DEFAULT_IMAGE_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
            image_base_url,
        })
    }

    /// Full URL for a poster/backdrop path.
    pub fn image_url(&self, path: Option<&str>, size: ImageSize) -> String {
        image_url(&self.image_base_url, path, size)
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// GET an endpoint and decode the JSON body.
    ///
    /// `label` names the endpoint in metrics, so it must stay low-cardinality.
    async fn get_json<T: DeserializeOwned>(
        &self,
        label: &'static str,
        endpoint: &str,
        params: &[(String, String)],
    ) -> Result<T, CatalogError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("TMDB request: endpoint={}, params={:?}", endpoint, params);

        let started = Instant::now();
        let result = self.send(&url, endpoint, params).await;
        CATALOG_REQUEST_DURATION
            .with_label_values(&[label])
            .observe(started.elapsed().as_secs_f64());
        CATALOG_REQUESTS
            .with_label_values(&[label, if result.is_ok() { "ok" } else { "error" }])
            .inc();
        result
    }

    async fn send<T: DeserializeOwned>(
        &self,
        url: &str,
        endpoint: &str,
        params: &[(String, String)],
    ) -> Result<T, CatalogError> {
        let response = self
            .client
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if status == 401 {
            return Err(CatalogError::NotConfigured(
                "Invalid TMDB API key".to_string(),
            ));
        }
        if status == 404 {
            return Err(CatalogError::NotFound(endpoint.to_string()));
        }
        if status == 429 {
            return Err(CatalogError::RateLimitExceeded);
        }
        if !status.is_success() {
            return Err(CatalogError::Request {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        response.json().await.map_err(|e| {
            CatalogError::Parse(format!("Failed to parse {} response: {}", endpoint, e))
        })
    }

    async fn listing(
        &self,
        label: &'static str,
        endpoint: &str,
        mut params: Vec<(String, String)>,
        page: u32,
        hint: Option<MediaType>,
    ) -> Result<CatalogPage, CatalogError> {
        if !params.iter().any(|(k, _)| k == "page") {
            params.push(("page".to_string(), page.to_string()));
        }
        let raw: RawPage = self.get_json(label, endpoint, &params).await?;
        Ok(normalize_page(raw, hint))
    }
}

#[async_trait]
impl Catalog for TmdbClient {
    async fn trending(
        &self,
        media_type: Option<MediaType>,
        page: u32,
    ) -> Result<CatalogPage, CatalogError> {
        let scope = media_type.map(|t| t.as_str()).unwrap_or("all");
        self.listing(
            "trending",
            &format!("trending/{}/week", scope),
            Vec::new(),
            page,
            media_type,
        )
        .await
    }

    async fn popular(
        &self,
        media_type: MediaType,
        page: u32,
    ) -> Result<CatalogPage, CatalogError> {
        self.listing(
            "popular",
            &format!("{}/popular", media_type),
            Vec::new(),
            page,
            Some(media_type),
        )
        .await
    }

    async fn top_rated(
        &self,
        media_type: MediaType,
        page: u32,
    ) -> Result<CatalogPage, CatalogError> {
        self.listing(
            "top_rated",
            &format!("{}/top_rated", media_type),
            Vec::new(),
            page,
            Some(media_type),
        )
        .await
    }

    async fn discover_movies(
        &self,
        query: &DiscoverQuery,
        page: u32,
    ) -> Result<CatalogPage, CatalogError> {
        let params = query.resolve(Self::today(), page);
        self.listing("discover", "discover/movie", params, page, Some(MediaType::Movie))
            .await
    }

    async fn search(&self, query: &str, page: u32) -> Result<CatalogPage, CatalogError> {
        debug!("TMDB movie search: query='{}', page={}", query, page);
        self.listing(
            "search",
            "search/movie",
            vec![("query".to_string(), query.to_string())],
            page,
            Some(MediaType::Movie),
        )
        .await
    }

    async fn now_playing(&self, page: u32) -> Result<CatalogPage, CatalogError> {
        self.listing(
            "now_playing",
            "movie/now_playing",
            vec![("language".to_string(), "en-US".to_string())],
            page,
            Some(MediaType::Movie),
        )
        .await
    }

    async fn details(&self, key: MediaKey) -> Result<MediaDetails, CatalogError> {
        debug!("TMDB get details: {}", key);

        let endpoint = format!("{}/{}", key.media_type, key.id);
        let params = vec![(
            "append_to_response".to_string(),
            "videos,credits,recommendations,similar".to_string(),
        )];
        let raw: RawDetails = self
            .get_json("details", &endpoint, &params)
            .await
            .map_err(|e| match e {
                CatalogError::NotFound(_) => CatalogError::NotFound(key.to_string()),
                other => other,
            })?;

        normalize_details(raw, key.media_type).ok_or_else(|| {
            CatalogError::Parse(format!("Details for {} carry no usable id", key))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: &str) -> TmdbConfig {
        TmdbConfig {
            api_key: api_key.to_string(),
            base_url: Some("http://localhost:9/3/".to_string()),
            image_base_url: None,
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_new_requires_api_key() {
        let result = TmdbClient::new(config("  "));
        assert!(matches!(result, Err(CatalogError::NotConfigured(_))));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = TmdbClient::new(config("key")).unwrap();
        assert_eq!(client.base_url, "http://localhost:9/3");
    }

    #[test]
    fn test_image_url_uses_size_and_path() {
        let client = TmdbClient::new(config("key")).unwrap();
        assert_eq!(
            client.image_url(Some("/abc.jpg"), ImageSize::W500),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
        assert_eq!(
            client.image_url(Some("/abc.jpg"), ImageSize::Original),
            "https://image.tmdb.org/t/p/original/abc.jpg"
        );
    }

    #[test]
    fn test_missing_image_yields_placeholder() {
        assert_eq!(
            image_url("https://image.tmdb.org/t/p", None, ImageSize::W500),
            PLACEHOLDER_IMAGE_URL
        );
        assert_eq!(
            image_url("https://image.tmdb.org/t/p", Some(""), ImageSize::W500),
            PLACEHOLDER_IMAGE_URL
        );
    }

    #[tokio::test]
    async fn test_transport_failure_is_http_error() {
        // Port 9 (discard) is not listening in test environments.
        let client = TmdbClient::new(config("key")).unwrap();
        let result = client.popular(MediaType::Movie, 1).await;
        assert!(matches!(result, Err(CatalogError::Http(_))));
    }
}
