//! Catalog integration (TMDB).
//!
//! This module wraps the upstream metadata API, normalizes its records into
//! [`MediaItem`](crate::media::MediaItem)s and assembles the home feed.
//! Listing failures are absorbed at this boundary: callers that render a
//! listing go through [`recover_page`] and get an empty page plus a logged
//! diagnostic instead of an error.

mod discover;
pub mod feed;
mod normalize;
mod tmdb;

pub use discover::DiscoverQuery;
pub use feed::{build_home_feed, dedup_lists, FeedList, FeedPlan, FeedSource, HomeFeed};
pub use tmdb::{
    image_url, ImageSize, TmdbClient, TmdbConfig, DEFAULT_IMAGE_BASE_URL, PLACEHOLDER_IMAGE_URL,
};

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use crate::media::{CatalogPage, MediaDetails, MediaKey, MediaType};

/// Errors that can occur when talking to the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("Catalog request failed: {status} {status_text}")]
    Request { status: u16, status_text: String },

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimitExceeded,

    /// Resource not found (404).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Client not configured (missing or rejected API key).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// Read-only access to the metadata catalog.
///
/// Listing calls return pages already normalized and filtered: entries
/// without a poster, without an id, or without a positive rating never
/// reach the caller.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Weekly trending titles; `None` mixes movies and shows.
    async fn trending(
        &self,
        media_type: Option<MediaType>,
        page: u32,
    ) -> Result<CatalogPage, CatalogError>;

    /// Popular titles of one type.
    async fn popular(&self, media_type: MediaType, page: u32)
        -> Result<CatalogPage, CatalogError>;

    /// Top rated titles of one type.
    async fn top_rated(
        &self,
        media_type: MediaType,
        page: u32,
    ) -> Result<CatalogPage, CatalogError>;

    /// Filtered movie discovery.
    async fn discover_movies(
        &self,
        query: &DiscoverQuery,
        page: u32,
    ) -> Result<CatalogPage, CatalogError>;

    /// Free-text movie search.
    async fn search(&self, query: &str, page: u32) -> Result<CatalogPage, CatalogError>;

    /// Movies currently in theaters.
    async fn now_playing(&self, page: u32) -> Result<CatalogPage, CatalogError>;

    /// Full details for one title.
    async fn details(&self, key: MediaKey) -> Result<MediaDetails, CatalogError>;
}

/// Turn a listing failure into an empty page.
///
/// This is the error boundary between the catalog and anything that renders
/// a listing. Nothing is retried; the next user interaction may ask again.
pub fn recover_page(
    result: Result<CatalogPage, CatalogError>,
    page: u32,
    context: &str,
) -> CatalogPage {
    match result {
        Ok(page) => page,
        Err(e) => {
            warn!(context = %context, page, error = %e, "Catalog listing failed, showing empty results");
            CatalogPage::empty(page)
        }
    }
}
