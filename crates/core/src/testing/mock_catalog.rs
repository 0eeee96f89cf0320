//! Mock catalog for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::catalog::{Catalog, CatalogError, DiscoverQuery};
use crate::media::{CatalogPage, MediaDetails, MediaKey, MediaType};

/// A recorded catalog query for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCatalogQuery {
    Trending {
        media_type: Option<MediaType>,
        page: u32,
    },
    Popular {
        media_type: MediaType,
        page: u32,
    },
    TopRated {
        media_type: MediaType,
        page: u32,
    },
    Discover {
        query: DiscoverQuery,
        page: u32,
    },
    Search {
        query: String,
        page: u32,
    },
    NowPlaying {
        page: u32,
    },
    Details {
        key: MediaKey,
    },
}

impl RecordedCatalogQuery {
    /// Listing name used to look up configured pages and failures.
    ///
    /// `trending/all`, `trending/movie`, `popular/tv`, `top_rated/movie`,
    /// `discover?with_genres=28`, `search?q=heat`, `now_playing`, `details`.
    pub fn listing(&self) -> String {
        match self {
            Self::Trending { media_type, .. } => format!(
                "trending/{}",
                media_type.map(|t| t.as_str()).unwrap_or("all")
            ),
            Self::Popular { media_type, .. } => format!("popular/{}", media_type),
            Self::TopRated { media_type, .. } => format!("top_rated/{}", media_type),
            Self::Discover { query, .. } => format!("discover?{}", query.to_query_string()),
            Self::Search { query, .. } => format!("search?q={}", query),
            Self::NowPlaying { .. } => "now_playing".to_string(),
            Self::Details { .. } => "details".to_string(),
        }
    }

    /// Requested page, 0 for details lookups.
    pub fn page(&self) -> u32 {
        match self {
            Self::Trending { page, .. }
            | Self::Popular { page, .. }
            | Self::TopRated { page, .. }
            | Self::Discover { page, .. }
            | Self::Search { page, .. }
            | Self::NowPlaying { page } => *page,
            Self::Details { .. } => 0,
        }
    }
}

/// Mock implementation of the Catalog trait.
///
/// Provides controllable behavior for testing:
/// - Return configured pages per listing and page number
/// - Track queries for assertions
/// - Simulate failures, once or for every call to a listing
/// - Delay a listing's answer to reorder concurrent completions
///
/// Any discover query without a page of its own falls back to pages
/// configured for the bare `discover` listing.
#[derive(Debug)]
pub struct MockCatalog {
    /// Pages by (listing, page number).
    pages: Arc<RwLock<HashMap<(String, u32), CatalogPage>>>,
    /// Details by key.
    details: Arc<RwLock<HashMap<MediaKey, MediaDetails>>>,
    /// Listings that always fail.
    failing: Arc<RwLock<HashSet<String>>>,
    /// Per-listing response delays.
    delays: Arc<RwLock<HashMap<String, Duration>>>,
    /// Recorded queries.
    queries: Arc<RwLock<Vec<RecordedCatalogQuery>>>,
    /// Listings in the order their answers were produced.
    completed: Arc<RwLock<Vec<String>>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<CatalogError>>>,
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCatalog {
    pub fn new() -> Self {
        Self {
            pages: Arc::new(RwLock::new(HashMap::new())),
            details: Arc::new(RwLock::new(HashMap::new())),
            failing: Arc::new(RwLock::new(HashSet::new())),
            delays: Arc::new(RwLock::new(HashMap::new())),
            queries: Arc::new(RwLock::new(Vec::new())),
            completed: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Serve `page` for a listing at `page.page`.
    pub async fn set_page(&self, listing: &str, page: CatalogPage) {
        self.pages
            .write()
            .await
            .insert((listing.to_string(), page.page), page);
    }

    /// Add details for a title.
    pub async fn add_details(&self, details: MediaDetails) {
        self.details.write().await.insert(details.key(), details);
    }

    /// Make every call to a listing fail with a 500.
    pub async fn fail_listing(&self, listing: &str) {
        self.failing.write().await.insert(listing.to_string());
    }

    /// Hold every answer for a listing back by `delay`.
    pub async fn set_delay(&self, listing: &str, delay: Duration) {
        self.delays.write().await.insert(listing.to_string(), delay);
    }

    /// Clear all listing failures.
    pub async fn clear_failures(&self) {
        self.failing.write().await.clear();
    }

    // =========================================================================
    // Query Recording
    // =========================================================================

    /// Get all recorded queries.
    pub async fn recorded_queries(&self) -> Vec<RecordedCatalogQuery> {
        self.queries.read().await.clone()
    }

    /// Listings in the order their answers completed.
    pub async fn completed_listings(&self) -> Vec<String> {
        self.completed.read().await.clone()
    }

    /// Clear recorded queries.
    pub async fn clear_recorded(&self) {
        self.queries.write().await.clear();
    }

    /// Get the number of queries performed.
    pub async fn query_count(&self) -> usize {
        self.queries.read().await.len()
    }

    // =========================================================================
    // Error Injection
    // =========================================================================

    /// Configure the next operation to fail with the given error.
    pub async fn set_next_error(&self, error: CatalogError) {
        *self.next_error.write().await = Some(error);
    }

    /// Clear any pending error.
    pub async fn clear_next_error(&self) {
        *self.next_error.write().await = None;
    }

    async fn take_error(&self) -> Option<CatalogError> {
        self.next_error.write().await.take()
    }

    /// Record a query and resolve it against the configured behavior.
    async fn serve(&self, query: RecordedCatalogQuery) -> Result<CatalogPage, CatalogError> {
        self.queries.write().await.push(query.clone());

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        let listing = query.listing();
        let page = query.page();

        let delay = self.delays.read().await.get(&listing).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.completed.write().await.push(listing.clone());

        if self.failing.read().await.contains(&listing) {
            return Err(CatalogError::Request {
                status: 500,
                status_text: "Internal Server Error".to_string(),
            });
        }

        let is_discover = matches!(query, RecordedCatalogQuery::Discover { .. });
        let pages = self.pages.read().await;
        let found = pages
            .get(&(listing, page))
            .or_else(|| is_discover.then(|| pages.get(&("discover".to_string(), page)))?);

        Ok(found.cloned().unwrap_or_else(|| CatalogPage::empty(page)))
    }
}

#[async_trait]
impl Catalog for MockCatalog {
    async fn trending(
        &self,
        media_type: Option<MediaType>,
        page: u32,
    ) -> Result<CatalogPage, CatalogError> {
        self.serve(RecordedCatalogQuery::Trending { media_type, page })
            .await
    }

    async fn popular(
        &self,
        media_type: MediaType,
        page: u32,
    ) -> Result<CatalogPage, CatalogError> {
        self.serve(RecordedCatalogQuery::Popular { media_type, page })
            .await
    }

    async fn top_rated(
        &self,
        media_type: MediaType,
        page: u32,
    ) -> Result<CatalogPage, CatalogError> {
        self.serve(RecordedCatalogQuery::TopRated { media_type, page })
            .await
    }

    async fn discover_movies(
        &self,
        query: &DiscoverQuery,
        page: u32,
    ) -> Result<CatalogPage, CatalogError> {
        self.serve(RecordedCatalogQuery::Discover {
            query: query.clone(),
            page,
        })
        .await
    }

    async fn search(&self, query: &str, page: u32) -> Result<CatalogPage, CatalogError> {
        self.serve(RecordedCatalogQuery::Search {
            query: query.to_string(),
            page,
        })
        .await
    }

    async fn now_playing(&self, page: u32) -> Result<CatalogPage, CatalogError> {
        self.serve(RecordedCatalogQuery::NowPlaying { page }).await
    }

    async fn details(&self, key: MediaKey) -> Result<MediaDetails, CatalogError> {
        self.queries
            .write()
            .await
            .push(RecordedCatalogQuery::Details { key });

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        self.details
            .read()
            .await
            .get(&key)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(key.to_string()))
    }
}
