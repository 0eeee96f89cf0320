use std::sync::Arc;

use async_trait::async_trait;

use super::query::GridFilters;
use crate::catalog::{Catalog, CatalogError};
use crate::media::CatalogPage;

/// Minimum vote count applied to rating sorts.
pub const RATING_VOTE_FLOOR: u32 = 200;

/// Source of grid pages.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, filters: &GridFilters, page: u32) -> Result<CatalogPage, CatalogError>;
}

/// Fetches grid pages from the catalog's movie discovery.
#[derive(Clone)]
pub struct GridFetcher {
    catalog: Arc<dyn Catalog>,
}

impl GridFetcher {
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl PageFetcher for GridFetcher {
    async fn fetch(&self, filters: &GridFilters, page: u32) -> Result<CatalogPage, CatalogError> {
        let mut query = filters.discover_query();
        if filters.sort.is_rating() {
            query.set("vote_count.gte", RATING_VOTE_FLOOR);
        }
        self.catalog.discover_movies(&query, page).await
    }
}
