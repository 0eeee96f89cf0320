use std::sync::Arc;

use chrono::NaiveDate;
use cineflix_core::catalog::DEFAULT_IMAGE_BASE_URL;
use cineflix_core::{Catalog, Config, SanitizedConfig, Watchlist};
use tokio::sync::RwLock;

/// Shared application state
pub struct AppState {
    config: Config,
    catalog: Arc<dyn Catalog>,
    watchlist: RwLock<Watchlist>,
    image_base_url: String,
    today: Option<NaiveDate>,
}

impl AppState {
    pub fn new(config: Config, catalog: Arc<dyn Catalog>, watchlist: Watchlist) -> Self {
        let image_base_url = config
            .catalog
            .image_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_IMAGE_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Self {
            config,
            catalog,
            watchlist: RwLock::new(watchlist),
            image_base_url,
            today: None,
        }
    }

    /// Pin the calendar date used for release gating and date-bound queries.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn catalog(&self) -> Arc<dyn Catalog> {
        Arc::clone(&self.catalog)
    }

    pub fn watchlist(&self) -> &RwLock<Watchlist> {
        &self.watchlist
    }

    pub fn image_base_url(&self) -> &str {
        &self.image_base_url
    }

    pub fn today(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}
