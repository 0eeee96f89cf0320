//! Release announcer.
//!
//! Periodically posts newly playing movies to a messaging channel. Titles
//! already announced are remembered in the persistent store so each one is
//! posted once.

mod config;
mod telegram;

pub use config::AnnouncerConfig;
pub use telegram::TelegramMessenger;

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

use crate::catalog::{image_url, Catalog, CatalogError, ImageSize};
use crate::media::{MediaItem, MediaType};
use crate::metrics::ANNOUNCEMENTS;
use crate::store::PersistentStore;

/// Store key holding ids already announced, newest first.
pub const HISTORY_KEY: &str = "cineflix_posted_movies";

/// Number of announced ids remembered.
pub const MAX_HISTORY: usize = 200;

/// Now-playing pages scanned per run.
const SCANNED_PAGES: [u32; 2] = [1, 2];

#[derive(Debug, Error)]
pub enum AnnounceError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Messenger error: {0}")]
    Messenger(String),
}

/// A channel that accepts photo posts.
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send_photo(&self, photo_url: &str, caption: &str) -> Result<(), AnnounceError>;
}

/// Outcome of one announcer run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Unannounced titles found.
    pub candidates: usize,
    /// Ids posted successfully, in posting order.
    pub posted: Vec<u32>,
    pub failed: usize,
}

/// Markdown caption for a title.
pub fn caption(item: &MediaItem, site_url: &str) -> String {
    let release = item
        .release_date()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "TBA".to_string());
    format!(
        "🎬 *{}*\n📅 Release: {}\n⭐ Rating: {:.1}\n🔗 [Watch Now]({}/movie/{})",
        item.display_title(),
        release,
        item.rating(),
        site_url.trim_end_matches('/'),
        item.id()
    )
}

/// Posts new releases on an interval until stopped.
#[derive(Clone)]
pub struct Announcer {
    config: AnnouncerConfig,
    catalog: Arc<dyn Catalog>,
    messenger: Arc<dyn Messenger>,
    store: PersistentStore,
    image_base_url: String,

    running: Arc<AtomicBool>,
    shutdown_tx: broadcast::Sender<()>,
}

impl Announcer {
    pub fn new(
        config: AnnouncerConfig,
        catalog: Arc<dyn Catalog>,
        messenger: Arc<dyn Messenger>,
        store: PersistentStore,
        image_base_url: impl Into<String>,
    ) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self {
            config,
            catalog,
            messenger,
            store,
            image_base_url: image_base_url.into(),
            running: Arc::new(AtomicBool::new(false)),
            shutdown_tx,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Ids announced so far, newest first.
    pub fn history(&self) -> Vec<u32> {
        self.store.get(HISTORY_KEY, Vec::new())
    }

    /// Announce up to `post_limit` titles not posted before.
    pub async fn run_once(&self) -> Result<RunSummary, AnnounceError> {
        let pages = futures::future::join_all(
            SCANNED_PAGES
                .iter()
                .map(|&page| self.catalog.now_playing(page)),
        )
        .await;

        let history = self.history();
        let announced: HashSet<u32> = history.iter().copied().collect();
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();
        for page in pages {
            for item in page?.results {
                if item.media_type() == MediaType::Movie
                    && !announced.contains(&item.id())
                    && seen.insert(item.id())
                {
                    candidates.push(item);
                }
            }
        }

        let mut summary = RunSummary {
            candidates: candidates.len(),
            ..Default::default()
        };
        if candidates.is_empty() {
            info!("No new releases to announce");
            return Ok(summary);
        }

        let delay = Duration::from_millis(self.config.send_delay_ms);
        for item in candidates.into_iter().take(self.config.post_limit) {
            let photo = image_url(&self.image_base_url, item.poster_path(), ImageSize::W500);
            let text = caption(&item, &self.config.site_url);

            match self.messenger.send_photo(&photo, &text).await {
                Ok(()) => {
                    info!("Announced '{}' ({})", item.display_title(), item.id());
                    ANNOUNCEMENTS.with_label_values(&["posted"]).inc();
                    summary.posted.push(item.id());
                }
                Err(e) => {
                    error!("Failed to announce '{}': {}", item.display_title(), e);
                    ANNOUNCEMENTS.with_label_values(&["failed"]).inc();
                    summary.failed += 1;
                }
            }

            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        if !summary.posted.is_empty() {
            let updated: Vec<u32> = summary
                .posted
                .iter()
                .copied()
                .chain(history)
                .take(MAX_HISTORY)
                .collect();
            self.store.set(HISTORY_KEY, &updated);
            info!("Finished announcing {} new releases", summary.posted.len());
        }

        Ok(summary)
    }

    /// Start the announcement loop (runs immediately, then every interval).
    pub fn start(&self) {
        if self.running.swap(true, Ordering::SeqCst) {
            warn!("Announcer already running");
            return;
        }

        let this = self.clone();
        let interval = Duration::from_secs(self.config.interval_secs);
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        tokio::spawn(async move {
            info!("Announcer loop started (every {:?})", interval);
            loop {
                if !this.running.load(Ordering::Relaxed) {
                    break;
                }
                if let Err(e) = this.run_once().await {
                    warn!("Announcer run failed: {}", e);
                }
                tokio::select! {
                    _ = shutdown_rx.recv() => {
                        info!("Announcer received shutdown signal");
                        break;
                    }
                    _ = tokio::time::sleep(interval) => {}
                }
            }
            info!("Announcer loop stopped");
        });
    }

    /// Stop the loop after the current run.
    pub fn stop(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            warn!("Announcer not running");
            return;
        }
        let _ = self.shutdown_tx.send(());
    }
}
