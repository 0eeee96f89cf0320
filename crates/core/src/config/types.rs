use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::announcer::AnnouncerConfig;
use crate::catalog::TmdbConfig;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub catalog: TmdbConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub announcer: Option<AnnouncerConfig>,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

/// Persistent store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("cineflix.db")
}

/// Search input configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke (milliseconds).
    #[serde(default = "default_debounce")]
    pub debounce_ms: u64,
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce(),
        }
    }
}

fn default_debounce() -> u64 {
    500
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub catalog: SanitizedCatalogConfig,
    pub storage: StorageConfig,
    pub search: SearchConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub announcer: Option<SanitizedAnnouncerConfig>,
}

/// Sanitized catalog config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedCatalogConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_base_url: Option<String>,
    pub timeout_secs: u64,
    pub api_key_configured: bool,
}

/// Sanitized announcer config (bot token hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedAnnouncerConfig {
    pub enabled: bool,
    pub chat_id: String,
    pub site_url: String,
    pub post_limit: usize,
    pub interval_secs: u64,
    pub bot_token_configured: bool,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            catalog: SanitizedCatalogConfig {
                base_url: config.catalog.base_url.clone(),
                image_base_url: config.catalog.image_base_url.clone(),
                timeout_secs: config.catalog.timeout_secs,
                api_key_configured: !config.catalog.api_key.is_empty(),
            },
            storage: config.storage.clone(),
            search: config.search.clone(),
            announcer: config.announcer.as_ref().map(|a| SanitizedAnnouncerConfig {
                enabled: a.enabled,
                chat_id: a.chat_id.clone(),
                site_url: a.site_url.clone(),
                post_limit: a.post_limit,
                interval_secs: a.interval_secs,
                bot_token_configured: !a.bot_token.is_empty(),
            }),
        }
    }
}
