//! Announcer configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the release announcer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncerConfig {
    /// Enable/disable the announcer loop.
    #[serde(default)]
    pub enabled: bool,

    /// Telegram bot token.
    #[serde(default)]
    pub bot_token: String,

    /// Target chat: numeric id or `@channel_name`.
    #[serde(default)]
    pub chat_id: String,

    /// Public site URL used for "Watch Now" links.
    #[serde(default = "default_site_url")]
    pub site_url: String,

    /// Maximum titles announced per run.
    #[serde(default = "default_post_limit")]
    pub post_limit: usize,

    /// Time between runs (seconds).
    #[serde(default = "default_interval")]
    pub interval_secs: u64,

    /// Pause after each post (milliseconds).
    #[serde(default = "default_send_delay")]
    pub send_delay_ms: u64,

    /// Telegram Bot API base URL (default: https://api.telegram.org).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

fn default_site_url() -> String {
    "https://cineflix.netlify.app".to_string()
}

fn default_post_limit() -> usize {
    5
}

fn default_interval() -> u64 {
    1800 // 30 minutes
}

fn default_send_delay() -> u64 {
    3000
}

impl Default for AnnouncerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            bot_token: String::new(),
            chat_id: String::new(),
            site_url: default_site_url(),
            post_limit: default_post_limit(),
            interval_secs: default_interval(),
            send_delay_ms: default_send_delay(),
            api_url: None,
        }
    }
}
