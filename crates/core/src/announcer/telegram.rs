//! Telegram Bot API messenger.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{AnnounceError, Messenger};

const DEFAULT_API_URL: &str = "https://api.telegram.org";

#[derive(Debug, Serialize)]
struct SendPhotoRequest<'a> {
    chat_id: &'a str,
    photo: &'a str,
    caption: &'a str,
    parse_mode: &'static str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Posts photos with captions to a chat through a bot.
pub struct TelegramMessenger {
    client: Client,
    api_url: String,
    bot_token: String,
    chat_id: String,
}

impl TelegramMessenger {
    pub fn new(
        bot_token: impl Into<String>,
        chat_id: impl Into<String>,
        api_url: Option<String>,
    ) -> Result<Self, AnnounceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AnnounceError::Messenger(e.to_string()))?;

        Ok(Self {
            client,
            api_url: api_url
                .unwrap_or_else(|| DEFAULT_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
        })
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send_photo(&self, photo_url: &str, caption: &str) -> Result<(), AnnounceError> {
        let url = format!("{}/bot{}/sendPhoto", self.api_url, self.bot_token);
        debug!("Telegram sendPhoto to {}", self.chat_id);

        let response = self
            .client
            .post(&url)
            .json(&SendPhotoRequest {
                chat_id: &self.chat_id,
                photo: photo_url,
                caption,
                parse_mode: "Markdown",
            })
            .send()
            .await
            .map_err(|e| AnnounceError::Messenger(e.without_url().to_string()))?;

        // The API reports failures in the body, usually with a 4xx status.
        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| AnnounceError::Messenger(format!("Invalid API response: {}", e)))?;

        if body.ok {
            Ok(())
        } else {
            Err(AnnounceError::Messenger(
                body.description
                    .unwrap_or_else(|| "unknown error".to_string()),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_trailing_slash_trimmed() {
        let messenger =
            TelegramMessenger::new("123:abc", "@chan", Some("http://localhost:9/".to_string()))
                .unwrap();
        assert_eq!(messenger.api_url, "http://localhost:9");
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(SendPhotoRequest {
            chat_id: "@chan",
            photo: "https://image.tmdb.org/t/p/w500/p.jpg",
            caption: "*Heat*",
            parse_mode: "Markdown",
        })
        .unwrap();
        assert_eq!(body["chat_id"], "@chan");
        assert_eq!(body["parse_mode"], "Markdown");
    }

    #[tokio::test]
    async fn test_transport_failure_is_messenger_error() {
        let messenger =
            TelegramMessenger::new("123:abc", "@chan", Some("http://localhost:9".to_string()))
                .unwrap();
        let result = messenger.send_photo("p", "c").await;
        assert!(matches!(result, Err(AnnounceError::Messenger(_))));
    }
}
