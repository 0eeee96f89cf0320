//! Mock messenger for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::announcer::{AnnounceError, Messenger};

/// A post accepted by [`MockMessenger`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentAnnouncement {
    pub photo_url: String,
    pub caption: String,
}

/// Mock implementation of the Messenger trait.
///
/// Records every successful post; a configured error fails the next post only.
#[derive(Debug, Default)]
pub struct MockMessenger {
    sent: Arc<RwLock<Vec<SentAnnouncement>>>,
    next_error: Arc<RwLock<Option<String>>>,
}

impl MockMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Posts accepted so far.
    pub async fn sent(&self) -> Vec<SentAnnouncement> {
        self.sent.read().await.clone()
    }

    /// Configure the next post to fail with the given description.
    pub async fn set_next_error(&self, description: impl Into<String>) {
        *self.next_error.write().await = Some(description.into());
    }
}

#[async_trait]
impl Messenger for MockMessenger {
    async fn send_photo(&self, photo_url: &str, caption: &str) -> Result<(), AnnounceError> {
        if let Some(description) = self.next_error.write().await.take() {
            return Err(AnnounceError::Messenger(description));
        }

        self.sent.write().await.push(SentAnnouncement {
            photo_url: photo_url.to_string(),
            caption: caption.to_string(),
        });
        Ok(())
    }
}
