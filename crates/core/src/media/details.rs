use serde::{Deserialize, Serialize};

use super::types::{MediaItem, MediaKey, Movie, Show};

/// A genre as named by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

/// A billed cast member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMember {
    pub id: u32,
    pub name: String,
    /// Character played.
    #[serde(default)]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portrait_path: Option<String>,
}

/// A video attached to a title (trailers, teasers, clips).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    /// Provider-specific key, e.g. the YouTube video id.
    pub key: String,
    pub name: String,
    pub site: String,
    pub kind: String,
}

/// Everything the detail view shows for one title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaDetails {
    pub item: MediaItem,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_minutes: Option<u32>,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub videos: Vec<Video>,
    #[serde(default)]
    pub recommendations: Vec<MediaItem>,
}

impl MediaDetails {
    pub fn key(&self) -> MediaKey {
        self.item.key()
    }

    /// Cast members that have a portrait, in billing order.
    pub fn billed_cast(&self, limit: usize) -> Vec<&CastMember> {
        self.cast
            .iter()
            .filter(|c| c.portrait_path.is_some())
            .take(limit)
            .collect()
    }

    /// First YouTube trailer, if any.
    pub fn trailer(&self) -> Option<&Video> {
        self.videos
            .iter()
            .find(|v| v.site == "YouTube" && v.kind == "Trailer")
    }

    /// The list entry saved when the title is added to the watchlist.
    ///
    /// Detail payloads carry full genres rather than ids, so the ids are
    /// rebuilt from them.
    pub fn summary(&self) -> MediaItem {
        let genre_ids: Vec<u32> = self.genres.iter().map(|g| g.id).collect();
        match &self.item {
            MediaItem::Movie(m) => MediaItem::Movie(Movie {
                genre_ids,
                ..m.clone()
            }),
            MediaItem::Show(s) => MediaItem::Show(Show {
                genre_ids,
                ..s.clone()
            }),
        }
    }
}
