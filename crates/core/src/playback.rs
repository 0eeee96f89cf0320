//! Deep links to external playback providers.
//!
//! Episodic titles always link to season 1, episode 1.

use chrono::NaiveDate;
use serde::Serialize;

use crate::media::{MediaKey, MediaType};

/// One provider's player URL for a title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaybackLink {
    pub provider: &'static str,
    pub label: &'static str,
    pub url: String,
}

/// What the detail view offers for a title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Availability {
    Playable { links: Vec<PlaybackLink> },
    ComingSoon { release_date: NaiveDate },
}

/// Player links in display order.
pub fn playback_links(key: MediaKey) -> Vec<PlaybackLink> {
    let id = key.id;
    let (vidsrc, multiembed, moviesapi) = match key.media_type {
        MediaType::Movie => (
            format!("https://vidsrc.to/embed/movie/{}", id),
            format!("https://multiembed.mov/?video_id={}&tmdb=1", id),
            format!("https://moviesapi.club/movie/{}", id),
        ),
        MediaType::Tv => (
            format!("https://vidsrc.to/embed/tv/{}/1-1", id),
            format!("https://multiembed.mov/?video_id={}&tmdb=1&s=1&e=1", id),
            format!("https://moviesapi.club/tv/{}-1-1", id),
        ),
    };

    vec![
        PlaybackLink {
            provider: "vidsrc",
            label: "Player 1",
            url: vidsrc,
        },
        PlaybackLink {
            provider: "multiembed",
            label: "Player 2",
            url: multiembed,
        },
        PlaybackLink {
            provider: "moviesapi",
            label: "Player 3",
            url: moviesapi,
        },
    ]
}

/// Link used by the hero "Watch Now" button.
pub fn primary_link(key: MediaKey) -> String {
    match key.media_type {
        MediaType::Movie => format!("https://vidsrc.to/embed/movie/{}", key.id),
        MediaType::Tv => format!("https://vidsrc.to/embed/tv/{}/1-1", key.id),
    }
}

/// Titles without a known date count as released.
pub fn is_released(release_date: Option<NaiveDate>, today: NaiveDate) -> bool {
    release_date.map_or(true, |date| date <= today)
}

pub fn availability(
    key: MediaKey,
    release_date: Option<NaiveDate>,
    today: NaiveDate,
) -> Availability {
    match release_date {
        Some(date) if !is_released(Some(date), today) => {
            Availability::ComingSoon { release_date: date }
        }
        _ => Availability::Playable {
            links: playback_links(key),
        },
    }
}
