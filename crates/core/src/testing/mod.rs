//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the external service traits
//! (catalog, announcement messenger), allowing the browsing controllers and
//! the server to be exercised without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use cineflix_core::testing::{fixtures, MockCatalog};
//!
//! let catalog = MockCatalog::new();
//! catalog
//!     .set_page("popular/movie", fixtures::page(vec![fixtures::movie(1, "Heat")], 1, 1))
//!     .await;
//! ```

mod mock_catalog;
mod mock_messenger;

pub use mock_catalog::{MockCatalog, RecordedCatalogQuery};
pub use mock_messenger::{MockMessenger, SentAnnouncement};

/// Test fixtures and helper functions.
pub mod fixtures {
    use chrono::NaiveDate;

    use crate::media::{
        CastMember, CatalogPage, Genre, MediaDetails, MediaItem, Movie, Show, Video,
    };

    /// A displayable movie with reasonable defaults.
    pub fn movie(id: u32, title: &str) -> MediaItem {
        MediaItem::Movie(Movie {
            id,
            title: title.to_string(),
            release_date: NaiveDate::from_ymd_opt(2024, 1, 15),
            poster_path: Some(format!("/poster-{}.jpg", id)),
            backdrop_path: Some(format!("/backdrop-{}.jpg", id)),
            vote_average: 7.5,
            overview: format!("A film called {}.", title),
            genre_ids: vec![18],
        })
    }

    /// A movie released on the given date.
    pub fn movie_released(id: u32, title: &str, release_date: Option<NaiveDate>) -> MediaItem {
        match movie(id, title) {
            MediaItem::Movie(m) => MediaItem::Movie(Movie { release_date, ..m }),
            other => other,
        }
    }

    /// A displayable TV show with reasonable defaults.
    pub fn show(id: u32, name: &str) -> MediaItem {
        MediaItem::Show(Show {
            id,
            name: name.to_string(),
            first_air_date: NaiveDate::from_ymd_opt(2020, 9, 1),
            poster_path: Some(format!("/poster-tv-{}.jpg", id)),
            backdrop_path: None,
            vote_average: 8.1,
            overview: format!("A series called {}.", name),
            genre_ids: vec![18, 80],
        })
    }

    /// One listing page.
    pub fn page(results: Vec<MediaItem>, page: u32, total_pages: u32) -> CatalogPage {
        let total_results = results.len() as u32 * total_pages;
        CatalogPage {
            page,
            results,
            total_pages,
            total_results,
        }
    }

    /// Details for an item, with a small cast and a YouTube trailer.
    pub fn details(item: MediaItem) -> MediaDetails {
        let id = item.id();
        MediaDetails {
            item,
            genres: vec![Genre {
                id: 18,
                name: "Drama".to_string(),
            }],
            runtime_minutes: Some(118),
            tagline: String::new(),
            cast: vec![
                CastMember {
                    id: id * 10 + 1,
                    name: "Lead Actor".to_string(),
                    role: "Hero".to_string(),
                    portrait_path: Some("/lead.jpg".to_string()),
                },
                CastMember {
                    id: id * 10 + 2,
                    name: "Unpictured Actor".to_string(),
                    role: "Extra".to_string(),
                    portrait_path: None,
                },
            ],
            videos: vec![Video {
                key: format!("yt{}", id),
                name: "Official Trailer".to_string(),
                site: "YouTube".to_string(),
                kind: "Trailer".to_string(),
            }],
            recommendations: Vec::new(),
        }
    }
}
