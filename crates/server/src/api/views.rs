//! Response shapes: what each view renders.

use cineflix_core::catalog::{image_url, FeedList, HomeFeed};
use cineflix_core::media::{CastMember, Genre, Video};
use cineflix_core::playback::primary_link;
use cineflix_core::{
    Availability, CatalogPage, GridFilters, ImageSize, MediaDetails, MediaItem, MediaType,
};
use serde::Serialize;

/// Billed cast shown on the detail page.
pub const CAST_LIMIT: usize = 10;

/// A poster tile in a list or grid.
#[derive(Debug, Clone, Serialize)]
pub struct Card {
    pub id: u32,
    pub media_type: MediaType,
    pub title: String,
    pub poster_url: String,
    pub rating: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

impl Card {
    pub fn new(item: &MediaItem, image_base_url: &str) -> Self {
        Self {
            id: item.id(),
            media_type: item.media_type(),
            title: item.display_title().to_string(),
            poster_url: image_url(image_base_url, item.poster_path(), ImageSize::W500),
            rating: item.rating(),
            year: item.year(),
        }
    }

    pub fn list(items: &[MediaItem], image_base_url: &str) -> Vec<Self> {
        items.iter().map(|i| Self::new(i, image_base_url)).collect()
    }
}

/// One slide of the hero carousel.
#[derive(Debug, Clone, Serialize)]
pub struct HeroSlide {
    #[serde(flatten)]
    pub card: Card,
    pub backdrop_url: String,
    pub synopsis: String,
    pub watch_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedRow {
    pub title: String,
    pub items: Vec<Card>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HomeView {
    pub hero: Vec<HeroSlide>,
    pub lists: Vec<FeedRow>,
}

impl HomeView {
    pub fn new(feed: &HomeFeed, image_base_url: &str) -> Self {
        let hero = feed
            .hero
            .iter()
            .map(|item| HeroSlide {
                card: Card::new(item, image_base_url),
                backdrop_url: image_url(image_base_url, item.backdrop_path(), ImageSize::Original),
                synopsis: item.synopsis().to_string(),
                watch_url: primary_link(item.key()),
            })
            .collect();
        let lists = feed
            .lists
            .iter()
            .map(|FeedList { title, items }| FeedRow {
                title: title.clone(),
                items: Card::list(items, image_base_url),
            })
            .collect();
        Self { hero, lists }
    }
}

/// One page of a filterable grid.
#[derive(Debug, Clone, Serialize)]
pub struct GridView {
    pub filters: GridFilters,
    pub page: u32,
    pub total_pages: u32,
    pub exhausted: bool,
    pub items: Vec<Card>,
}

impl GridView {
    pub fn new(filters: GridFilters, response: &CatalogPage, image_base_url: &str) -> Self {
        Self {
            filters,
            page: response.page,
            total_pages: response.total_pages,
            exhausted: response.is_last(),
            items: Card::list(&response.results, image_base_url),
        }
    }

    /// A page whose fetch failed: empty, and still open for a retry.
    pub fn failed(filters: GridFilters, page: u32) -> Self {
        Self {
            filters,
            page,
            total_pages: 0,
            exhausted: false,
            items: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchView {
    pub query: String,
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u32,
    pub items: Vec<Card>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CastCard {
    pub name: String,
    pub role: String,
    pub portrait_url: String,
}

impl CastCard {
    fn new(member: &CastMember, image_base_url: &str) -> Self {
        Self {
            name: member.name.clone(),
            role: member.role.clone(),
            portrait_url: image_url(
                image_base_url,
                member.portrait_path.as_deref(),
                ImageSize::W500,
            ),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Trailer {
    pub name: String,
    pub embed_url: String,
}

impl From<&Video> for Trailer {
    fn from(video: &Video) -> Self {
        Self {
            name: video.name.clone(),
            embed_url: format!("https://www.youtube.com/embed/{}", video.key),
        }
    }
}

/// The detail page for one title.
#[derive(Debug, Clone, Serialize)]
pub struct DetailsView {
    pub id: u32,
    pub media_type: MediaType,
    pub title: String,
    pub tagline: String,
    pub synopsis: String,
    pub rating: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_minutes: Option<u32>,
    pub genres: Vec<Genre>,
    pub poster_url: String,
    pub backdrop_url: String,
    pub cast: Vec<CastCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailer: Option<Trailer>,
    pub recommendations: Vec<Card>,
    pub released: bool,
    pub availability: Availability,
    pub in_watchlist: bool,
    /// Entry to send back when adding the title to the watchlist.
    pub watchlist_entry: MediaItem,
}

impl DetailsView {
    pub fn new(
        details: &MediaDetails,
        availability: Availability,
        in_watchlist: bool,
        image_base_url: &str,
    ) -> Self {
        let item = &details.item;
        Self {
            id: item.id(),
            media_type: item.media_type(),
            title: item.display_title().to_string(),
            tagline: details.tagline.clone(),
            synopsis: item.synopsis().to_string(),
            rating: item.rating(),
            year: item.year(),
            runtime_minutes: details.runtime_minutes,
            genres: details.genres.clone(),
            poster_url: image_url(image_base_url, item.poster_path(), ImageSize::W500),
            backdrop_url: image_url(image_base_url, item.backdrop_path(), ImageSize::Original),
            cast: details
                .billed_cast(CAST_LIMIT)
                .into_iter()
                .map(|c| CastCard::new(c, image_base_url))
                .collect(),
            trailer: details.trailer().map(Trailer::from),
            recommendations: Card::list(&details.recommendations, image_base_url),
            released: matches!(availability, Availability::Playable { .. }),
            availability,
            in_watchlist,
            watchlist_entry: details.summary(),
        }
    }
}

/// The "My List" page.
#[derive(Debug, Clone, Serialize)]
pub struct WatchlistView {
    pub count: usize,
    pub movies: Vec<Card>,
    pub shows: Vec<Card>,
}
