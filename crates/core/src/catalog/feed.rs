//! Home feed assembly.
//!
//! The home view shows a fixed, ordered plan of named lists. All lists are
//! fetched concurrently; results are then walked in declaration order so
//! that a title appearing in an earlier list is removed from every later
//! one. Lists left empty are omitted.

use std::collections::HashSet;

use chrono::NaiveDate;
use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, warn};

use super::{Catalog, CatalogError, DiscoverQuery};
use crate::media::{CatalogPage, MediaItem, MediaKey, MediaType};
use crate::metrics::FEED_LIST_FAILURES;

/// Number of titles rotating in the hero carousel.
pub const HERO_SIZE: usize = 7;

/// Lists whose head becomes the hero carousel, in order of preference.
const HERO_SOURCES: [&str; 2] = ["Recent Movie Releases", "Trending Movies"];

/// Where a feed list comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedSource {
    Trending(MediaType),
    Popular(MediaType),
    TopRated(MediaType),
    Discover(DiscoverQuery),
}

impl FeedSource {
    async fn fetch(&self, catalog: &dyn Catalog) -> Result<CatalogPage, CatalogError> {
        match self {
            FeedSource::Trending(t) => catalog.trending(Some(*t), 1).await,
            FeedSource::Popular(t) => catalog.popular(*t, 1).await,
            FeedSource::TopRated(t) => catalog.top_rated(*t, 1).await,
            FeedSource::Discover(q) => catalog.discover_movies(q, 1).await,
        }
    }
}

/// Ordered set of lists making up the home feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedPlan {
    entries: Vec<(String, FeedSource)>,
}

impl FeedPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, title: impl Into<String>, source: FeedSource) -> Self {
        self.entries.push((title.into(), source));
        self
    }

    /// The standard home page lineup.
    pub fn standard(today: NaiveDate) -> Self {
        use FeedSource::*;
        use MediaType::{Movie, Tv};

        Self::new()
            .with(
                "Recent Movie Releases",
                Discover(DiscoverQuery::recent_releases(today)),
            )
            .with("Trending Movies", Trending(Movie))
            .with("Trending TV Shows", Trending(Tv))
            .with("Popular Movies", Popular(Movie))
            .with("Popular TV Shows", Popular(Tv))
            .with("Top Rated Movies", TopRated(Movie))
            .with("Top Rated TV Shows", TopRated(Tv))
            .with("Action Movies", Discover(DiscoverQuery::genres("28")))
            .with("Comedy Movies", Discover(DiscoverQuery::genres("35")))
            .with("Horror Movies", Discover(DiscoverQuery::genres("27")))
            .with("Thriller Movies", Discover(DiscoverQuery::genres("53")))
            .with(
                "Sci-fi & Fantasy Movies",
                Discover(DiscoverQuery::genres("878,14")),
            )
            .with("Documentaries", Discover(DiscoverQuery::genres("99")))
            .with("Romance Movies", Discover(DiscoverQuery::genres("10749")))
            .with("Crime Movies", Discover(DiscoverQuery::genres("80")))
            .with("Drama Movies", Discover(DiscoverQuery::genres("18")))
            .with("Mystery Movies", Discover(DiscoverQuery::genres("9648")))
            .with(
                "Bollywood Movies",
                Discover(DiscoverQuery::origin_country("IN")),
            )
            .with(
                "Family & Animation",
                Discover(DiscoverQuery::genres("16,10751")),
            )
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(t, _)| t.as_str())
    }
}

/// A named row of the home feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedList {
    pub title: String,
    pub items: Vec<MediaItem>,
}

/// Everything the home view renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HomeFeed {
    /// Hero carousel (single hero is the one-item case).
    pub hero: Vec<MediaItem>,
    pub lists: Vec<FeedList>,
}

/// Remove titles already shown by an earlier list.
///
/// Walks lists in the given order with a set of seen keys; lists that end up
/// empty are dropped.
pub fn dedup_lists(lists: Vec<(String, Vec<MediaItem>)>) -> Vec<FeedList> {
    let mut seen: HashSet<MediaKey> = HashSet::new();
    let mut out = Vec::new();

    for (title, items) in lists {
        let unique: Vec<MediaItem> = items
            .into_iter()
            .filter(|item| seen.insert(item.key()))
            .collect();
        if unique.is_empty() {
            debug!("Feed list '{}' empty after de-duplication, omitted", title);
            continue;
        }
        out.push(FeedList {
            title,
            items: unique,
        });
    }

    out
}

/// Pick the hero carousel from the de-duplicated lists.
pub fn select_hero(lists: &[FeedList]) -> Vec<MediaItem> {
    HERO_SOURCES
        .iter()
        .find_map(|name| lists.iter().find(|l| l.title == *name))
        .map(|l| l.items.iter().take(HERO_SIZE).cloned().collect())
        .unwrap_or_default()
}

/// Fetch and assemble the home feed.
///
/// A failing list is replaced by an empty one; it never aborts the others.
pub async fn build_home_feed(catalog: &dyn Catalog, plan: &FeedPlan) -> HomeFeed {
    let fetches = plan
        .entries
        .iter()
        .map(|(_, source)| source.fetch(catalog));
    // join_all yields in input order regardless of completion order.
    let responses = join_all(fetches).await;

    let lists = plan
        .entries
        .iter()
        .zip(responses)
        .map(|((title, _), response)| {
            let items = match response {
                Ok(page) => page.results,
                Err(e) => {
                    warn!(list = %title, error = %e, "Feed list failed, substituting empty list");
                    FEED_LIST_FAILURES.inc();
                    Vec::new()
                }
            };
            (title.clone(), items)
        })
        .collect();

    let lists = dedup_lists(lists);
    let hero = select_hero(&lists);
    HomeFeed { hero, lists }
}
