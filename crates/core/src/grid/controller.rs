use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, warn};

use super::fetcher::PageFetcher;
use super::query::{GenreTab, GridFilters, SortKey};
use crate::catalog::CatalogError;
use crate::media::{CatalogPage, MediaItem, MediaKey};
use crate::metrics::GRID_STALE_RESPONSES;

/// Loading state of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GridPhase {
    Idle,
    Loading,
    Exhausted,
}

/// Permission to complete one page fetch.
///
/// Carries the filters and page to request. A ticket issued before the
/// latest filter change is stale and its response is discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    page: u32,
    filters: GridFilters,
}

impl FetchTicket {
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn filters(&self) -> &GridFilters {
        &self.filters
    }
}

/// Infinite-scroll state for one grid view.
///
/// At most one fetch is outstanding. Callers either drive fetches
/// themselves (`ticket` from a state change, then [`complete`](Self::complete))
/// or use [`load`](Self::load) with the injected fetcher.
pub struct GridController<F: PageFetcher> {
    fetcher: F,
    tabs: Vec<GenreTab>,
    filters: GridFilters,
    items: Vec<MediaItem>,
    seen: HashSet<MediaKey>,
    /// Last page successfully merged, 0 before the first.
    loaded_page: u32,
    phase: GridPhase,
    generation: u64,
    in_flight: Option<FetchTicket>,
}

impl<F: PageFetcher> GridController<F> {
    /// Grid without genre tabs.
    pub fn new(fetcher: F) -> Self {
        Self::with_tabs(fetcher, Vec::new())
    }

    /// Grid with genre tabs, the first one selected.
    pub fn with_tabs(fetcher: F, tabs: Vec<GenreTab>) -> Self {
        let filters = GridFilters {
            genre: tabs.first().map(|t| t.genre_id),
            ..Default::default()
        };
        Self {
            fetcher,
            tabs,
            filters,
            items: Vec::new(),
            seen: HashSet::new(),
            loaded_page: 0,
            phase: GridPhase::Idle,
            generation: 0,
            in_flight: None,
        }
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn filters(&self) -> &GridFilters {
        &self.filters
    }

    pub fn tabs(&self) -> &[GenreTab] {
        &self.tabs
    }

    pub fn phase(&self) -> GridPhase {
        self.phase
    }

    /// Last page merged into `items`.
    pub fn page(&self) -> u32 {
        self.loaded_page
    }

    pub fn is_loading(&self) -> bool {
        self.phase == GridPhase::Loading
    }

    pub fn is_exhausted(&self) -> bool {
        self.phase == GridPhase::Exhausted
    }

    /// Begin loading from page 1.
    pub fn start(&mut self) -> FetchTicket {
        self.reset()
    }

    /// Select a genre tab. Unknown tabs and the current tab are ignored.
    pub fn set_tab(&mut self, genre_id: u32) -> Option<FetchTicket> {
        if self.filters.genre == Some(genre_id) || !self.tabs.iter().any(|t| t.genre_id == genre_id)
        {
            return None;
        }
        self.filters.genre = Some(genre_id);
        Some(self.reset())
    }

    pub fn set_sort(&mut self, sort: SortKey) -> Option<FetchTicket> {
        if self.filters.sort == sort {
            return None;
        }
        self.filters.sort = sort;
        Some(self.reset())
    }

    /// Restrict to a release year, `None` for all years.
    pub fn set_year(&mut self, year: Option<i32>) -> Option<FetchTicket> {
        if self.filters.year == year {
            return None;
        }
        self.filters.year = year;
        Some(self.reset())
    }

    /// Back to the first tab, default sort and no year.
    pub fn reset_filters(&mut self) -> Option<FetchTicket> {
        let defaults = GridFilters {
            genre: self.tabs.first().map(|t| t.genre_id),
            ..Default::default()
        };
        if self.filters == defaults {
            return None;
        }
        self.filters = defaults;
        Some(self.reset())
    }

    /// The end of the grid scrolled into view.
    ///
    /// Requests the next page unless a fetch is outstanding or the listing
    /// is exhausted.
    pub fn sentinel_visible(&mut self) -> Option<FetchTicket> {
        if self.phase != GridPhase::Idle {
            return None;
        }
        Some(self.issue(self.loaded_page + 1))
    }

    /// Apply the outcome of a fetch. Returns false if the ticket was stale.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<CatalogPage, CatalogError>,
    ) -> bool {
        if self.in_flight.as_ref() != Some(&ticket) {
            debug!(
                "Discarding stale grid response for page {} (generation {}, current {})",
                ticket.page, ticket.generation, self.generation
            );
            GRID_STALE_RESPONSES.inc();
            return false;
        }
        self.in_flight = None;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                warn!(page = ticket.page, error = %e, "Grid page failed to load");
                self.phase = GridPhase::Idle;
                return true;
            }
        };

        if ticket.page == 1 {
            self.items.clear();
            self.seen.clear();
        }
        let exhausted = response.is_last();
        for item in response.results {
            if self.seen.insert(item.key()) {
                self.items.push(item);
            }
        }
        self.loaded_page = ticket.page;
        self.phase = if exhausted {
            GridPhase::Exhausted
        } else {
            GridPhase::Idle
        };

        debug!(
            "Grid page {} loaded, {} items, phase {:?}",
            ticket.page,
            self.items.len(),
            self.phase
        );
        true
    }

    /// Fetch the ticket's page with the injected fetcher and apply it.
    pub async fn load(&mut self, ticket: FetchTicket) -> bool {
        let result = self.fetcher.fetch(&ticket.filters, ticket.page).await;
        self.complete(ticket, result)
    }

    fn reset(&mut self) -> FetchTicket {
        self.generation += 1;
        self.items.clear();
        self.seen.clear();
        self.loaded_page = 0;
        self.issue(1)
    }

    fn issue(&mut self, page: u32) -> FetchTicket {
        let ticket = FetchTicket {
            generation: self.generation,
            page,
            filters: self.filters.clone(),
        };
        self.phase = GridPhase::Loading;
        self.in_flight = Some(ticket.clone());
        ticket
    }
}
