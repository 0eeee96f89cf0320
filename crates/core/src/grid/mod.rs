//! Paginated, filterable grids (all movies, movies by genre).

mod controller;
mod fetcher;
mod query;

pub use controller::{FetchTicket, GridController, GridPhase};
pub use fetcher::{GridFetcher, PageFetcher, RATING_VOTE_FLOOR};
pub use query::{year_options, GenreTab, GridFilters, SortKey, GENRE_TABS, MIN_YEAR};
