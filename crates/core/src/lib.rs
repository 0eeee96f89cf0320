pub mod announcer;
pub mod catalog;
pub mod config;
pub mod grid;
pub mod media;
pub mod metrics;
pub mod navigation;
pub mod playback;
pub mod store;
pub mod testing;
pub mod watchlist;

pub use announcer::{
    AnnounceError, Announcer, AnnouncerConfig, Messenger, RunSummary, TelegramMessenger,
};
pub use catalog::{
    build_home_feed, recover_page, Catalog, CatalogError, DiscoverQuery, FeedPlan, FeedSource,
    HomeFeed, ImageSize, TmdbClient, TmdbConfig,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
};
pub use grid::{
    FetchTicket, GenreTab, GridController, GridFetcher, GridFilters, GridPhase, PageFetcher,
    SortKey, GENRE_TABS,
};
pub use media::{CatalogPage, MediaDetails, MediaItem, MediaKey, MediaType};
pub use navigation::{
    History, Location, MemoryHistory, NavigationController, NavigationOutcome, SearchDebouncer,
    Section, StaticPage, ViewState,
};
pub use playback::{availability, is_released, playback_links, Availability, PlaybackLink};
pub use store::{KeyValueStore, MemoryKvStore, PersistentStore, SqliteKvStore, StoreError};
pub use watchlist::Watchlist;
