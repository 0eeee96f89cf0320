//! Catalog-backed views: home feed, grids, search and details.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Datelike;
use cineflix_core::{
    availability, build_home_feed, grid::year_options, recover_page, CatalogError, CatalogPage,
    FeedPlan, GenreTab, GridFetcher, GridFilters, MediaKey, MediaType, PageFetcher, SortKey,
    GENRE_TABS,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::handlers::{api_error, ApiError};
use super::views::{Card, DetailsView, GridView, HomeView, SearchView};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GridParams {
    pub genre: Option<u32>,
    pub sort: Option<String>,
    pub year: Option<i32>,
    pub page: Option<u32>,
}

impl GridParams {
    fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    fn filters(&self, genre: Option<u32>) -> Result<GridFilters, ApiError> {
        let sort = match self.sort.as_deref() {
            None | Some("") => SortKey::default(),
            Some(raw) => raw
                .parse()
                .map_err(|e: String| api_error(StatusCode::BAD_REQUEST, e))?,
        };
        Ok(GridFilters {
            genre,
            sort,
            year: self.year,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub page: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct SortOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct GenreTabsResponse {
    pub tabs: &'static [GenreTab],
    pub sorts: Vec<SortOption>,
    pub years: Vec<i32>,
}

/// GET /api/v1/home
pub async fn home(State(state): State<Arc<AppState>>) -> Json<HomeView> {
    let plan = FeedPlan::standard(state.today());
    let catalog = state.catalog();
    let feed = build_home_feed(catalog.as_ref(), &plan).await;
    Json(HomeView::new(&feed, state.image_base_url()))
}

async fn grid_page(
    state: &AppState,
    filters: GridFilters,
    page: u32,
    context: &str,
) -> GridView {
    let fetcher = GridFetcher::new(state.catalog());
    match fetcher.fetch(&filters, page).await {
        Ok(response) => GridView::new(filters, &response, state.image_base_url()),
        Err(e) => {
            warn!(context = %context, page, error = %e, "Grid page failed, leaving it open for retry");
            GridView::failed(filters, page)
        }
    }
}

/// GET /api/v1/movies?sort=&year=&page=
pub async fn movies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GridParams>,
) -> Result<Json<GridView>, ApiError> {
    let filters = params.filters(None)?;
    Ok(Json(
        grid_page(&state, filters, params.page(), "movies").await,
    ))
}

/// GET /api/v1/genres?genre=&sort=&year=&page=
///
/// Without a genre the first tab is shown.
pub async fn genres(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GridParams>,
) -> Result<Json<GridView>, ApiError> {
    let genre = params.genre.unwrap_or(GENRE_TABS[0].genre_id);
    let filters = params.filters(Some(genre))?;
    Ok(Json(
        grid_page(&state, filters, params.page(), "genres").await,
    ))
}

/// GET /api/v1/genres/tabs
pub async fn genre_tabs(State(state): State<Arc<AppState>>) -> Json<GenreTabsResponse> {
    Json(GenreTabsResponse {
        tabs: &GENRE_TABS,
        sorts: SortKey::ALL
            .iter()
            .map(|s| SortOption {
                value: s.as_param(),
                label: s.label(),
            })
            .collect(),
        years: year_options(state.today().year()),
    })
}

/// GET /api/v1/search?q=&page=
///
/// A blank query is the empty-result state and never reaches the catalog.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<SearchView> {
    let query = params.q.trim().to_string();
    let page = params.page.unwrap_or(1).max(1);

    let response = if query.is_empty() {
        debug!("Blank search query, skipping catalog");
        CatalogPage::empty(page)
    } else {
        recover_page(state.catalog().search(&query, page).await, page, "search")
    };

    Json(SearchView {
        query,
        page: response.page,
        total_pages: response.total_pages,
        total_results: response.total_results,
        items: Card::list(&response.results, state.image_base_url()),
    })
}

/// GET /api/v1/details/{media_type}/{id}
pub async fn details(
    State(state): State<Arc<AppState>>,
    Path((media_type, id)): Path<(String, String)>,
) -> Result<Json<DetailsView>, ApiError> {
    let key = parse_key(&media_type, &id)?;

    let details = state.catalog().details(key).await.map_err(|e| {
        if matches!(e, CatalogError::NotFound(_)) {
            debug!("Details for {} not found", key);
        } else {
            warn!("Failed to load details for {}: {}", key, e);
        }
        api_error(StatusCode::NOT_FOUND, format!("Title not found: {}", key))
    })?;

    let in_watchlist = state.watchlist().read().await.contains(key);
    let availability = availability(key, details.item.release_date(), state.today());
    Ok(Json(DetailsView::new(
        &details,
        availability,
        in_watchlist,
        state.image_base_url(),
    )))
}

/// `movie|tv` plus a decimal id; anything else is an unknown title.
pub(crate) fn parse_key(media_type: &str, id: &str) -> Result<MediaKey, ApiError> {
    let not_found = || {
        api_error(
            StatusCode::NOT_FOUND,
            format!("Title not found: {}/{}", media_type, id),
        )
    };
    let media_type: MediaType = media_type.parse().map_err(|_| not_found())?;
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(not_found());
    }
    let id: u32 = id.parse().map_err(|_| not_found())?;
    Ok(MediaKey::new(id, media_type))
}
