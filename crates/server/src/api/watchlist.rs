//! "My List" endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use cineflix_core::MediaItem;
use serde::Serialize;

use super::browse::parse_key;
use super::handlers::ApiError;
use super::views::{Card, WatchlistView};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct WatchlistChange {
    /// Whether the list actually changed.
    pub changed: bool,
    pub count: usize,
}

/// GET /api/v1/watchlist
pub async fn list(State(state): State<Arc<AppState>>) -> Json<WatchlistView> {
    let watchlist = state.watchlist().read().await;
    let base = state.image_base_url();
    Json(WatchlistView {
        count: watchlist.len(),
        movies: watchlist.movies().into_iter().map(|i| Card::new(i, base)).collect(),
        shows: watchlist.shows().into_iter().map(|i| Card::new(i, base)).collect(),
    })
}

/// POST /api/v1/watchlist
///
/// Adding a title already on the list leaves it unchanged.
pub async fn add(
    State(state): State<Arc<AppState>>,
    Json(item): Json<MediaItem>,
) -> Json<WatchlistChange> {
    let mut watchlist = state.watchlist().write().await;
    let changed = watchlist.add(item);
    Json(WatchlistChange {
        changed,
        count: watchlist.len(),
    })
}

/// DELETE /api/v1/watchlist/{media_type}/{id}
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path((media_type, id)): Path<(String, String)>,
) -> Result<Json<WatchlistChange>, ApiError> {
    let key = parse_key(&media_type, &id)?;
    let mut watchlist = state.watchlist().write().await;
    let changed = watchlist.remove(key);
    Ok(Json(WatchlistChange {
        changed,
        count: watchlist.len(),
    }))
}
