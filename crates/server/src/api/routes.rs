use axum::{
    middleware,
    routing::{delete, get},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::{browse, handlers, middleware::metrics_middleware, navigation, watchlist};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Address resolution
        .route("/route", get(navigation::resolve_route))
        .route("/static/{slug}", get(navigation::static_page))
        // Catalog views
        .route("/home", get(browse::home))
        .route("/movies", get(browse::movies))
        .route("/genres", get(browse::genres))
        .route("/genres/tabs", get(browse::genre_tabs))
        .route("/search", get(browse::search))
        .route("/details/{media_type}/{id}", get(browse::details))
        // My List
        .route("/watchlist", get(watchlist::list).post(watchlist::add))
        .route("/watchlist/{media_type}/{id}", delete(watchlist::remove));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/metrics", get(handlers::metrics))
        .with_state(state)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
