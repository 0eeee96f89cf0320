//! Address resolution and static pages.

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use cineflix_core::{Location, StaticPage, ViewState};
use serde::{Deserialize, Serialize};

use super::handlers::{api_error, ApiError};

#[derive(Debug, Deserialize)]
pub struct RouteParams {
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub view: ViewState,
    /// Canonical address of the resolved view.
    pub location: String,
}

#[derive(Debug, Serialize)]
pub struct StaticPageResponse {
    pub slug: &'static str,
    pub title: &'static str,
}

/// GET /api/v1/route?path=...
///
/// Resolves an address to the view it shows. Anything unrecognized is Home.
pub async fn resolve_route(Query(params): Query<RouteParams>) -> Json<RouteResponse> {
    let raw = if params.path.is_empty() {
        "/"
    } else {
        params.path.as_str()
    };
    let view = ViewState::from_location(&Location::parse(raw));
    let location = view.location().to_string();
    Json(RouteResponse { view, location })
}

/// GET /api/v1/static/{slug}
pub async fn static_page(Path(slug): Path<String>) -> Result<Json<StaticPageResponse>, ApiError> {
    let page = StaticPage::from_slug(&slug)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("Unknown page: {}", slug)))?;
    Ok(Json(StaticPageResponse {
        slug: page.slug(),
        title: page.title(),
    }))
}
