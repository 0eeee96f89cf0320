//! Presentation endpoints driven in-process against a mocked catalog.

mod common;

use axum::http::StatusCode;
use cineflix_core::testing::RecordedCatalogQuery;
use cineflix_core::{CatalogError, MediaKey};
use serde_json::json;

use common::{fixtures, TestFixture};

// =============================================================================
// Basics
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/api/v1/health").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_config_hides_api_key() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/api/v1/config").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["catalog"]["api_key_configured"], true);
    assert!(!response.text.contains("test-key"));
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let fixture = TestFixture::new().await;
    fixture.get("/api/v1/health").await;

    let response = fixture.get("/metrics").await;
    assert_status!(response, StatusCode::OK);
    assert!(response.text.contains("cineflix_http_requests_total"));
    assert!(response.text.contains("cineflix_watchlist_entries"));
}

// =============================================================================
// Routing
// =============================================================================

#[tokio::test]
async fn test_route_resolves_details() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/api/v1/route?path=%2Fmovie%2F603").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["view"]["view"], "details");
    assert_eq!(response.body["view"]["media"]["id"], 603);
    assert_eq!(response.body["view"]["media"]["media_type"], "movie");
    assert_eq!(response.body["location"], "/movie/603");
}

#[tokio::test]
async fn test_route_malformed_id_is_home() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/api/v1/route?path=%2Ftv%2F45x").await;
    assert_eq!(response.body["view"]["view"], "home");
    assert_eq!(response.body["location"], "/");
}

#[tokio::test]
async fn test_route_search_decodes_query() {
    let fixture = TestFixture::new().await;
    let response = fixture
        .get("/api/v1/route?path=%2Fsearch%3Fq%3Dstar%2520wars")
        .await;
    assert_eq!(response.body["view"]["view"], "search");
    assert_eq!(response.body["view"]["query"], "star wars");
    assert_eq!(response.body["location"], "/search?q=star%20wars");
}

#[tokio::test]
async fn test_route_static_page() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/api/v1/route?path=%2Fabout-us").await;
    assert_eq!(response.body["view"]["view"], "static");
    assert_eq!(response.body["view"]["page"], "about-us");
}

#[tokio::test]
async fn test_static_page_lookup() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/api/v1/static/privacy-policy").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["slug"], "privacy-policy");
    assert!(response.body["title"].is_string());

    let missing = fixture.get("/api/v1/static/careers").await;
    assert_status!(missing, StatusCode::NOT_FOUND);
}

// =============================================================================
// Home feed
// =============================================================================

#[tokio::test]
async fn test_home_dedups_across_lists_and_builds_hero() {
    let fixture = TestFixture::new().await;
    // Every discover list falls back to this page; only the first keeps it.
    fixture
        .catalog
        .set_page(
            "discover",
            fixtures::page(vec![fixtures::movie(1, "Fresh"), fixtures::movie(2, "Newer")], 1, 1),
        )
        .await;
    fixture
        .catalog
        .set_page(
            "trending/movie",
            fixtures::page(vec![fixtures::movie(2, "Newer"), fixtures::movie(3, "Hot")], 1, 1),
        )
        .await;
    fixture.catalog.fail_listing("popular/tv").await;

    let response = fixture.get("/api/v1/home").await;
    assert_status!(response, StatusCode::OK);

    let lists = response.body["lists"].as_array().unwrap();
    assert_eq!(lists.len(), 2);
    assert_eq!(lists[0]["title"], "Recent Movie Releases");
    assert_eq!(lists[1]["title"], "Trending Movies");
    assert_eq!(lists[1]["items"].as_array().unwrap().len(), 1);
    assert_eq!(lists[1]["items"][0]["id"], 3);

    let hero = response.body["hero"].as_array().unwrap();
    assert_eq!(hero.len(), 2);
    assert_eq!(hero[0]["title"], "Fresh");
    assert_eq!(hero[0]["watch_url"], "https://vidsrc.to/embed/movie/1");
    assert_eq!(
        hero[0]["poster_url"],
        "https://img.test/t/p/w500/poster-1.jpg"
    );
}

// =============================================================================
// Grids
// =============================================================================

#[tokio::test]
async fn test_movies_grid_page() {
    let fixture = TestFixture::new().await;
    fixture
        .catalog
        .set_page(
            "discover?sort_by=popularity.desc",
            fixtures::page(vec![fixtures::movie(10, "Ten")], 1, 3),
        )
        .await;

    let response = fixture.get("/api/v1/movies").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["page"], 1);
    assert_eq!(response.body["exhausted"], false);
    assert_eq!(response.body["filters"]["sort"], "popularity.desc");
    assert_eq!(response.body["items"][0]["title"], "Ten");
}

#[tokio::test]
async fn test_movies_rating_sort_applies_vote_floor() {
    let fixture = TestFixture::new().await;
    let response = fixture
        .get("/api/v1/movies?sort=vote_average.desc&year=2023&page=2")
        .await;
    assert_status!(response, StatusCode::OK);

    let queries = fixture.catalog.recorded_queries().await;
    match &queries[0] {
        RecordedCatalogQuery::Discover { query, page } => {
            assert_eq!(*page, 2);
            assert_eq!(query.get("vote_count.gte"), Some("200"));
            assert_eq!(query.get("primary_release_year"), Some("2023"));
        }
        other => panic!("unexpected query {:?}", other),
    }
}

#[tokio::test]
async fn test_movies_rejects_unknown_sort() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/api/v1/movies?sort=name.asc").await;
    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_eq!(fixture.catalog.query_count().await, 0);
}

#[tokio::test]
async fn test_genres_defaults_to_first_tab() {
    let fixture = TestFixture::new().await;
    fixture
        .catalog
        .set_page(
            "discover?sort_by=popularity.desc&with_genres=28",
            fixtures::page(vec![fixtures::movie(5, "Explosions")], 1, 1),
        )
        .await;

    let response = fixture.get("/api/v1/genres").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["filters"]["genre"], 28);
    assert_eq!(response.body["exhausted"], true);
    assert_eq!(response.body["items"][0]["id"], 5);
}

#[tokio::test]
async fn test_grid_failure_is_empty_page() {
    let fixture = TestFixture::new().await;
    fixture
        .catalog
        .set_next_error(CatalogError::RateLimitExceeded)
        .await;

    let response = fixture.get("/api/v1/genres?genre=35").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["items"].as_array().unwrap().len(), 0);
    assert_eq!(response.body["exhausted"], false);
}

#[tokio::test]
async fn test_failed_later_page_can_be_retried() {
    let fixture = TestFixture::new().await;
    fixture
        .catalog
        .set_next_error(CatalogError::RateLimitExceeded)
        .await;

    let response = fixture.get("/api/v1/movies?page=2").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["page"], 2);
    assert_eq!(response.body["exhausted"], false);
}

#[tokio::test]
async fn test_genre_tabs() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/api/v1/genres/tabs").await;
    assert_status!(response, StatusCode::OK);

    let tabs = response.body["tabs"].as_array().unwrap();
    assert_eq!(tabs.len(), 9);
    assert_eq!(tabs[0]["label"], "Action");
    assert_eq!(response.body["sorts"].as_array().unwrap().len(), 6);

    let years = response.body["years"].as_array().unwrap();
    assert_eq!(years.first().unwrap(), 2024);
    assert_eq!(years.last().unwrap(), 1950);
}

// =============================================================================
// Search
// =============================================================================

#[tokio::test]
async fn test_blank_search_skips_catalog() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/api/v1/search?q=%20%20").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["query"], "");
    assert_eq!(response.body["items"].as_array().unwrap().len(), 0);
    assert_eq!(fixture.catalog.query_count().await, 0);
}

#[tokio::test]
async fn test_search_returns_results() {
    let fixture = TestFixture::new().await;
    fixture
        .catalog
        .set_page(
            "search?q=heat",
            fixtures::page(vec![fixtures::movie(949, "Heat")], 1, 1),
        )
        .await;

    let response = fixture.get("/api/v1/search?q=heat").await;
    assert_eq!(response.body["total_results"], 1);
    assert_eq!(response.body["items"][0]["title"], "Heat");
}

// =============================================================================
// Details
// =============================================================================

#[tokio::test]
async fn test_details_released_title() {
    let fixture = TestFixture::new().await;
    fixture
        .catalog
        .add_details(fixtures::details(fixtures::movie(603, "The Matrix")))
        .await;

    let response = fixture.get("/api/v1/details/movie/603").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["title"], "The Matrix");
    assert_eq!(response.body["released"], true);
    assert_eq!(response.body["availability"]["status"], "playable");
    assert_eq!(
        response.body["availability"]["links"].as_array().unwrap().len(),
        3
    );
    assert_eq!(response.body["in_watchlist"], false);
    // Only cast with portraits are shown.
    assert_eq!(response.body["cast"].as_array().unwrap().len(), 1);
    assert_eq!(
        response.body["trailer"]["embed_url"],
        "https://www.youtube.com/embed/yt603"
    );
}

#[tokio::test]
async fn test_details_unreleased_title_is_coming_soon() {
    let fixture = TestFixture::new().await;
    let release = chrono::NaiveDate::from_ymd_opt(2030, 1, 1);
    fixture
        .catalog
        .add_details(fixtures::details(fixtures::movie_released(
            77, "Sequel", release,
        )))
        .await;

    let response = fixture.get("/api/v1/details/movie/77").await;
    assert_eq!(response.body["released"], false);
    assert_eq!(response.body["availability"]["status"], "coming_soon");
    assert_eq!(response.body["availability"]["release_date"], "2030-01-01");
}

#[tokio::test]
async fn test_details_unknown_title_is_404() {
    let fixture = TestFixture::new().await;

    let missing = fixture.get("/api/v1/details/tv/1399").await;
    assert_status!(missing, StatusCode::NOT_FOUND);

    let malformed = fixture.get("/api/v1/details/tv/45x").await;
    assert_status!(malformed, StatusCode::NOT_FOUND);

    let bad_type = fixture.get("/api/v1/details/person/1").await;
    assert_status!(bad_type, StatusCode::NOT_FOUND);
}

// =============================================================================
// Watchlist
// =============================================================================

#[tokio::test]
async fn test_watchlist_add_is_idempotent() {
    let fixture = TestFixture::new().await;
    let item = serde_json::to_value(fixtures::movie(603, "The Matrix")).unwrap();

    let first = fixture.post("/api/v1/watchlist", item.clone()).await;
    assert_status!(first, StatusCode::OK);
    assert_eq!(first.body["changed"], true);
    assert_eq!(first.body["count"], 1);

    let second = fixture.post("/api/v1/watchlist", item).await;
    assert_eq!(second.body["changed"], false);
    assert_eq!(second.body["count"], 1);
}

#[tokio::test]
async fn test_watchlist_sections_and_remove() {
    let fixture = TestFixture::new().await;
    fixture
        .post(
            "/api/v1/watchlist",
            serde_json::to_value(fixtures::movie(1, "Film")).unwrap(),
        )
        .await;
    fixture
        .post(
            "/api/v1/watchlist",
            serde_json::to_value(fixtures::show(1, "Series")).unwrap(),
        )
        .await;

    let listed = fixture.get("/api/v1/watchlist").await;
    assert_eq!(listed.body["count"], 2);
    assert_eq!(listed.body["movies"][0]["title"], "Film");
    assert_eq!(listed.body["shows"][0]["title"], "Series");

    // Same numeric id, different type: only the show goes.
    let removed = fixture.delete("/api/v1/watchlist/tv/1").await;
    assert_eq!(removed.body["changed"], true);
    assert_eq!(removed.body["count"], 1);

    let again = fixture.delete("/api/v1/watchlist/tv/1").await;
    assert_eq!(again.body["changed"], false);
}

#[tokio::test]
async fn test_watchlist_membership_shows_on_details() {
    let fixture = TestFixture::new().await;
    let item = fixtures::show(1399, "Thrones");
    fixture.catalog.add_details(fixtures::details(item.clone())).await;
    fixture
        .post("/api/v1/watchlist", serde_json::to_value(&item).unwrap())
        .await;

    let response = fixture.get("/api/v1/details/tv/1399").await;
    assert_eq!(response.body["in_watchlist"], true);
    assert_eq!(response.body["watchlist_entry"]["media_type"], "tv");
    assert_eq!(
        fixture.catalog.recorded_queries().await,
        vec![RecordedCatalogQuery::Details {
            key: MediaKey::tv(1399)
        }]
    );
}

#[tokio::test]
async fn test_watchlist_survives_restart() {
    let fixture = TestFixture::new().await;
    fixture
        .post(
            "/api/v1/watchlist",
            serde_json::to_value(fixtures::movie(42, "Answer")).unwrap(),
        )
        .await;

    let TestFixture { temp_dir, .. } = fixture;
    let restarted = TestFixture::with_dir(temp_dir);

    let listed = restarted.get("/api/v1/watchlist").await;
    assert_eq!(listed.body["count"], 1);
    assert_eq!(listed.body["movies"][0]["id"], 42);
}
