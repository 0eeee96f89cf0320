//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Catalog requests (per endpoint, with latency)
//! - Home feed list failures
//! - Grid responses discarded as stale
//! - Release announcements

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Catalog
// =============================================================================

/// Catalog requests by endpoint and result.
pub static CATALOG_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "cineflix_catalog_requests_total",
            "Total requests sent to the catalog API",
        ),
        &["endpoint", "result"], // result: "ok", "error"
    )
    .unwrap()
});

/// Catalog request latency.
pub static CATALOG_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "cineflix_catalog_request_duration_seconds",
            "Duration of catalog API requests",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["endpoint"],
    )
    .unwrap()
});

// =============================================================================
// Browsing
// =============================================================================

/// Home feed lists replaced by an empty list after a failed fetch.
pub static FEED_LIST_FAILURES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "cineflix_feed_list_failures_total",
        "Home feed lists that failed to load",
    )
    .unwrap()
});

/// Grid page responses dropped because the filters changed meanwhile.
pub static GRID_STALE_RESPONSES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "cineflix_grid_stale_responses_total",
        "Grid page responses discarded as stale",
    )
    .unwrap()
});

// =============================================================================
// Announcer
// =============================================================================

/// Release announcements by result.
pub static ANNOUNCEMENTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "cineflix_announcements_total",
            "Release announcements attempted",
        ),
        &["result"], // "posted", "failed"
    )
    .unwrap()
});

/// Get all core metrics for registration.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(CATALOG_REQUESTS.clone()),
        Box::new(CATALOG_REQUEST_DURATION.clone()),
        Box::new(FEED_LIST_FAILURES.clone()),
        Box::new(GRID_STALE_RESPONSES.clone()),
        Box::new(ANNOUNCEMENTS.clone()),
    ]
}
