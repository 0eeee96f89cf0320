//! In-process test fixture.
//!
//! Builds the full router over a [`MockCatalog`] and a SQLite-backed
//! watchlist in a temporary directory, then drives it with `oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use cineflix_core::{
    testing::MockCatalog, Catalog, Config, PersistentStore, SqliteKvStore, TmdbConfig, Watchlist,
};
use cineflix_server::state::AppState;

/// Re-export fixtures for test convenience
pub use cineflix_core::testing::fixtures;

/// Date every fixture request runs on.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

pub struct TestFixture {
    pub router: Router,
    pub catalog: Arc<MockCatalog>,
    /// Keeps the database alive for the fixture's lifetime.
    pub temp_dir: TempDir,
}

#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub text: String,
}

impl TestFixture {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self::with_dir(temp_dir)
    }

    /// Build a fixture over an existing directory, reusing its database.
    pub fn with_dir(temp_dir: TempDir) -> Self {
        let db_path = temp_dir.path().join("cineflix.db");
        let catalog = Arc::new(MockCatalog::new());

        let config = Config {
            server: Default::default(),
            catalog: TmdbConfig {
                api_key: "test-key".to_string(),
                base_url: None,
                image_base_url: Some("https://img.test/t/p".to_string()),
                timeout_secs: 5,
            },
            storage: cineflix_core::config::StorageConfig {
                path: db_path.clone(),
            },
            search: Default::default(),
            announcer: None,
        };

        let backend = SqliteKvStore::new(&db_path).expect("Failed to open store");
        let watchlist = Watchlist::load(PersistentStore::new(Arc::new(backend)));

        let state = Arc::new(
            AppState::new(
                config,
                Arc::clone(&catalog) as Arc<dyn Catalog>,
                watchlist,
            )
            .with_today(today()),
        );

        Self {
            router: cineflix_server::api::create_router(state),
            catalog,
            temp_dir,
        }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None).await
    }

    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).to_string();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body, text }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status, $response.status, $response.text
        );
    };
}
