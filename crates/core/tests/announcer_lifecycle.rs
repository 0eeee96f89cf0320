//! Announcer runs against a SQLite store and the mock messenger.

use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use tokio_test::assert_ok;

use cineflix_core::{
    testing::{fixtures, MockCatalog, MockMessenger},
    Announcer, AnnouncerConfig, PersistentStore, SqliteKvStore,
};

struct TestHarness {
    catalog: Arc<MockCatalog>,
    messenger: Arc<MockMessenger>,
    store: PersistentStore,
    _temp_dir: TempDir,
}

impl TestHarness {
    async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let backend = SqliteKvStore::new(&temp_dir.path().join("test.db"))
            .expect("Failed to open store");

        let catalog = Arc::new(MockCatalog::new());
        catalog
            .set_page(
                "now_playing",
                fixtures::page(
                    vec![
                        fixtures::movie(1, "First"),
                        fixtures::show(2, "Not A Movie"),
                        fixtures::movie(3, "Third"),
                    ],
                    1,
                    2,
                ),
            )
            .await;
        catalog
            .set_page(
                "now_playing",
                fixtures::page(vec![fixtures::movie(3, "Third"), fixtures::movie(4, "Fourth")], 2, 2),
            )
            .await;

        Self {
            catalog,
            messenger: Arc::new(MockMessenger::new()),
            store: PersistentStore::new(Arc::new(backend)),
            _temp_dir: temp_dir,
        }
    }

    fn announcer(&self, post_limit: usize) -> Announcer {
        let config = AnnouncerConfig {
            enabled: true,
            bot_token: "123:abc".to_string(),
            chat_id: "@cineflix".to_string(),
            post_limit,
            interval_secs: 60,
            send_delay_ms: 0,
            ..Default::default()
        };
        Announcer::new(
            config,
            self.catalog.clone(),
            self.messenger.clone(),
            self.store.clone(),
            "https://image.tmdb.org/t/p",
        )
    }
}

#[tokio::test]
async fn test_history_carries_over_between_announcers() {
    let harness = TestHarness::new().await;

    let first = assert_ok!(harness.announcer(2).run_once().await);
    assert_eq!(first.posted, vec![1, 3]);

    // A fresh announcer over the same store only sees what is left.
    let second = assert_ok!(harness.announcer(2).run_once().await);
    assert_eq!(second.candidates, 1);
    assert_eq!(second.posted, vec![4]);

    let third = assert_ok!(harness.announcer(2).run_once().await);
    assert_eq!(third.candidates, 0);
    assert!(third.posted.is_empty());

    assert_eq!(harness.announcer(2).history(), vec![4, 1, 3]);
    assert_eq!(harness.messenger.sent().await.len(), 3);
}

#[tokio::test]
async fn test_catalog_failure_posts_nothing() {
    let harness = TestHarness::new().await;
    harness.catalog.fail_listing("now_playing").await;

    let result = harness.announcer(5).run_once().await;
    assert!(result.is_err());
    assert!(harness.messenger.sent().await.is_empty());
    assert!(harness.announcer(5).history().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_loop_runs_until_stopped() {
    let harness = TestHarness::new().await;
    let announcer = harness.announcer(5);

    announcer.start();
    assert!(announcer.is_running());
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(harness.messenger.sent().await.len(), 3);

    // New release shows up before the next tick.
    harness
        .catalog
        .set_page(
            "now_playing",
            fixtures::page(vec![fixtures::movie(5, "Fifth")], 2, 2),
        )
        .await;
    tokio::time::sleep(Duration::from_secs(61)).await;
    assert_eq!(harness.messenger.sent().await.len(), 4);

    announcer.stop();
    assert!(!announcer.is_running());
    tokio::time::sleep(Duration::from_secs(600)).await;
    assert_eq!(harness.messenger.sent().await.len(), 4);
}
