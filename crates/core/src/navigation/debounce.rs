//! Debounced search input.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::trace;

use crate::config::SearchConfig;

/// Quiet period after the last keystroke before a search fires.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Emits an input value once it has stopped changing for `delay`.
///
/// Each call to [`input`](Self::input) aborts the pending timer and starts a
/// new one. Settled values arrive on the receiver returned by
/// [`new`](Self::new). Dropping the debouncer aborts any pending timer.
pub struct SearchDebouncer {
    delay: Duration,
    tx: mpsc::Sender<String>,
    pending: Option<JoinHandle<()>>,
}

impl SearchDebouncer {
    /// Must be called from within a tokio runtime.
    pub fn new(delay: Duration) -> (Self, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(8);
        (
            Self {
                delay,
                tx,
                pending: None,
            },
            rx,
        )
    }

    /// Debouncer using the configured quiet period.
    pub fn from_config(config: &SearchConfig) -> (Self, mpsc::Receiver<String>) {
        Self::new(config.debounce())
    }

    pub fn input(&mut self, value: impl Into<String>) {
        self.cancel();

        let value = value.into();
        let delay = self.delay;
        let tx = self.tx.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            trace!("Search input settled: {:?}", value);
            // Receiver gone means the view is closed.
            let _ = tx.send(value).await;
        }));
    }

    /// Abort the pending timer, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
