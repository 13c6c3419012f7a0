use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use gallery_fetch::effects::cancellable;
use gallery_fetch::{CancellationToken, Error, PhotoSource, PhotoSummary, linear_backoff};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::config::FeedConfig;
use crate::ledger::RetryLedger;
use crate::state::{FeedPhase, FeedState};

/// Message shown when a first-page failure carries no reason of its own.
pub const DEFAULT_FEED_ERROR: &str = "Failed to fetch photos";

/// What to do after a page beyond the first has failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageFailure {
    /// Try the same page again after the feed-level backoff.
    Retry { failures: u32 },
    /// Budget spent; the page is abandoned.
    Skip,
}

/// Drives the sequence of page requests for one gallery feed.
///
/// Cloning yields another handle to the same feed. The feed state is
/// published through a [`watch`] channel; every transition is a single
/// `send_if_modified` call, so claiming the loading slot is atomic even when
/// handles live on different tasks.
pub struct FeedController<S> {
    shared: Arc<Shared<S>>,
}

struct Shared<S> {
    source:   S,
    config:   FeedConfig,
    state:    watch::Sender<FeedState>,
    ledger:   Mutex<RetryLedger>,
    shutdown: CancellationToken,
}

impl<S> Clone for FeedController<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S: PhotoSource + 'static> FeedController<S> {
    pub fn new(source: S, config: FeedConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                source,
                config,
                state: watch::Sender::new(FeedState::default()),
                ledger: Mutex::new(RetryLedger::new()),
                shutdown: CancellationToken::new(),
            }),
        }
    }

    pub fn config(&self) -> &FeedConfig { &self.shared.config }

    pub fn source(&self) -> &S { &self.shared.source }

    pub fn snapshot(&self) -> FeedState { self.shared.state.borrow().clone() }

    pub fn phase(&self) -> FeedPhase { self.shared.state.borrow().phase }

    /// Receive every state transition from now on.
    pub fn subscribe(&self) -> watch::Receiver<FeedState> { self.shared.state.subscribe() }

    /// Consecutive failures currently recorded for `page`.
    pub fn retry_count(&self, page: u32) -> u32 { self.ledger().count(page) }

    /// First load of an idle feed.
    ///
    /// Returns `false` without requesting anything unless the feed is
    /// [`FeedPhase::Idle`]. A skipped page chains directly into the next page
    /// number, so the load methods only return once some page has succeeded,
    /// the feed has failed or it was torn down.
    pub async fn load_initial(&self) -> bool {
        if !self.claim_initial() {
            return false;
        }
        self.run(1).await;
        true
    }

    /// Request `current_page + 1` if the feed is ready for more.
    pub async fn load_more(&self) -> bool {
        match self.claim_more() {
            Some(page) => {
                self.run(page).await;
                true
            }
            None => false,
        }
    }

    /// Reset a failed feed and load page 1 again. Does nothing unless the
    /// feed is in [`FeedPhase::FatalError`].
    pub async fn retry(&self) -> bool {
        if !self.claim_retry() {
            return false;
        }
        self.run(1).await;
        true
    }

    /// Like [`load_initial`](Self::load_initial), but claims the slot before
    /// returning and settles the page on a background task.
    pub fn spawn_initial(&self) -> Option<JoinHandle<()>> {
        self.claim_initial().then(|| self.spawn_run(1))
    }

    /// Like [`load_more`](Self::load_more), on a background task.
    pub fn spawn_load_more(&self) -> Option<JoinHandle<()>> {
        self.claim_more().map(|page| self.spawn_run(page))
    }

    /// Like [`retry`](Self::retry), on a background task.
    pub fn spawn_retry(&self) -> Option<JoinHandle<()>> {
        self.claim_retry().then(|| self.spawn_run(1))
    }

    /// Stop the feed: in-flight requests and pending retry delays are
    /// abandoned and the state is frozen.
    pub fn teardown(&self) {
        info!("feed torn down");
        self.shared.shutdown.cancel();
    }

    pub fn is_torn_down(&self) -> bool { self.shared.shutdown.is_cancelled() }

    fn spawn_run(&self, page: u32) -> JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move { this.run(page).await })
    }

    fn ledger(&self) -> MutexGuard<'_, RetryLedger> {
        self.shared.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply `f` unless the feed has been torn down. `f` reports whether it
    /// changed anything.
    fn update(&self, f: impl FnOnce(&mut FeedState) -> bool) -> bool {
        if self.is_torn_down() {
            return false;
        }
        self.shared.state.send_if_modified(f)
    }

    fn claim_initial(&self) -> bool { self.update(|state| state.begin(1)) }

    fn claim_more(&self) -> Option<u32> {
        let mut claimed = None;
        self.update(|state| {
            let page = state.current_page.saturating_add(1);
            if state.begin(page) {
                claimed = Some(page);
            }
            claimed.is_some()
        });
        claimed
    }

    fn claim_retry(&self) -> bool {
        let claimed = self.update(|state| {
            if state.phase != FeedPhase::FatalError {
                return false;
            }
            *state = FeedState::default();
            state.begin(1)
        });
        if claimed {
            self.ledger().clear_all();
            info!("retrying feed from page 1");
        }
        claimed
    }

    /// Settle a claimed page. The loading slot is already held for `page`.
    async fn run(&self, mut page: u32) {
        let shutdown = &self.shared.shutdown;
        let limit = self.shared.config.page_size;
        let mut attempt = 1u32;

        loop {
            let result = cancellable(self.shared.source.list_page(page, limit, shutdown), Some(shutdown))
                .await
                .and_then(|r| r);

            let err = match result {
                Ok(photos) => {
                    self.complete(page, photos);
                    return;
                }
                Err(Error::Cancelled) => {
                    debug!(page, "page load abandoned");
                    return;
                }
                Err(err) => err,
            };

            if page == 1 {
                let message = err.user_message().unwrap_or_else(|| DEFAULT_FEED_ERROR.to_string());
                error!(%message, "first page failed");
                self.update(|state| {
                    state.fail(message);
                    true
                });
                return;
            }

            match self.record_failure(page) {
                PageFailure::Retry { failures } => {
                    let delay = linear_backoff(attempt - 1, self.shared.config.page_retry_backoff);
                    warn!(page, failures, ?delay, error = %err, "page failed, retrying");
                    if cancellable(tokio::time::sleep(delay), Some(shutdown)).await.is_err() {
                        return;
                    }
                    attempt += 1;
                }
                PageFailure::Skip => {
                    warn!(page, error = %err, "page failed too often, skipping it; the feed will lack its items");
                    let advanced = self.update(|state| {
                        state.skip(page);
                        true
                    });
                    if !advanced {
                        return;
                    }
                    page = page.saturating_add(1);
                    attempt = 1;
                }
            }
        }
    }

    fn record_failure(&self, page: u32) -> PageFailure {
        let mut ledger = self.ledger();
        let failures = ledger.record_failure(page);
        if failures < self.shared.config.max_page_retries {
            PageFailure::Retry { failures }
        } else {
            ledger.clear(page);
            PageFailure::Skip
        }
    }

    fn complete(&self, page: u32, photos: Vec<PhotoSummary>) {
        let count = photos.len();
        if count > 0 {
            self.ledger().clear(page);
        }
        let applied = self.update(|state| {
            state.complete(page, photos);
            true
        });
        if !applied {
            return;
        }
        match count {
            0 => info!(page, "reached end of feed"),
            _ => debug!(page, count, "page appended"),
        }
    }
}
