//! Infinite-scroll trigger.
//!
//! The rendering layer reports whether a sentinel placed after the last card
//! is near the viewport. Each report re-evaluates the feed's gate, so an
//! observer that keeps firing while the sentinel stays visible cannot start a
//! second load while the first one, including its retry delays, is settling.

use std::sync::atomic::{AtomicBool, Ordering};

use futures_util::{Stream, StreamExt};
use gallery_fetch::PhotoSource;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::feed::FeedController;

/// Distance from the end of content, in pixels, at which more data is requested.
pub const DEFAULT_MARGIN_PX: f64 = 600.0;

/// Whether a scroll position is within `margin` of the end of the content.
///
/// All values share one unit (pixels, rows, ...). Content shorter than the
/// viewport is always near its end.
pub fn near_end(scroll_offset: f64, viewport_extent: f64, content_extent: f64, margin: f64) -> bool {
    scroll_offset + viewport_extent + margin >= content_extent
}

/// Index-based variant for list renderers: the last visible item is within
/// `lookahead` items of the end.
pub fn near_last_item(last_visible: usize, item_count: usize, lookahead: usize) -> bool {
    item_count == 0 || last_visible.saturating_add(lookahead) + 1 >= item_count
}

pub struct ScrollTrigger<S> {
    feed:    FeedController<S>,
    retired: AtomicBool,
}

impl<S: PhotoSource + 'static> ScrollTrigger<S> {
    pub fn new(feed: FeedController<S>) -> Self {
        Self {
            feed,
            retired: AtomicBool::new(false),
        }
    }

    pub fn feed(&self) -> &FeedController<S> { &self.feed }

    /// The sentinel should be rendered only while this holds.
    pub fn is_active(&self) -> bool {
        if self.retired.load(Ordering::Acquire) {
            return false;
        }
        if !self.feed.snapshot().has_more {
            debug!("feed exhausted, retiring scroll trigger");
            self.retired.store(true, Ordering::Release);
            return false;
        }
        true
    }

    /// Handle one proximity report. Returns the spawned load when the report
    /// started one.
    pub fn on_visibility(&self, visible: bool) -> Option<JoinHandle<()>> {
        if !visible || !self.is_active() {
            return None;
        }
        let handle = self.feed.spawn_load_more();
        if handle.is_none() {
            debug!("sentinel visible but feed busy or not ready");
        }
        handle
    }

    /// Feed proximity reports from `signals` until the stream ends or the
    /// trigger retires.
    pub async fn drive<St>(&self, signals: St)
    where
        St: Stream<Item = bool>,
    {
        let mut signals = std::pin::pin!(signals);
        while let Some(visible) = signals.next().await {
            if !self.is_active() {
                break;
            }
            self.on_visibility(visible);
        }
    }
}
