//! Paginated photo feed with retry, infinite-scroll gating and cancellable
//! detail loads.
//!
//! # Components
//!
//! - [`FeedController`] - sequential page loads; a first-page failure is
//!   fatal until [`retry`](FeedController::retry), later pages are retried
//!   with escalating delays and then skipped
//! - [`ScrollTrigger`] - turns sentinel proximity reports into
//!   [`load_more`](FeedController::load_more) calls, at most one in flight
//! - [`DetailController`] - one photo at a time; switching ids cancels the
//!   previous request and stale answers are dropped
//! - [`ViewCoordinator`] - projects both into render states and routes
//!   navigation
//!
//! # Example
//!
//! ```no_run
//! use gallery_feed::{FeedConfig, FeedController};
//! use gallery_fetch::{PicsumClient, ReqwestClient};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PicsumClient::new(ReqwestClient::new()?);
//! let feed = FeedController::new(client, FeedConfig::default());
//! feed.load_initial().await;
//! while feed.load_more().await {}
//! println!("{} photos", feed.snapshot().items.len());
//! # Ok(())
//! # }
//! ```

mod config;
mod detail;
mod feed;
mod ledger;
mod route;
mod state;
mod trigger;
mod view;

pub use config::FeedConfig;
pub use detail::{DEFAULT_DETAIL_ERROR, DetailController, DetailState, load_detail};
pub use feed::{DEFAULT_FEED_ERROR, FeedController};
pub use ledger::RetryLedger;
pub use route::{GALLERY_PATH, Route};
pub use state::{FeedPhase, FeedState};
pub use trigger::{DEFAULT_MARGIN_PX, ScrollTrigger, near_end, near_last_item};
pub use view::{
    DEFAULT_TITLE, DetailView, GalleryView, NOT_FOUND_MESSAGE, TitleSink, ViewCoordinator, photo_title,
};
