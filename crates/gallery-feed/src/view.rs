//! Presentation-facing projections of feed and detail state.

use std::future::Future;
use std::sync::Arc;

use gallery_fetch::{PhotoDetail, PhotoSource, PhotoSummary};
use gallery_prefs::{PreferenceStore, Result as PrefsResult, ViewMode, ViewModePreference};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::config::FeedConfig;
use crate::detail::{DetailController, DetailState};
use crate::feed::FeedController;
use crate::route::Route;
use crate::state::FeedState;
use crate::trigger::ScrollTrigger;

/// Document title outside of a shown photo.
pub const DEFAULT_TITLE: &str = "Picsum Photo Gallery";

/// Message of a detail view whose load settled without a photo.
pub const NOT_FOUND_MESSAGE: &str = "Photo not found";

/// Document title while `photo` is shown.
pub fn photo_title(photo: &PhotoDetail) -> String { format!("Photo by {} – Picsum", photo.author) }

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryView {
    Loading,
    /// Full-view error with a retry action.
    Failed { message: String },
    Ready {
        items:           Vec<PhotoSummary>,
        loading_more:    bool,
        has_more:        bool,
        /// Render the scroll sentinel after the last card.
        sentinel_active: bool,
    },
}

impl GalleryView {
    pub fn project(state: &FeedState) -> Self {
        if let Some(message) = &state.fatal_error {
            return GalleryView::Failed {
                message: message.clone(),
            };
        }
        if state.is_loading_initial || (state.items.is_empty() && state.has_more) {
            return GalleryView::Loading;
        }
        GalleryView::Ready {
            items:           state.items.clone(),
            loading_more:    state.is_loading_more,
            has_more:        state.has_more,
            sentinel_active: state.has_more,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailView {
    Loading,
    /// Error with retry and return-to-gallery actions.
    Failed { message: String },
    Ready { photo: PhotoDetail },
}

impl DetailView {
    pub fn project(state: &DetailState) -> Self {
        if state.is_loading {
            return DetailView::Loading;
        }
        match (&state.photo, &state.error) {
            (_, Some(message)) => DetailView::Failed {
                message: message.clone(),
            },
            (Some(photo), None) => DetailView::Ready {
                photo: photo.clone(),
            },
            (None, None) => DetailView::Failed {
                message: NOT_FOUND_MESSAGE.to_string(),
            },
        }
    }

    pub fn title(&self) -> String {
        match self {
            DetailView::Ready { photo } => photo_title(photo),
            _ => DEFAULT_TITLE.to_string(),
        }
    }
}

/// Callback receiving document title changes.
pub type TitleSink = Arc<dyn Fn(&str) + Send + Sync>;

/// Ties the feed, the scroll trigger, the detail controller and the
/// view-mode preference to navigation.
pub struct ViewCoordinator<S, P: PreferenceStore> {
    feed:    FeedController<Arc<S>>,
    trigger: ScrollTrigger<Arc<S>>,
    detail:  DetailController<Arc<S>>,
    prefs:   ViewModePreference<P>,
    route:   Route,
    title:   Option<TitleSink>,
}

impl<S: PhotoSource + 'static, P: PreferenceStore> ViewCoordinator<S, P> {
    /// Build the coordinator around one shared photo source.
    pub fn new(source: S, config: FeedConfig, prefs: P) -> Self {
        let source = Arc::new(source);
        let feed = FeedController::new(Arc::clone(&source), config);
        Self {
            trigger: ScrollTrigger::new(feed.clone()),
            detail: DetailController::new(source),
            feed,
            prefs: ViewModePreference::new(prefs),
            route: Route::Gallery,
            title: None,
        }
    }

    /// Publish document titles to `sink` on navigation and whenever a detail
    /// load settles.
    #[must_use]
    pub fn on_title(mut self, sink: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.title = Some(Arc::new(sink));
        self
    }

    pub fn feed(&self) -> &FeedController<Arc<S>> { &self.feed }

    pub fn trigger(&self) -> &ScrollTrigger<Arc<S>> { &self.trigger }

    pub fn detail(&self) -> &DetailController<Arc<S>> { &self.detail }

    pub fn route(&self) -> &Route { &self.route }

    pub fn gallery_view(&self) -> GalleryView {
        let state = self.feed.snapshot();
        let mut view = GalleryView::project(&state);
        if let GalleryView::Ready { sentinel_active, .. } = &mut view {
            *sentinel_active = self.trigger.is_active();
        }
        view
    }

    pub fn detail_view(&self) -> DetailView { DetailView::project(&self.detail.snapshot()) }

    /// Current document title.
    pub fn title(&self) -> String {
        match &self.route {
            Route::Detail(_) => self.detail_view().title(),
            _ => DEFAULT_TITLE.to_string(),
        }
    }

    /// Move to `path`. Entering the gallery starts an idle feed, entering a
    /// detail starts its load and leaving a detail cancels it. Returns the
    /// resolved route and the load it started, if any.
    pub fn navigate(&mut self, path: &str) -> (Route, Option<JoinHandle<()>>) {
        let route = Route::parse(path);
        debug!(from = %self.route, to = %route, "navigate");

        if matches!(self.route, Route::Detail(_)) && !matches!(&route, Route::Detail(_)) {
            self.detail.cancel();
        }
        self.route = route.clone();
        let load = match &route {
            Route::Detail(id) => Some(self.detail.show(id)),
            _ => None,
        };
        // published before any load can settle and publish its own
        self.publish_title();

        let handle = match (&route, load) {
            (Route::Gallery, _) => self.feed.spawn_initial(),
            (Route::Detail(id), Some(load)) => Some(self.spawn_detail(id, load)),
            _ => None,
        };
        (route, handle)
    }

    /// Proximity report from the gallery's scroll sentinel.
    pub fn on_sentinel(&self, visible: bool) -> Option<JoinHandle<()>> {
        match self.route {
            Route::Gallery => self.trigger.on_visibility(visible),
            _ => None,
        }
    }

    /// Retry action of a failed gallery.
    pub fn retry_gallery(&self) -> Option<JoinHandle<()>> { self.feed.spawn_retry() }

    /// Retry action of a failed detail view.
    pub fn retry_detail(&self) -> Option<JoinHandle<()>> {
        match &self.route {
            Route::Detail(id) => Some(self.spawn_detail(id, self.detail.retry())),
            _ => None,
        }
    }

    fn publish_title(&self) {
        if let Some(sink) = &self.title {
            sink(&self.title());
        }
    }

    /// Run a detail load, then publish the title of what it settled on.
    /// Nothing is published when the load was superseded or cancelled.
    fn spawn_detail(&self, id: &str, load: impl Future<Output = ()> + Send + 'static) -> JoinHandle<()> {
        let detail = self.detail.clone();
        let sink = self.title.clone();
        let id = id.to_string();
        tokio::spawn(async move {
            load.await;
            let Some(sink) = sink else {
                return;
            };
            let state = detail.snapshot();
            if state.id == id && !state.is_loading {
                sink(&DetailView::project(&state).title());
            }
        })
    }

    pub fn view_mode(&self, query: Option<&str>) -> ViewMode { self.prefs.load(query) }

    /// Persist `mode` and return the query string to put in the URL.
    pub fn set_view_mode(&self, mode: ViewMode, query: Option<&str>) -> PrefsResult<String> {
        self.prefs.save(mode, query)
    }

    /// Unmount everything: the detail request and all feed work stop.
    pub fn teardown(&self) {
        self.detail.cancel();
        self.feed.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(id: &str) -> PhotoSummary {
        PhotoSummary {
            id:           id.to_string(),
            author:       "Alejandro Escamilla".into(),
            width:        5000,
            height:       3333,
            page_url:     String::new(),
            download_url: String::new(),
        }
    }

    #[test]
    fn fresh_feed_is_loading() {
        assert_eq!(GalleryView::project(&FeedState::default()), GalleryView::Loading);
    }

    #[test]
    fn fatal_error_wins() {
        let state = FeedState {
            items: vec![photo("1")],
            fatal_error: Some("HTTP 500".into()),
            ..FeedState::default()
        };
        assert_eq!(
            GalleryView::project(&state),
            GalleryView::Failed {
                message: "HTTP 500".into()
            }
        );
    }

    #[test]
    fn exhausted_feed_drops_sentinel() {
        let state = FeedState {
            items: vec![photo("1")],
            has_more: false,
            ..FeedState::default()
        };
        let GalleryView::Ready { sentinel_active, has_more, .. } = GalleryView::project(&state) else {
            panic!("expected ready view");
        };
        assert!(!sentinel_active && !has_more);
    }

    #[test]
    fn detail_titles() {
        let state = DetailState {
            id: "0".into(),
            photo: Some(photo("0")),
            ..DetailState::default()
        };
        let view = DetailView::project(&state);
        assert_eq!(view.title(), "Photo by Alejandro Escamilla – Picsum");
        assert_eq!(DetailView::Loading.title(), DEFAULT_TITLE);
    }

    #[test]
    fn settled_without_photo_is_not_found() {
        assert_eq!(
            DetailView::project(&DetailState::default()),
            DetailView::Failed {
                message: NOT_FOUND_MESSAGE.into()
            }
        );
    }
}
