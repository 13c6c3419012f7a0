use std::fmt;

use gallery_fetch::PhotoSummary;

/// Lifecycle of a feed.
///
/// `Idle → LoadingInitial → Ready ⇄ LoadingMore`, with `LoadingInitial →
/// FatalError` when the first page fails and `FatalError → LoadingInitial`
/// only through an explicit retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedPhase {
    #[default]
    Idle,
    LoadingInitial,
    Ready,
    LoadingMore,
    FatalError,
}

impl fmt::Display for FeedPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedPhase::Idle => write!(f, "Idle"),
            FeedPhase::LoadingInitial => write!(f, "LoadingInitial"),
            FeedPhase::Ready => write!(f, "Ready"),
            FeedPhase::LoadingMore => write!(f, "LoadingMore"),
            FeedPhase::FatalError => write!(f, "FatalError"),
        }
    }
}

/// Everything the presentation layer needs to render the gallery feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedState {
    /// Accumulated items in fetch order. Ids may repeat across pages.
    pub items:              Vec<PhotoSummary>,
    /// Page most recently requested (or advanced to after a skip).
    pub current_page:       u32,
    /// Cleared for good once a page comes back empty.
    pub has_more:           bool,
    pub is_loading_initial: bool,
    pub is_loading_more:    bool,
    pub fatal_error:        Option<String>,
    pub phase:              FeedPhase,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            items:              Vec::new(),
            current_page:       1,
            has_more:           true,
            is_loading_initial: false,
            is_loading_more:    false,
            fatal_error:        None,
            phase:              FeedPhase::Idle,
        }
    }
}

impl FeedState {
    pub fn is_loading(&self) -> bool { self.is_loading_initial || self.is_loading_more }

    /// Gate for the scroll trigger: more data exists, the first page has
    /// landed and no page load is in flight.
    pub fn can_load_more(&self) -> bool {
        self.has_more
            && !self.is_loading()
            && self.fatal_error.is_none()
            && self.phase == FeedPhase::Ready
    }

    /// Claim the single loading slot for `page`. Returns `false` and leaves
    /// the state untouched unless `page` is the next step of the lifecycle:
    /// page 1 from [`FeedPhase::Idle`], or `current_page + 1` from
    /// [`FeedPhase::Ready`] while more data exists.
    pub(crate) fn begin(&mut self, page: u32) -> bool {
        if page == 1 {
            if self.phase != FeedPhase::Idle {
                return false;
            }
            self.is_loading_initial = true;
            self.fatal_error = None;
            self.phase = FeedPhase::LoadingInitial;
        } else {
            if !self.can_load_more() || page != self.current_page.saturating_add(1) {
                return false;
            }
            self.is_loading_more = true;
            self.phase = FeedPhase::LoadingMore;
        }
        self.current_page = page;
        true
    }

    /// Record a successful fetch of `page`.
    pub(crate) fn complete(&mut self, page: u32, photos: Vec<PhotoSummary>) {
        if photos.is_empty() {
            self.has_more = false;
        }
        if page == 1 {
            self.items = photos;
        } else {
            self.items.extend(photos);
        }
        self.current_page = page;
        self.is_loading_initial = false;
        self.is_loading_more = false;
        self.phase = FeedPhase::Ready;
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.fatal_error = Some(message);
        self.is_loading_initial = false;
        self.is_loading_more = false;
        self.phase = FeedPhase::FatalError;
    }

    /// Abandon `page` and move the loading slot on to the next page number.
    pub(crate) fn skip(&mut self, page: u32) {
        self.current_page = page.saturating_add(1);
        self.is_loading_more = true;
        self.phase = FeedPhase::LoadingMore;
    }
}
