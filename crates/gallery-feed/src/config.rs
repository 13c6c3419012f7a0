use std::time::Duration;

/// Feed-level paging and retry policy.
///
/// This sits on top of the transport retries of
/// [`FetchOptions`](gallery_fetch::FetchOptions): each page attempt may itself
/// make several HTTP requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    /// Items requested per page.
    ///
    /// Default: 36
    pub page_size: u32,

    /// Consecutive failures of a page after the first one before it is skipped.
    ///
    /// Default: 3
    pub max_page_retries: u32,

    /// Base of the escalating delay between attempts of the same page; attempt
    /// `n` (1-indexed) that fails waits `page_retry_backoff * n`.
    ///
    /// Default: 2s
    pub page_retry_backoff: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size:          36,
            max_page_retries:   3,
            page_retry_backoff: Duration::from_secs(2),
        }
    }
}

impl FeedConfig {
    #[must_use]
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub fn max_page_retries(mut self, max_page_retries: u32) -> Self {
        self.max_page_retries = max_page_retries;
        self
    }

    #[must_use]
    pub fn page_retry_backoff(mut self, page_retry_backoff: Duration) -> Self {
        self.page_retry_backoff = page_retry_backoff;
        self
    }
}
