use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// A failed attempt that is about to be retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryEvent {
    /// Zero-based index of the attempt that failed.
    pub attempt: u32,
    /// Delay before the next attempt starts.
    pub delay:   Duration,
    /// Why the attempt failed, e.g. `HTTP 503`.
    pub reason:  String,
}

/// Configuration for JSON fetching.
///
/// # Examples
///
/// ```
/// use gallery_fetch::data::FetchOptions;
/// use std::time::Duration;
///
/// let options = FetchOptions::default()
///     .max_retries(4)
///     .retry_backoff(Duration::from_millis(250))
///     .header("User-Agent", "gallery/0.1");
/// ```
#[derive(Clone)]
pub struct FetchOptions {
    /// Retries after the initial attempt.
    ///
    /// Every failure is retried the same way: transport errors, any
    /// non-success status and undecodable bodies.
    /// Total attempts = 1 (initial) + max_retries
    ///
    /// Default: 2
    pub max_retries: u32,

    /// Base delay for linear backoff between attempts.
    ///
    /// The delay after failed attempt `i` (0-indexed) is `retry_backoff * (i + 1)`.
    ///
    /// Default: 600ms
    pub retry_backoff: Duration,

    /// Upper bound for a single attempt. Expiry counts as a failed attempt.
    ///
    /// Default: None
    pub timeout: Option<Duration>,

    /// Headers sent with every request, including retries.
    ///
    /// Default: empty
    pub headers: Arc<[(String, String)]>,

    /// Invoked before each backoff wait.
    ///
    /// Default: None
    pub on_retry: Option<Arc<dyn Fn(&RetryEvent) + Send + Sync>>,
}

impl fmt::Debug for FetchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchOptions")
            .field("max_retries", &self.max_retries)
            .field("retry_backoff", &self.retry_backoff)
            .field("timeout", &self.timeout)
            .field("headers", &self.headers)
            .field("on_retry", &"{ ... }")
            .finish()
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            max_retries:   2,
            retry_backoff: Duration::from_millis(600),
            timeout:       None,
            headers:       Arc::new([]),
            on_retry:      None,
        }
    }
}

impl FetchOptions {
    #[must_use]
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    #[must_use]
    pub fn retry_backoff(mut self, retry_backoff: Duration) -> Self {
        self.retry_backoff = retry_backoff;
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add a single custom HTTP header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut headers: Vec<_> = self.headers.iter().cloned().collect();
        headers.push((key.into(), value.into()));
        self.headers = Arc::from(headers);
        self
    }

    #[must_use]
    pub fn on_retry(mut self, on_retry: Arc<dyn Fn(&RetryEvent) + Send + Sync>) -> Self {
        self.on_retry = Some(on_retry);
        self
    }

    /// Total number of attempts a fetch may make.
    pub fn attempts(&self) -> u32 { self.max_retries.saturating_add(1) }
}
