use std::future::Future;

use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::core::linear_backoff;
use crate::data::{FetchOptions, RetryEvent};
use crate::effects::http::HttpClient;
use crate::error::{Error, Result};

/// Issues one logical JSON request with bounded retry and linear backoff.
#[derive(Debug, Clone)]
pub struct JsonFetcher<C: HttpClient> {
    pub(crate) client: C,
    options: FetchOptions,
}

impl<C: HttpClient> JsonFetcher<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            options: FetchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: FetchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &FetchOptions { &self.options }

    /// Fetch `url` and decode the body as `T`.
    ///
    /// Makes up to `max_retries + 1` attempts. A transport error, a
    /// non-success status, a timeout and an undecodable body all count as
    /// one failed attempt. After attempt `i` fails the fetcher waits
    /// `retry_backoff * (i + 1)` before trying again.
    ///
    /// # Errors
    ///
    /// - [`Error::Network`] with the last failure reason once the budget is spent
    /// - [`Error::Cancelled`] if `cancel` fires during a request or a wait
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        url: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<T> {
        let attempts = self.options.attempts();
        let mut last_reason = String::new();

        for attempt in 0..attempts {
            debug!(url, attempt, "requesting");

            match cancellable(self.attempt::<T>(url), cancel).await? {
                Ok(value) => return Ok(value),
                Err(reason) => {
                    warn!(url, attempt, %reason, "request attempt failed");
                    last_reason = reason;
                }
            }

            if attempt + 1 == attempts {
                break;
            }

            let delay = linear_backoff(attempt, self.options.retry_backoff);
            if let Some(ref on_retry) = self.options.on_retry {
                on_retry(&RetryEvent {
                    attempt,
                    delay,
                    reason: last_reason.clone(),
                });
            }
            cancellable(tokio::time::sleep(delay), cancel).await?;
        }

        Err(Error::Network {
            attempts,
            reason: last_reason,
        })
    }

    /// One attempt; the error side is a human-readable failure reason.
    async fn attempt<T: DeserializeOwned>(&self, url: &str) -> std::result::Result<T, String> {
        let request = self.client.get(url, &self.options.headers);
        let response = match self.options.timeout {
            Some(limit) => tokio::time::timeout(limit, request)
                .await
                .map_err(|_| "request timed out".to_string())?,
            None => request.await,
        }
        .map_err(|e| e.to_string())?;

        if !response.is_success() {
            return Err(format!("HTTP {}", response.status));
        }

        serde_json::from_slice(&response.body).map_err(|e| format!("invalid response body: {e}"))
    }
}

/// Race `fut` against `cancel`. A token that is already cancelled wins
/// before `fut` is polled.
pub async fn cancellable<F: Future>(
    fut: F,
    cancel: Option<&CancellationToken>,
) -> Result<F::Output> {
    match cancel {
        Some(token) => tokio::select! {
            biased;
            _ = token.cancelled() => Err(Error::Cancelled),
            value = fut => Ok(value),
        },
        None => Ok(fut.await),
    }
}
