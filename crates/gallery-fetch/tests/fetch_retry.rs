//! Retry, backoff and cancellation behaviour of the JSON fetch client.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use gallery_fetch::data::RetryEvent;
use gallery_fetch::{
    CancellationToken, Endpoint, Error, FetchOptions, HttpClient, HttpResponse, JsonFetcher,
    Photo, PhotoSource, PicsumClient,
};
use tokio::time::Instant;

const PHOTO: &str = r#"{"id":"42","author":"Alejandro Escamilla","width":5000,"height":3333,
    "url":"https://unsplash.com/photos/x","download_url":"https://picsum.photos/id/42/5000/3333"}"#;

#[derive(Debug)]
struct TestError(String);

impl std::fmt::Display for TestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
}

impl std::error::Error for TestError {}

type Reply = Result<HttpResponse, String>;

/// Replays scripted replies in order; once the script runs dry every request
/// fails with `connection refused`.
#[derive(Clone, Default)]
struct ScriptedClient {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    calls:   Arc<Mutex<Vec<(String, Instant)>>>,
    latency: Duration,
}

impl ScriptedClient {
    fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into_iter().collect())),
            ..Self::default()
        }
    }

    fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn urls(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(u, _)| u.clone()).collect()
    }

    fn call_count(&self) -> usize { self.calls.lock().unwrap().len() }
}

impl HttpClient for ScriptedClient {
    type Error = TestError;

    async fn get(&self, url: &str, _headers: &[(String, String)]) -> Result<HttpResponse, TestError> {
        self.calls.lock().unwrap().push((url.to_string(), Instant::now()));
        let reply = self.replies.lock().unwrap().pop_front();
        tokio::time::sleep(self.latency).await;
        match reply {
            Some(reply) => reply.map_err(TestError),
            None => Err(TestError("connection refused".into())),
        }
    }
}

fn ok(body: &'static str) -> Reply { Ok(HttpResponse::new(200, body)) }

fn status(code: u16) -> Reply { Ok(HttpResponse::new(code, "")) }

#[tokio::test(start_paused = true)]
async fn test_first_attempt_success() {
    let client = ScriptedClient::new([ok(PHOTO)]);
    let fetcher = JsonFetcher::new(client.clone());

    let photo: Photo = fetcher.fetch_json("http://test/id/42/info", None).await.unwrap();

    assert_eq!(photo.id, "42");
    assert_eq!(client.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_server_error_then_success() {
    let client = ScriptedClient::new([status(503), ok(PHOTO)]);
    let fetcher = JsonFetcher::new(client.clone());
    let start = Instant::now();

    let photo: Photo = fetcher.fetch_json("http://test/id/42/info", None).await.unwrap();

    assert_eq!(photo.author, "Alejandro Escamilla");
    assert_eq!(client.call_count(), 2);
    assert_eq!(start.elapsed(), Duration::from_millis(600));
}

#[tokio::test(start_paused = true)]
async fn test_client_errors_are_retried_like_server_errors() {
    let client = ScriptedClient::new([status(404), status(404), status(404)]);
    let fetcher = JsonFetcher::new(client.clone());

    let err = fetcher.fetch_json::<Photo>("http://test/id/x/info", None).await.unwrap_err();

    assert_eq!(client.call_count(), 3);
    assert_eq!(
        err,
        Error::Network {
            attempts: 3,
            reason:   "HTTP 404".into(),
        }
    );
}

#[tokio::test(start_paused = true)]
async fn test_malformed_body_counts_as_failure() {
    let client = ScriptedClient::new([ok("<html>oops</html>"), ok(PHOTO)]);
    let fetcher = JsonFetcher::new(client.clone());

    let photo: Photo = fetcher.fetch_json("http://test", None).await.unwrap();

    assert_eq!(photo.id, "42");
    assert_eq!(client.call_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_unreachable_detail_exhausts_budget_with_linear_backoff() {
    let client = ScriptedClient::default();
    let source = PicsumClient::new(client.clone());
    let cancel = CancellationToken::new();
    let start = Instant::now();

    let err = source.photo_info("42", &cancel).await.unwrap_err();

    assert_eq!(
        err,
        Error::Network {
            attempts: 3,
            reason:   "connection refused".into(),
        }
    );
    assert_eq!(start.elapsed(), Duration::from_millis(600 + 1200));

    let calls = client.calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[1].1 - calls[0].1, Duration::from_millis(600));
    assert_eq!(calls[2].1 - calls[1].1, Duration::from_millis(1200));
    assert!(calls.iter().all(|(url, _)| url == "https://picsum.photos/id/42/info"));
}

#[tokio::test(start_paused = true)]
async fn test_empty_id_fails_without_request() {
    let client = ScriptedClient::default();
    let source = PicsumClient::new(client.clone());

    let err = source.photo_info("", &CancellationToken::new()).await.unwrap_err();

    assert!(matches!(err, Error::InvalidInput(_)));
    assert_eq!(client.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_during_backoff_stops_retrying() {
    let client = ScriptedClient::default();
    let source = PicsumClient::new(client.clone());
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(300)).await;
        trigger.cancel();
    });

    let err = source.photo_info("42", &cancel).await.unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(client.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_in_flight() {
    let client = ScriptedClient::new([ok(PHOTO)]).with_latency(Duration::from_secs(5));
    let source = PicsumClient::new(client.clone());
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(1)).await;
        trigger.cancel();
    });

    let result = source.photo_info("42", &cancel).await;

    assert_eq!(result, Err(Error::Cancelled));
}

#[tokio::test(start_paused = true)]
async fn test_timeout_counts_as_failed_attempt() {
    let client = ScriptedClient::new([ok(PHOTO), ok(PHOTO)]).with_latency(Duration::from_secs(10));
    let options = FetchOptions::default()
        .max_retries(1)
        .timeout(Some(Duration::from_secs(2)));
    let fetcher = JsonFetcher::new(client.clone()).with_options(options);

    let err = fetcher.fetch_json::<Photo>("http://test", None).await.unwrap_err();

    assert_eq!(
        err,
        Error::Network {
            attempts: 2,
            reason:   "request timed out".into(),
        }
    );
}

#[tokio::test(start_paused = true)]
async fn test_listing_uses_page_and_limit() {
    let client = ScriptedClient::new([ok("[]")]);
    let source = PicsumClient::new(client.clone())
        .with_endpoint(Endpoint::new("http://mirror.local").unwrap());

    let page = source.list_page(4, 30, &CancellationToken::new()).await.unwrap();

    assert!(page.is_empty());
    assert_eq!(client.urls(), vec!["http://mirror.local/v2/list?page=4&limit=30".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_retry_events_report_delays() {
    let events = Arc::new(Mutex::new(Vec::<RetryEvent>::new()));
    let sink = Arc::clone(&events);
    let options = FetchOptions::default().on_retry(Arc::new(move |event: &RetryEvent| {
        sink.lock().unwrap().push(event.clone());
    }));
    let client = ScriptedClient::new([status(500), status(502), ok(PHOTO)]);
    let fetcher = JsonFetcher::new(client).with_options(options);

    let _: Photo = fetcher.fetch_json("http://test", None).await.unwrap();

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].delay, Duration::from_millis(600));
    assert_eq!(events[0].reason, "HTTP 500");
    assert_eq!(events[1].delay, Duration::from_millis(1200));
    assert_eq!(events[1].reason, "HTTP 502");
}
