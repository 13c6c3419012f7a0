//! In-memory photo source for driving the feed and detail controllers.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use gallery_fetch::{CancellationToken, Error, PhotoDetail, PhotoSource, PhotoSummary, Result};
use tokio::time::Instant;

pub type PageReply = Result<Vec<PhotoSummary>>;

/// Replays scripted listing pages and photo lookups.
///
/// Each page has its own queue of replies; a page whose queue is empty answers
/// with no items, which ends the feed. Ids without a script fail like an
/// unreachable endpoint.
#[derive(Clone, Default)]
pub struct ScriptedSource {
    pages:   Arc<Mutex<HashMap<u32, VecDeque<PageReply>>>>,
    photos:  Arc<Mutex<HashMap<String, (Duration, Result<PhotoDetail>)>>>,
    calls:   Arc<Mutex<Vec<(u32, Instant)>>>,
    lookups: Arc<Mutex<Vec<String>>>,
}

impl ScriptedSource {
    pub fn new() -> Self { Self::default() }

    pub fn page(self, page: u32, reply: PageReply) -> Self {
        self.pages.lock().unwrap().entry(page).or_default().push_back(reply);
        self
    }

    pub fn photo(self, id: &str, delay: Duration) -> Self {
        self.photos.lock().unwrap().insert(id.to_string(), (delay, Ok(photo(id))));
        self
    }

    pub fn failing_photo(self, id: &str, reason: &str) -> Self {
        self.photos.lock().unwrap().insert(id.to_string(), (Duration::ZERO, Err(network(reason))));
        self
    }

    /// Pages requested, in order.
    pub fn pages_requested(&self) -> Vec<u32> { self.calls.lock().unwrap().iter().map(|(p, _)| *p).collect() }

    /// When each request for `page` was made.
    pub fn request_times(&self, page: u32) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().filter(|(p, _)| *p == page).map(|(_, t)| *t).collect()
    }

    pub fn lookups(&self) -> Vec<String> { self.lookups.lock().unwrap().clone() }
}

impl PhotoSource for ScriptedSource {
    async fn list_page(&self, page: u32, _limit: u32, _cancel: &CancellationToken) -> PageReply {
        self.calls.lock().unwrap().push((page, Instant::now()));
        let reply = self.pages.lock().unwrap().get_mut(&page).and_then(VecDeque::pop_front);
        reply.unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn photo_info(&self, id: &str, _cancel: &CancellationToken) -> Result<PhotoDetail> {
        self.lookups.lock().unwrap().push(id.to_string());
        let scripted = self.photos.lock().unwrap().get(id).cloned();
        match scripted {
            Some((delay, reply)) => {
                tokio::time::sleep(delay).await;
                reply
            }
            None => Err(network("connection refused")),
        }
    }
}

pub fn photo(id: &str) -> PhotoSummary {
    PhotoSummary {
        id:           id.to_string(),
        author:       format!("Author {id}"),
        width:        5000,
        height:       3333,
        page_url:     format!("https://unsplash.com/photos/{id}"),
        download_url: format!("https://picsum.photos/id/{id}/5000/3333"),
    }
}

/// A full page of 36 photos whose ids start at `first`.
pub fn full_page(first: u32) -> PageReply { Ok((first..first + 36).map(|i| photo(&i.to_string())).collect()) }

pub fn network(reason: &str) -> Error {
    Error::Network {
        attempts: 3,
        reason:   reason.to_string(),
    }
}
