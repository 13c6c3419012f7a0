use std::future::Future;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::core::Endpoint;
use crate::data::{FetchOptions, PhotoDetail, PhotoSummary};
use crate::effects::fetcher::JsonFetcher;
use crate::effects::http::HttpClient;
use crate::error::Result;

/// Where photo metadata comes from.
///
/// The feed and detail controllers only see this port, so they can be driven
/// by the real API client or by an in-memory script.
pub trait PhotoSource: Send + Sync {
    /// One listing page. An empty page means there is no more data.
    fn list_page(
        &self,
        page: u32,
        limit: u32,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<Vec<PhotoSummary>>> + Send;

    /// One photo by id.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`](crate::Error::InvalidInput) for an empty id,
    /// before any request is made.
    fn photo_info(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<PhotoDetail>> + Send;
}

/// [`PhotoSource`] backed by the Picsum HTTP API.
#[derive(Debug, Clone)]
pub struct PicsumClient<C: HttpClient> {
    fetcher:  JsonFetcher<C>,
    endpoint: Endpoint,
}

impl<C: HttpClient> PicsumClient<C> {
    pub fn new(client: C) -> Self {
        Self {
            fetcher:  JsonFetcher::new(client),
            endpoint: Endpoint::default(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn with_options(mut self, options: FetchOptions) -> Self {
        self.fetcher = self.fetcher.with_options(options);
        self
    }

    pub fn endpoint(&self) -> &Endpoint { &self.endpoint }

    pub fn fetcher(&self) -> &JsonFetcher<C> { &self.fetcher }
}

impl<C: HttpClient> PhotoSource for PicsumClient<C> {
    async fn list_page(
        &self,
        page: u32,
        limit: u32,
        cancel: &CancellationToken,
    ) -> Result<Vec<PhotoSummary>> {
        let url = self.endpoint.list(page, limit);
        let photos: Vec<PhotoSummary> = self.fetcher.fetch_json(url.as_str(), Some(cancel)).await?;
        debug!(page, count = photos.len(), "listing page received");
        Ok(photos)
    }

    async fn photo_info(&self, id: &str, cancel: &CancellationToken) -> Result<PhotoDetail> {
        let url = self.endpoint.info(id)?;
        self.fetcher.fetch_json(url.as_str(), Some(cancel)).await
    }
}

impl<S: PhotoSource> PhotoSource for Arc<S> {
    fn list_page(
        &self,
        page: u32,
        limit: u32,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<Vec<PhotoSummary>>> + Send {
        (**self).list_page(page, limit, cancel)
    }

    fn photo_info(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<PhotoDetail>> + Send {
        (**self).photo_info(id, cancel)
    }
}
