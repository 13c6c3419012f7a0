use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use gallery_fetch::core::validate_id;
use gallery_fetch::effects::cancellable;
use gallery_fetch::{CancellationToken, PhotoDetail, PhotoSource, Result};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// Message shown when a detail failure carries no reason of its own.
pub const DEFAULT_DETAIL_ERROR: &str = "Failed to load photo";

/// Fetch one photo by id.
///
/// An empty id fails with [`Error::InvalidInput`](gallery_fetch::Error::InvalidInput)
/// before any request. The request is abandoned with
/// [`Error::Cancelled`](gallery_fetch::Error::Cancelled) as soon as `cancel`
/// fires, even if `source` ignores the token.
pub async fn load_detail<S: PhotoSource>(
    source: &S,
    id: &str,
    cancel: &CancellationToken,
) -> Result<PhotoDetail> {
    let id = validate_id(id)?;
    cancellable(source.photo_info(id, cancel), Some(cancel)).await?
}

/// State of one detail view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailState {
    pub id:         String,
    pub photo:      Option<PhotoDetail>,
    pub is_loading: bool,
    pub error:      Option<String>,
}

#[derive(Debug, Default)]
struct Session {
    generation: u64,
    token:      Option<CancellationToken>,
}

/// Loads the photo shown by a detail view.
///
/// Every [`show`](Self::show) cancels the previous request and bumps a
/// generation counter before returning; a response is applied only if its
/// generation is still current, so a slow answer for an old id can never
/// overwrite a newer one.
pub struct DetailController<S> {
    shared: Arc<Shared<S>>,
}

struct Shared<S> {
    source:  S,
    state:   watch::Sender<DetailState>,
    session: Mutex<Session>,
}

impl<S> Clone for DetailController<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S: PhotoSource + 'static> DetailController<S> {
    pub fn new(source: S) -> Self {
        Self {
            shared: Arc::new(Shared {
                source,
                state: watch::Sender::new(DetailState::default()),
                session: Mutex::new(Session::default()),
            }),
        }
    }

    pub fn snapshot(&self) -> DetailState { self.shared.state.borrow().clone() }

    pub fn subscribe(&self) -> watch::Receiver<DetailState> { self.shared.state.subscribe() }

    /// Start showing `id`.
    ///
    /// The previous request is cancelled and the state switches to loading
    /// `id` before this returns; the returned future performs the fetch and
    /// settles the state. Dropping the future without polling it leaves the
    /// view loading until the next `show`.
    pub fn show(&self, id: &str) -> impl Future<Output = ()> + Send + use<S> {
        let (generation, token) = self.begin(id);
        let this = self.clone();
        let id = id.to_string();
        async move { this.fetch(generation, id, token).await }
    }

    /// [`show`](Self::show) on a background task.
    pub fn spawn_show(&self, id: &str) -> JoinHandle<()> { tokio::spawn(self.show(id)) }

    /// Request the current id again.
    pub fn retry(&self) -> impl Future<Output = ()> + Send + use<S> {
        let id = self.shared.state.borrow().id.clone();
        self.show(&id)
    }

    /// Abandon the in-flight request, if any, without touching the state.
    pub fn cancel(&self) {
        let mut session = self.session();
        session.generation += 1;
        if let Some(token) = session.token.take() {
            debug!("detail request cancelled");
            token.cancel();
        }
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.shared.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self, id: &str) -> (u64, CancellationToken) {
        let mut session = self.session();
        if let Some(previous) = session.token.take() {
            previous.cancel();
        }
        session.generation += 1;
        let token = CancellationToken::new();
        session.token = Some(token.clone());

        self.shared.state.send_replace(DetailState {
            id:         id.to_string(),
            photo:      None,
            is_loading: true,
            error:      None,
        });
        (session.generation, token)
    }

    async fn fetch(&self, generation: u64, id: String, token: CancellationToken) {
        let result = load_detail(&self.shared.source, &id, &token).await;

        let session = self.session();
        if session.generation != generation {
            debug!(%id, "discarding superseded detail response");
            return;
        }
        let update = match result {
            Ok(photo) => DetailState {
                id,
                photo: Some(photo),
                is_loading: false,
                error: None,
            },
            Err(e) if e.is_cancelled() => return,
            Err(e) => {
                let message = e.user_message().unwrap_or_else(|| DEFAULT_DETAIL_ERROR.to_string());
                debug!(%id, %message, "detail load failed");
                DetailState {
                    id,
                    photo: None,
                    is_loading: false,
                    error: Some(message),
                }
            }
        };
        self.shared.state.send_replace(update);
        drop(session);
    }
}
