use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::warn;

use super::scroll::ScrollMetrics;
use super::session::{Completion, ListSession, PageRequest};
use super::state::PageState;
use crate::client::CatalogSource;
use crate::identity::ListIdentity;

/// Drives a [`ListSession`] against a [`CatalogSource`].
///
/// The session lock is only held for the synchronous guard-and-transition
/// steps, never across a network call, so scroll signals raised while a
/// page is loading see the in-flight state immediately.
pub struct ListController {
    source: Arc<dyn CatalogSource>,
    session: Mutex<ListSession>,
}

impl ListController {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            session: Mutex::new(ListSession::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ListSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current list state for rendering.
    pub fn snapshot(&self) -> PageState {
        self.lock().state().clone()
    }

    pub fn identity(&self) -> Option<ListIdentity> {
        self.lock().identity().cloned()
    }

    /// Start a fresh session for `identity` and load its first page.
    ///
    /// Returns `None` when the identity is unusable and nothing was requested.
    pub async fn reset(&self, identity: ListIdentity) -> Option<Completion> {
        let request = self.lock().reset(identity)?;
        Some(self.run(request).await)
    }

    /// Forget the identity; pending responses become stale.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Fetch a specific page. `None` means a guard short-circuited.
    pub async fn fetch_page(&self, page: u32) -> Option<Completion> {
        let request = self.lock().fetch_page(page)?;
        Some(self.run(request).await)
    }

    /// Load the next page if the scroll gate allows it.
    pub async fn on_scroll_near_bottom(&self) -> Option<Completion> {
        let request = self.lock().on_scroll_near_bottom()?;
        Some(self.run(request).await)
    }

    /// Feed raw viewport geometry; only acts when near the bottom.
    pub async fn on_scroll(&self, metrics: ScrollMetrics) -> Option<Completion> {
        if !metrics.is_near_bottom() {
            return None;
        }
        self.on_scroll_near_bottom().await
    }

    async fn run(&self, request: PageRequest) -> Completion {
        let outcome = self.source.get(request.path(), request.query()).await;
        if let Err(err) = &outcome {
            warn!(
                identity = %request.identity(),
                page = request.page(),
                error = %err,
                "List page request failed"
            );
        }
        self.lock().complete(&request, outcome)
    }
}

impl std::fmt::Debug for ListController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListController")
            .field("session", &*self.lock())
            .finish_non_exhaustive()
    }
}
