use serde_json::Value;
use tracing::debug;

use super::state::{FailureStage, ListStatus, PageState};
use crate::catalog::ListPage;
use crate::client::ClientError;
use crate::identity::ListIdentity;

/// A fetch the session has authorised. Hand it to a source, then return the
/// outcome through [`ListSession::complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    generation: u64,
    identity: ListIdentity,
    page: u32,
    path: String,
    query: Vec<(String, String)>,
}

impl PageRequest {
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn identity(&self) -> &ListIdentity {
        &self.identity
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Identity parameters plus `page`.
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }
}

/// What happened when a request's outcome was fed back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Results were committed.
    Committed { page: u32, received: usize },
    /// The request failed; the message is now the session error.
    Failed { page: u32, message: String },
    /// The session moved on (reset or cleared) while the request was out.
    Stale,
}

/// Paginated list state for one identity at a time.
#[derive(Debug, Default)]
pub struct ListSession {
    identity: Option<ListIdentity>,
    generation: u64,
    state: PageState,
}

impl ListSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identity(&self) -> Option<&ListIdentity> {
        self.identity.as_ref()
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// Replace the session for a new identity and issue page 1.
    ///
    /// Returns `None` only when the identity is not usable (blank search);
    /// the fresh state then stays idle.
    pub fn reset(&mut self, identity: ListIdentity) -> Option<PageRequest> {
        debug!(identity = %identity, "List session reset");
        self.generation += 1;
        self.state = PageState::default();
        self.identity = Some(identity);
        self.fetch_page(1)
    }

    /// Drop the identity (e.g. the search box was emptied). Any request in
    /// flight becomes stale.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.state = PageState::default();
        self.identity = None;
    }

    /// Authorise a fetch of `page`, or return `None` without touching state
    /// when a fetch is in flight, the page lies past the declared total, or
    /// there is no usable identity.
    pub fn fetch_page(&mut self, page: u32) -> Option<PageRequest> {
        if page == 0 || self.state.is_fetching() {
            return None;
        }
        if self.state.total_pages > 0 && page > self.state.total_pages {
            return None;
        }
        let identity = self.identity.as_ref().filter(|i| i.is_valid())?.clone();

        self.state.status = if page == 1 {
            ListStatus::LoadingInitial
        } else {
            ListStatus::LoadingMore
        };
        self.state.error = None;

        let endpoint = identity.endpoint();
        let mut query = endpoint.query;
        query.push(("page".to_string(), page.to_string()));

        Some(PageRequest {
            generation: self.generation,
            identity,
            page,
            path: endpoint.path,
            query,
        })
    }

    /// Scroll proximity signal. Issues the page after `current_page` when
    /// page 1 is committed, nothing is in flight, and the total allows it.
    pub fn on_scroll_near_bottom(&mut self) -> Option<PageRequest> {
        let state = &self.state;
        if !state.initial_page_loaded() || state.is_fetching() || state.is_exhausted() {
            return None;
        }
        self.fetch_page(self.state.current_page + 1)
    }

    /// Commit the outcome of `request`. Outcomes from an earlier generation
    /// are ignored.
    pub fn complete(
        &mut self,
        request: &PageRequest,
        outcome: Result<Value, ClientError>,
    ) -> Completion {
        if request.generation != self.generation || !self.state.is_fetching() {
            debug!(
                identity = %request.identity,
                page = request.page,
                "Dropping stale page response"
            );
            return Completion::Stale;
        }

        let page = request.page;
        match outcome {
            Ok(body) => {
                let ListPage {
                    results,
                    total_pages,
                } = ListPage::from_json(&body);
                let received = results.len();

                if page == 1 {
                    self.state.items = results;
                } else {
                    self.state.items.extend(results);
                }
                self.state.total_pages = total_pages;
                self.state.current_page = self.state.current_page.max(page);
                self.state.status = if self.state.is_exhausted() {
                    ListStatus::ExhaustedAllPages
                } else {
                    ListStatus::Ready
                };

                Completion::Committed { page, received }
            }
            Err(err) => {
                let message = err.user_message();
                debug!(
                    identity = %request.identity,
                    page,
                    error = %message,
                    "Page fetch failed"
                );

                let stage = if page == 1 {
                    self.state.items.clear();
                    self.state.total_pages = 0;
                    FailureStage::InitialPage
                } else {
                    FailureStage::LaterPage
                };
                self.state.status = ListStatus::Failed(stage);
                self.state.error = Some(message.clone());

                Completion::Failed { page, message }
            }
        }
    }
}
