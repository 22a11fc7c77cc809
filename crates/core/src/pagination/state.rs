use serde::Serialize;

use crate::catalog::ResultItem;

/// Where a failed session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    /// Page 1 failed; nothing is shown and scrolling stays locked.
    InitialPage,
    /// A later page failed; what was loaded stays visible.
    LaterPage,
}

/// Lifecycle of one list session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "stage")]
pub enum ListStatus {
    /// No identity yet.
    Idle,
    LoadingInitial,
    LoadingMore,
    /// Page(s) committed; more may follow.
    Ready,
    /// The last declared page has been committed.
    ExhaustedAllPages,
    Failed(FailureStage),
}

impl ListStatus {
    pub fn is_fetching(&self) -> bool {
        matches!(self, ListStatus::LoadingInitial | ListStatus::LoadingMore)
    }

    /// Whether page 1 has been committed for this session. Scroll-triggered
    /// fetching is gated on this.
    pub fn initial_page_loaded(&self) -> bool {
        matches!(
            self,
            ListStatus::LoadingMore
                | ListStatus::Ready
                | ListStatus::ExhaustedAllPages
                | ListStatus::Failed(FailureStage::LaterPage)
        )
    }
}

/// Per-session list data.
///
/// `items` only grows within a session and is only emptied by a reset or
/// a failed first page. `current_page` never decreases.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageState {
    pub(crate) items: Vec<ResultItem>,
    pub(crate) current_page: u32,
    pub(crate) total_pages: u32,
    pub(crate) status: ListStatus,
    pub(crate) error: Option<String>,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current_page: 1,
            total_pages: 0,
            status: ListStatus::Idle,
            error: None,
        }
    }
}

impl PageState {
    pub fn items(&self) -> &[ResultItem] {
        &self.items
    }

    /// Last committed page (1 before anything is committed).
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Declared page count, 0 while unknown.
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn status(&self) -> ListStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_fetching(&self) -> bool {
        self.status.is_fetching()
    }

    pub fn initial_page_loaded(&self) -> bool {
        self.status.initial_page_loaded()
    }

    /// True when the declared last page has been reached.
    pub fn is_exhausted(&self) -> bool {
        self.total_pages > 0 && self.current_page >= self.total_pages
    }

    /// "You've reached the end" banner condition.
    pub fn reached_end(&self) -> bool {
        !self.is_fetching() && self.is_exhausted() && !self.items.is_empty()
    }
}
