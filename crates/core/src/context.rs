//! Process-wide view state: the image base fetched at startup and the
//! search entry points (mobile panel, debounced header box).

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::catalog::{ImageBase, ImageConfig};
use crate::client::CatalogSource;

/// Quiet period before the header search box navigates.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Where a search interaction should take the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchNavigation {
    /// Show results for the (trimmed) query.
    Results(String),
    /// Go back to the home page.
    Home,
    /// Do nothing.
    Stay,
}

impl SearchNavigation {
    /// Route to push, if any.
    pub fn route(&self) -> Option<String> {
        match self {
            SearchNavigation::Results(query) => {
                Some(format!("/search?q={}", urlencoding::encode(query)))
            }
            SearchNavigation::Home => Some("/".to_string()),
            SearchNavigation::Stay => None,
        }
    }
}

/// Mobile search panel visibility and draft input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MobileSearchPanel {
    visible: bool,
    input: String,
}

impl MobileSearchPanel {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn open(&mut self) {
        self.visible = true;
    }

    /// Hide the panel and discard the draft.
    pub fn close(&mut self) {
        self.visible = false;
        self.input.clear();
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Submit the draft. Blank input keeps the user where they are.
    pub fn submit(&self) -> SearchNavigation {
        let query = self.input.trim();
        if query.is_empty() {
            SearchNavigation::Stay
        } else {
            SearchNavigation::Results(query.to_string())
        }
    }
}

/// Application context built once at startup and passed to views.
#[derive(Debug, Clone, Default)]
pub struct AppContext {
    images: ImageBase,
    mobile_search: MobileSearchPanel,
}

impl AppContext {
    pub fn new(images: ImageBase) -> Self {
        Self {
            images,
            mobile_search: MobileSearchPanel::default(),
        }
    }

    /// Fetch `/configuration` and build the context.
    ///
    /// Never fails: a missing or malformed configuration leaves the image
    /// base unavailable and artwork falls back to placeholders.
    pub async fn bootstrap(source: &dyn CatalogSource) -> Self {
        let images = match source.get("configuration", &[]).await {
            Ok(body) => match ImageConfig::from_json(&body) {
                Some(config) => {
                    debug!(base = %config.secure_base_url, "Image base configured");
                    ImageBase::new(Some(config))
                }
                None => {
                    error!("Configuration response has no images.secure_base_url");
                    ImageBase::unavailable()
                }
            },
            Err(e) => {
                error!("Failed to fetch catalog configuration: {}", e);
                ImageBase::unavailable()
            }
        };
        Self::new(images)
    }

    pub fn images(&self) -> &ImageBase {
        &self.images
    }

    pub fn mobile_search(&self) -> &MobileSearchPanel {
        &self.mobile_search
    }

    pub fn mobile_search_mut(&mut self) -> &mut MobileSearchPanel {
        &mut self.mobile_search
    }
}

/// Debounced header search box.
///
/// Every keystroke replaces the pending value; once input has been quiet
/// for the delay, the latest value is resolved to a navigation and sent on
/// the output channel.
#[derive(Debug)]
pub struct SearchDebouncer {
    input: mpsc::UnboundedSender<String>,
    task: JoinHandle<()>,
}

impl SearchDebouncer {
    pub fn spawn(delay: Duration) -> (Self, mpsc::UnboundedReceiver<SearchNavigation>) {
        let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();
        let (nav_tx, nav_rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(async move {
            while let Some(mut pending) = input_rx.recv().await {
                loop {
                    tokio::select! {
                        next = input_rx.recv() => match next {
                            Some(value) => pending = value,
                            None => return,
                        },
                        _ = tokio::time::sleep(delay) => break,
                    }
                }

                let query = pending.trim();
                let navigation = if query.is_empty() {
                    SearchNavigation::Home
                } else {
                    SearchNavigation::Results(query.to_string())
                };
                if nav_tx.send(navigation).is_err() {
                    return;
                }
            }
        });

        (
            Self {
                input: input_tx,
                task,
            },
            nav_rx,
        )
    }

    /// Record the current contents of the search box.
    pub fn input(&self, value: impl Into<String>) {
        // The task only exits once the receiver is gone; nothing to report then.
        let _ = self.input.send(value.into());
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
