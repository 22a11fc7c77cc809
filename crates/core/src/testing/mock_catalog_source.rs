//! Mock catalog source for testing.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, RwLock};

use crate::client::{CatalogSource, ClientError};

/// A recorded request for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl RecordedRequest {
    /// Value of a query parameter.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The `page` parameter, if present and numeric.
    pub fn page(&self) -> Option<u32> {
        self.param("page").and_then(|p| p.parse().ok())
    }
}

type Reply = Result<Value, ClientError>;

/// Mock implementation of the CatalogSource trait.
///
/// Provides controllable behavior for testing:
/// - Scripted replies per path, optionally per page
/// - Request recording
/// - One-shot error injection
/// - Holding a path's replies until released, to keep a request in flight
///
/// Unscripted paths answer 404 with an upstream-style `status_message`.
///
/// # Example
///
/// ```rust,ignore
/// use reelscout_core::testing::{fixtures, MockCatalogSource};
///
/// let source = MockCatalogSource::new();
/// source.set_page("discover/movie", 1, fixtures::list_page(&[1, 2], 5)).await;
///
/// let body = source.get("discover/movie", &[("page".into(), "1".into())]).await?;
/// ```
#[derive(Debug, Default)]
pub struct MockCatalogSource {
    /// Replies by (path, page). `None` page matches any page.
    replies: Arc<RwLock<HashMap<(String, Option<u32>), Reply>>>,
    /// Recorded requests, in arrival order.
    requests: Arc<RwLock<Vec<RecordedRequest>>>,
    /// If set, the next request fails with this error.
    next_error: Arc<RwLock<Option<ClientError>>>,
    /// Paths whose replies wait for `release`.
    holds: Arc<RwLock<HashMap<String, Arc<Notify>>>>,
}

impl MockCatalogSource {
    /// Create a new mock with no scripted replies.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Scripting
    // =========================================================================

    /// Reply to `path` with `body` regardless of page.
    pub async fn set_response(&self, path: &str, body: Value) {
        self.replies
            .write()
            .await
            .insert((path.to_string(), None), Ok(body));
    }

    /// Reply to one page of `path`.
    pub async fn set_page(&self, path: &str, page: u32, body: Value) {
        self.replies
            .write()
            .await
            .insert((path.to_string(), Some(page)), Ok(body));
    }

    /// Fail one page of `path`.
    pub async fn set_page_error(&self, path: &str, page: u32, error: ClientError) {
        self.replies
            .write()
            .await
            .insert((path.to_string(), Some(page)), Err(error));
    }

    /// Fail every request to `path`.
    pub async fn set_error(&self, path: &str, error: ClientError) {
        self.replies
            .write()
            .await
            .insert((path.to_string(), None), Err(error));
    }

    /// Configure the next request to fail with the given error.
    pub async fn set_next_error(&self, error: ClientError) {
        *self.next_error.write().await = Some(error);
    }

    // =========================================================================
    // In-flight control
    // =========================================================================

    /// Hold replies for `path` until [`release`](Self::release) is called.
    pub async fn hold(&self, path: &str) {
        self.holds
            .write()
            .await
            .insert(path.to_string(), Arc::new(Notify::new()));
    }

    /// Let a held request for `path` complete.
    pub async fn release(&self, path: &str) {
        if let Some(gate) = self.holds.write().await.remove(path) {
            gate.notify_one();
        }
    }

    // =========================================================================
    // Request Recording
    // =========================================================================

    /// Get all recorded requests.
    pub async fn recorded_requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().await.clone()
    }

    /// Get the number of requests performed.
    pub async fn request_count(&self) -> usize {
        self.requests.read().await.len()
    }

    /// Wait until at least `count` requests were recorded.
    ///
    /// Returns `false` if that did not happen within about a second.
    pub async fn wait_for_requests(&self, count: usize) -> bool {
        for _ in 0..200 {
            if self.request_count().await >= count {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        false
    }

    async fn lookup(&self, path: &str, page: Option<u32>) -> Reply {
        let replies = self.replies.read().await;
        page.and_then(|p| replies.get(&(path.to_string(), Some(p))))
            .or_else(|| replies.get(&(path.to_string(), None)))
            .cloned()
            .unwrap_or_else(|| {
                Err(ClientError::Api {
                    status: 404,
                    body: Some(json!({
                        "status_message": "The resource you requested could not be found."
                    })),
                })
            })
    }
}

#[async_trait]
impl CatalogSource for MockCatalogSource {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, ClientError> {
        let request = RecordedRequest {
            path: path.to_string(),
            query: query.to_vec(),
        };
        let page = request.page();
        self.requests.write().await.push(request);

        let gate = self.holds.read().await.get(path).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        self.lookup(path, page).await
    }
}
