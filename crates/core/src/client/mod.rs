//! Remote Data Client: the single "GET JSON at path with query" facility
//! every view goes through.
//!
//! No caching, retries or de-duplication happen at this layer. Callers
//! default whatever fields the body lacks.

mod proxy_client;

pub use proxy_client::ProxyClient;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Shown when a failure carries nothing more specific.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to fetch data";

/// Errors returned by a [`CatalogSource`].
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// Non-success status. `body` is the parsed error body when it was JSON.
    #[error("Request failed with status code {status}")]
    Api { status: u16, body: Option<Value> },

    /// The request never produced a response (connect, DNS, timeout).
    #[error("{0}")]
    Transport(String),

    /// A success response whose body was not JSON.
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Message carried in the failed response body, if any.
    ///
    /// Reads the proxy envelope's `message` first, then the upstream's own
    /// `status_message`.
    pub fn structured_message(&self) -> Option<&str> {
        let ClientError::Api {
            body: Some(body), ..
        } = self
        else {
            return None;
        };
        ["message", "status_message"]
            .iter()
            .filter_map(|field| body.get(*field).and_then(Value::as_str))
            .find(|m| !m.trim().is_empty())
    }

    /// Human-readable message: structured body message, then the error's own
    /// description, then [`GENERIC_FAILURE_MESSAGE`].
    pub fn user_message(&self) -> String {
        if let Some(message) = self.structured_message() {
            return message.to_string();
        }
        let description = self.to_string();
        if description.trim().is_empty() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            description
        }
    }
}

/// Anything that can answer catalog GETs with JSON.
///
/// Implemented by [`ProxyClient`] for real traffic and by
/// `testing::MockCatalogSource` for tests.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the JSON body at `path` (relative, no leading slash needed).
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, ClientError>;
}
