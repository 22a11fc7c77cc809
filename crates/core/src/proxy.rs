//! Proxy Forwarder: relays catalog GETs upstream with the server-held token.
//!
//! The token only ever travels in the `Authorization` header. It is never
//! logged and never copied into an error body.

use std::time::{Duration, Instant};

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

use crate::config::UpstreamConfig;
use crate::metrics::{UPSTREAM_DURATION, UPSTREAM_FORWARDS};

/// Errors produced while forwarding. Each maps to an HTTP status and an
/// [`ErrorEnvelope`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProxyError {
    #[error("API endpoint not specified")]
    EmptyPath,

    /// No upstream credential; the proxy refuses to forward.
    #[error("Server configuration error.")]
    NotConfigured,

    #[error("Failed to fetch data from external API.")]
    Upstream { status: u16, details: String },

    #[error("Internal Server Error while contacting external API.")]
    Transport(String),
}

impl ProxyError {
    pub fn status_code(&self) -> u16 {
        match self {
            ProxyError::EmptyPath => 400,
            ProxyError::NotConfigured | ProxyError::Transport(_) => 500,
            ProxyError::Upstream { status, .. } => *status,
        }
    }

    pub fn details(&self) -> Option<&str> {
        match self {
            ProxyError::Upstream { details, .. } | ProxyError::Transport(details) => {
                Some(details)
            }
            _ => None,
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            message: self.to_string(),
            details: self.details().map(str::to_string),
        }
    }
}

/// Error body returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Forwards requests to the upstream catalog API.
pub struct UpstreamForwarder {
    client: Client,
    base_url: String,
    access_token: Option<String>,
}

impl std::fmt::Debug for UpstreamForwarder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamForwarder")
            .field("base_url", &self.base_url)
            .field("access_token_configured", &self.access_token.is_some())
            .finish()
    }
}

impl UpstreamForwarder {
    /// Build a forwarder. The token is resolved from config or environment.
    pub fn new(config: &UpstreamConfig) -> Result<Self, ProxyError> {
        Self::with_token(config, config.resolve_access_token())
    }

    /// Build a forwarder with an explicit token (or none).
    pub fn with_token(
        config: &UpstreamConfig,
        access_token: Option<String>,
    ) -> Result<Self, ProxyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_secs)))
            .build()
            .map_err(|e| ProxyError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_token: access_token.filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.access_token.is_some()
    }

    /// Forward `GET {base}/{path}?{raw_query}` and return the JSON body.
    pub async fn forward(&self, path: &str, raw_query: Option<&str>) -> Result<Value, ProxyError> {
        let path = path.trim_matches('/');
        if path.trim().is_empty() {
            return Err(ProxyError::EmptyPath);
        }

        let Some(token) = self.access_token.as_deref() else {
            error!("Upstream access token is not configured; refusing to forward");
            UPSTREAM_FORWARDS.with_label_values(&["not_configured"]).inc();
            return Err(ProxyError::NotConfigured);
        };

        let target = match raw_query.filter(|q| !q.is_empty()) {
            Some(query) => format!("{}/{}?{}", self.base_url, path, query),
            None => format!("{}/{}", self.base_url, path),
        };

        debug!(target = %target, "Forwarding catalog request");
        let start = Instant::now();

        let result = self.send(&target, token).await;

        let outcome = match &result {
            Ok(_) => "ok",
            Err(ProxyError::Upstream { .. }) => "upstream_error",
            Err(_) => "transport_error",
        };
        UPSTREAM_FORWARDS.with_label_values(&[outcome]).inc();
        UPSTREAM_DURATION
            .with_label_values(&[outcome])
            .observe(start.elapsed().as_secs_f64());

        result
    }

    async fn send(&self, target: &str, token: &str) -> Result<Value, ProxyError> {
        let response = self
            .client
            .get(target)
            .bearer_auth(token)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| {
                error!("Network error contacting upstream for {}: {}", target, e);
                ProxyError::Transport(e.without_url().to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let details = upstream_error_details(response).await;
            error!("Upstream API error for {}: {}", target, details);
            return Err(ProxyError::Upstream {
                status: status.as_u16(),
                details,
            });
        }

        response.json::<Value>().await.map_err(|e| {
            error!("Unreadable upstream body for {}: {}", target, e);
            ProxyError::Transport(e.without_url().to_string())
        })
    }
}

/// Best description of an upstream failure: `status_message`, the JSON
/// body, the raw text, or a status line.
async fn upstream_error_details(response: Response) -> String {
    let status = response.status();
    let fallback = format!(
        "Status: {}, StatusText: {}. Failed to read response body.",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    );

    let text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            error!("Failed to read upstream error body: {}", e);
            return fallback;
        }
    };

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => json
            .get("status_message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| json.to_string()),
        Err(_) if !text.trim().is_empty() => text,
        Err(_) => fallback,
    }
}
