use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Environment variable consulted when the config file carries no token.
pub const ACCESS_TOKEN_ENV: &str = "TMDB_ACCESS_TOKEN";

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

/// Upstream catalog API that the proxy forwards to.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Catalog API base URL (default: https://api.themoviedb.org/3).
    #[serde(default = "default_upstream_base_url")]
    pub base_url: String,
    /// Bearer token. Falls back to `TMDB_ACCESS_TOKEN` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_upstream_base_url(),
            access_token: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl UpstreamConfig {
    /// Resolve the access token from config, then the environment.
    ///
    /// Empty values count as absent so a blank entry cannot turn into an
    /// unauthenticated forward.
    pub fn resolve_access_token(&self) -> Option<String> {
        self.access_token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| {
                std::env::var(ACCESS_TOKEN_ENV)
                    .ok()
                    .filter(|t| !t.trim().is_empty())
            })
    }
}

fn default_upstream_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

/// Settings for the Remote Data Client talking to the proxy.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Proxy base address, including the `/api` prefix.
    #[serde(default = "default_proxy_base_url")]
    pub proxy_base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            proxy_base_url: default_proxy_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_proxy_base_url() -> String {
    "http://127.0.0.1:8080/api".to_string()
}

fn default_timeout() -> u32 {
    30
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub upstream: SanitizedUpstreamConfig,
    pub client: ClientConfig,
}

/// Sanitized upstream config (token hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedUpstreamConfig {
    pub base_url: String,
    pub access_token_configured: bool,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            upstream: SanitizedUpstreamConfig {
                base_url: config.upstream.base_url.clone(),
                access_token_configured: config.upstream.resolve_access_token().is_some(),
                timeout_secs: config.upstream.timeout_secs,
            },
            client: config.client.clone(),
        }
    }
}
