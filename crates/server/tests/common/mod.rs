//! Common test utilities for in-process server tests.
//!
//! Provides a fake upstream catalog API served by axum on an ephemeral
//! port, and a fixture wiring the real router to it.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use reelscout_core::{Config, ServerConfig, UpstreamConfig, UpstreamForwarder};
use reelscout_server::{api::create_router, state::AppState};

/// Token the fixture hands to the forwarder.
pub const TEST_TOKEN: &str = "test-token-0123456789";

/// A request as seen by the fake upstream.
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub accept: Option<String>,
}

#[derive(Default)]
struct UpstreamState {
    replies: Mutex<HashMap<String, (StatusCode, String)>>,
    requests: Mutex<Vec<UpstreamRequest>>,
}

/// Fake catalog API mounted under `/3`.
///
/// Unscripted paths answer 404 with a `status_message`, like the real one.
#[derive(Clone)]
pub struct FakeUpstream {
    pub base_url: String,
    state: Arc<UpstreamState>,
}

impl FakeUpstream {
    pub async fn start() -> Self {
        let state = Arc::new(UpstreamState::default());
        let app = Router::new()
            .route("/3/{*path}", get(upstream_handler))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake upstream");
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            base_url: format!("http://{}/3", addr),
            state,
        }
    }

    /// Reply to `path` with a JSON body.
    pub fn respond_json(&self, path: &str, body: Value) {
        self.respond_raw(path, StatusCode::OK, &body.to_string());
    }

    /// Reply to `path` with an arbitrary status and body.
    pub fn respond_raw(&self, path: &str, status: StatusCode, body: &str) {
        self.state
            .replies
            .lock()
            .unwrap()
            .insert(path.to_string(), (status, body.to_string()));
    }

    pub fn requests(&self) -> Vec<UpstreamRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

async fn upstream_handler(
    State(state): State<Arc<UpstreamState>>,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    state.requests.lock().unwrap().push(UpstreamRequest {
        path: path.clone(),
        query,
        authorization: header("authorization"),
        accept: header("accept"),
    });

    let reply = state.replies.lock().unwrap().get(&path).cloned();
    match reply {
        Some((status, body)) => (status, body).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            json!({
                "success": false,
                "status_code": 34,
                "status_message": "The resource you requested could not be found."
            })
            .to_string(),
        )
            .into_response(),
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// In-process server backed by a [`FakeUpstream`].
pub struct TestFixture {
    pub router: Router,
    pub upstream: FakeUpstream,
}

impl TestFixture {
    /// Fixture whose forwarder holds [`TEST_TOKEN`].
    pub async fn new() -> Self {
        Self::with_token(Some(TEST_TOKEN.to_string())).await
    }

    /// Fixture with an explicit token (or none).
    pub async fn with_token(token: Option<String>) -> Self {
        let upstream = FakeUpstream::start().await;
        let router = create_router(Arc::new(app_state(&upstream.base_url, token)));
        Self { router, upstream }
    }

    /// Fixture whose forwarder points at a port nothing listens on.
    pub async fn with_unreachable_upstream() -> Self {
        let upstream = FakeUpstream::start().await;
        let base_url = format!("http://{}/3", dead_address());
        let state = app_state(&base_url, Some(TEST_TOKEN.to_string()));
        let router = create_router(Arc::new(state));
        Self { router, upstream }
    }

    /// Send a GET request to the router.
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }

    /// Serve the router on an ephemeral port; returns the proxy base URL
    /// (including `/api`).
    pub async fn serve(&self) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind proxy");
        let addr = listener.local_addr().unwrap();
        let app = self.router.clone();
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });
        format!("http://{}/api", addr)
    }
}

fn app_state(upstream_base_url: &str, token: Option<String>) -> AppState {
    let config = Config {
        server: ServerConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0, // Not used for in-process testing
        },
        upstream: UpstreamConfig {
            base_url: upstream_base_url.to_string(),
            access_token: token.clone(),
            timeout_secs: 5,
        },
        ..Default::default()
    };
    let forwarder = UpstreamForwarder::with_token(&config.upstream, token)
        .expect("Failed to create forwarder");
    AppState::new(config, forwarder)
}

/// An address nothing listens on.
pub fn dead_address() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}
