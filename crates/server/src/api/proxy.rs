//! Catalog proxy handlers.

use axum::{
    extract::{Path, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use reelscout_core::ProxyError;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

use crate::state::AppState;

/// Wrapper so core errors can become HTTP responses.
pub struct ApiError(ProxyError);

impl From<ProxyError> for ApiError {
    fn from(err: ProxyError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::BAD_GATEWAY);
        (status, Json(self.0.envelope())).into_response()
    }
}

/// GET /api/{*path}
pub async fn forward(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Json<Value>, ApiError> {
    let body = state.forwarder().forward(&path, query.as_deref()).await?;
    Ok(Json(body))
}

/// GET /api and /api/ (no endpoint given).
pub async fn missing_endpoint() -> ApiError {
    warn!("Proxy called without an endpoint");
    ApiError(ProxyError::EmptyPath)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_empty_path_is_bad_request() {
        let response = ApiError(ProxyError::EmptyPath).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["message"], "API endpoint not specified");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_upstream_status_is_relayed() {
        let response = ApiError(ProxyError::Upstream {
            status: 401,
            details: "Invalid API key: You must be granted a valid key.".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Failed to fetch data from external API.");
        assert_eq!(
            body["details"],
            "Invalid API key: You must be granted a valid key."
        );
    }

    #[tokio::test]
    async fn test_out_of_range_status_falls_back_to_bad_gateway() {
        let response = ApiError(ProxyError::Upstream {
            status: 42,
            details: "odd".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
