use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{handlers, middleware::metrics_middleware, proxy};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Catalog proxy
    let api_routes = Router::new()
        .route("/api", get(proxy::missing_endpoint))
        .route("/api/", get(proxy::missing_endpoint))
        .route("/api/{*path}", get(proxy::forward));

    Router::new()
        .merge(api_routes)
        // Health, config and metrics
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/metrics", get(handlers::metrics))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
