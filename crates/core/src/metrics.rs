//! Prometheus metrics for core components.
//!
//! Upstream forwarding outcomes and latency. HTTP-level metrics live in
//! the server crate.

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts};

/// Upstream forwards by outcome.
pub static UPSTREAM_FORWARDS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "reelscout_upstream_forwards_total",
            "Total requests forwarded to the catalog API",
        ),
        &["outcome"], // "ok", "upstream_error", "transport_error", "not_configured"
    )
    .unwrap()
});

/// Upstream round-trip duration in seconds.
pub static UPSTREAM_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "reelscout_upstream_request_duration_seconds",
            "Duration of catalog API requests",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["outcome"],
    )
    .unwrap()
});

/// Every core metric, for registration by the server.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(UPSTREAM_FORWARDS.clone()),
        Box::new(UPSTREAM_DURATION.clone()),
    ]
}
