//! HTTP surface of reelscout: the catalog proxy plus health, config and
//! metrics endpoints.

pub mod api;
pub mod metrics;
pub mod state;
