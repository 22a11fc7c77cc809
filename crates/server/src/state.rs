use reelscout_core::{Config, SanitizedConfig, UpstreamForwarder};

/// Shared application state
pub struct AppState {
    config: Config,
    forwarder: UpstreamForwarder,
}

impl AppState {
    pub fn new(config: Config, forwarder: UpstreamForwarder) -> Self {
        Self { config, forwarder }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn forwarder(&self) -> &UpstreamForwarder {
        &self.forwarder
    }
}
