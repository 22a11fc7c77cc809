//! Core of the reelscout media-discovery app: catalog model, the Remote
//! Data Client, the Paginated List Controller and the proxy forwarder.

pub mod catalog;
pub mod client;
pub mod config;
pub mod context;
pub mod feed;
pub mod identity;
pub mod metrics;
pub mod pagination;
pub mod proxy;
pub mod testing;

pub use catalog::{
    CastMember, Genre, ImageBase, ImageConfig, ImageKind, ListPage, MediaDetails, MediaType,
    ResultItem, Video,
};
pub use client::{CatalogSource, ClientError, ProxyClient, GENERIC_FAILURE_MESSAGE};
pub use config::{
    load_config, load_config_from_str, validate_config, ClientConfig, Config, ConfigError,
    SanitizedConfig, ServerConfig, UpstreamConfig,
};
pub use context::{AppContext, MobileSearchPanel, SearchDebouncer, SearchNavigation};
pub use feed::{load_details, load_details_for, DetailError, FeedRow, HomeFeed};
pub use identity::{DetailRoute, Endpoint, ListIdentity, RelatedKind, RouteError};
pub use pagination::{
    Completion, FailureStage, ListController, ListSession, ListStatus, PageRequest, PageState,
    ScrollMetrics,
};
pub use proxy::{ErrorEnvelope, ProxyError, UpstreamForwarder};
