//! Single-shot loads: the home page rows and detail pages.
//!
//! These are at-most-once fetches with no retry; only list views paginate.

use futures::join;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

use crate::catalog::{ListPage, MediaDetails, ResultItem};
use crate::client::{CatalogSource, ClientError, GENERIC_FAILURE_MESSAGE};
use crate::identity::{DetailRoute, RouteError};

/// A horizontally scrolled row on the home page.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedRow {
    pub heading: &'static str,
    pub path: &'static str,
    pub items: Vec<ResultItem>,
    /// Set when the row could not be loaded; the row then renders empty.
    pub error: Option<String>,
}

/// Banner plus the fixed rows of the home page.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeFeed {
    /// Trending items that have artwork to show.
    pub banner: Vec<ResultItem>,
    pub trending: FeedRow,
    pub rows: Vec<FeedRow>,
}

const TRENDING: (&str, &str) = ("Trending Theaters", "trending/all/week");

/// Rows under the trending banner.
pub const HOME_ROWS: [(&str, &str); 4] = [
    ("Now Playing", "movie/now_playing"),
    ("Top Rated Movies", "movie/top_rated"),
    ("Popular Tv Shows", "tv/popular"),
    ("On The Air", "tv/on_the_air"),
];

impl HomeFeed {
    /// Fetch every row concurrently. Rows fail independently.
    pub async fn load(source: &dyn CatalogSource) -> Self {
        let (trending, now_playing, top_rated, popular, on_the_air) = join!(
            load_row(source, TRENDING),
            load_row(source, HOME_ROWS[0]),
            load_row(source, HOME_ROWS[1]),
            load_row(source, HOME_ROWS[2]),
            load_row(source, HOME_ROWS[3]),
        );

        let banner = trending
            .items
            .iter()
            .filter(|item| item.banner_path().is_some())
            .cloned()
            .collect();

        Self {
            banner,
            trending,
            rows: vec![now_playing, top_rated, popular, on_the_air],
        }
    }
}

async fn load_row(source: &dyn CatalogSource, (heading, path): (&'static str, &'static str)) -> FeedRow {
    match source.get(path, &[]).await {
        Ok(body) => FeedRow {
            heading,
            path,
            items: ListPage::from_json(&body).results,
            error: None,
        },
        Err(e) => {
            error!("Failed to load home row {}: {}", path, e);
            FeedRow {
                heading,
                path,
                items: Vec::new(),
                error: Some(e.user_message()),
            }
        }
    }
}

/// Why a detail page could not be shown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetailError {
    /// Bad route or the upstream has no such record.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Failed(String),
}

impl From<RouteError> for DetailError {
    fn from(err: RouteError) -> Self {
        match err {
            RouteError::NotFound(what) => DetailError::NotFound(what),
        }
    }
}

/// Parse the route segments and load the detail record.
pub async fn load_details_for(
    source: &dyn CatalogSource,
    media_type: &str,
    id: &str,
) -> Result<MediaDetails, DetailError> {
    let route = DetailRoute::parse(media_type, id)?;
    load_details(source, route).await
}

/// Fetch `<type>/<id>` with credits and videos appended.
pub async fn load_details(
    source: &dyn CatalogSource,
    route: DetailRoute,
) -> Result<MediaDetails, DetailError> {
    let query = [(
        "append_to_response".to_string(),
        "credits,videos".to_string(),
    )];

    debug!("Loading details for {}", route.path());

    let body: Value = source.get(&route.path(), &query).await.map_err(|e| {
        error!("Detail request for {} failed: {}", route.path(), e);
        detail_error(&route, e)
    })?;

    serde_json::from_value(body).map_err(|e| {
        error!("Unexpected detail body for {}: {}", route.path(), e);
        DetailError::Failed(GENERIC_FAILURE_MESSAGE.to_string())
    })
}

fn detail_error(route: &DetailRoute, err: ClientError) -> DetailError {
    if err.is_not_found() {
        DetailError::NotFound(route.path())
    } else {
        DetailError::Failed(err.user_message())
    }
}
