//! What a list session or detail page is about, and how it maps to endpoints.

use std::fmt;

use thiserror::Error;

use crate::catalog::MediaType;

/// A route parameter that does not name anything in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Which related list to show under a detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelatedKind {
    Similar,
    Recommendations,
}

impl RelatedKind {
    fn segment(&self) -> &'static str {
        match self {
            RelatedKind::Similar => "similar",
            RelatedKind::Recommendations => "recommendations",
        }
    }
}

/// The parameter set that defines one paginated result set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ListIdentity {
    /// Category browsing, `/discover/<type>`.
    Discover(MediaType),
    /// Free-text search over collections.
    Search(String),
    Related {
        media_type: MediaType,
        id: u64,
        kind: RelatedKind,
    },
    /// Weekly trending across movies and shows.
    Trending,
}

/// Path plus fixed query parameters for an identity. `page` is added per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl ListIdentity {
    /// Parse the category segment of an explore route.
    pub fn discover(segment: &str) -> Result<Self, RouteError> {
        Ok(ListIdentity::Discover(segment.parse()?))
    }

    /// A search identity; the query is trimmed.
    pub fn search(query: impl AsRef<str>) -> Self {
        ListIdentity::Search(query.as_ref().trim().to_string())
    }

    /// An identity is usable when it can be turned into a request.
    pub fn is_valid(&self) -> bool {
        match self {
            ListIdentity::Search(query) => !query.trim().is_empty(),
            _ => true,
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        match self {
            ListIdentity::Discover(media_type) => Endpoint {
                path: format!("discover/{}", media_type),
                query: Vec::new(),
            },
            ListIdentity::Search(query) => Endpoint {
                path: "search/collection".to_string(),
                query: vec![("query".to_string(), query.trim().to_string())],
            },
            ListIdentity::Related {
                media_type,
                id,
                kind,
            } => Endpoint {
                path: format!("{}/{}/{}", media_type, id, kind.segment()),
                query: Vec::new(),
            },
            ListIdentity::Trending => Endpoint {
                path: "trending/all/week".to_string(),
                query: Vec::new(),
            },
        }
    }
}

impl fmt::Display for ListIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListIdentity::Discover(media_type) => write!(f, "discover:{}", media_type),
            ListIdentity::Search(query) => write!(f, "search:{}", query),
            ListIdentity::Related {
                media_type,
                id,
                kind,
            } => write!(f, "{}:{}/{}", kind.segment(), media_type, id),
            ListIdentity::Trending => f.write_str("trending"),
        }
    }
}

/// A validated `/<mediaType>/<id>` detail route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DetailRoute {
    pub media_type: MediaType,
    pub id: u64,
}

impl DetailRoute {
    /// Both segments must be well-formed; anything else is a not-found.
    pub fn parse(media_type: &str, id: &str) -> Result<Self, RouteError> {
        let media_type: MediaType = media_type.parse()?;

        if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RouteError::NotFound(format!("invalid id '{}'", id)));
        }
        let id = id
            .parse()
            .map_err(|_| RouteError::NotFound(format!("id out of range '{}'", id)))?;

        Ok(Self { media_type, id })
    }

    pub fn path(&self) -> String {
        format!("{}/{}", self.media_type, self.id)
    }

    pub fn related(&self, kind: RelatedKind) -> ListIdentity {
        ListIdentity::Related {
            media_type: self.media_type,
            id: self.id,
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        assert_eq!(
            ListIdentity::Discover(MediaType::Tv).endpoint().path,
            "discover/tv"
        );
        assert_eq!(ListIdentity::Trending.endpoint().path, "trending/all/week");

        let search = ListIdentity::search("  blade runner ").endpoint();
        assert_eq!(search.path, "search/collection");
        assert_eq!(
            search.query,
            vec![("query".to_string(), "blade runner".to_string())]
        );

        let route = DetailRoute::parse("movie", "78").unwrap();
        assert_eq!(
            route.related(RelatedKind::Recommendations).endpoint().path,
            "movie/78/recommendations"
        );
        assert_eq!(
            route.related(RelatedKind::Similar).endpoint().path,
            "movie/78/similar"
        );
    }

    #[test]
    fn test_blank_search_is_invalid() {
        assert!(!ListIdentity::search("   ").is_valid());
        assert!(ListIdentity::search("x").is_valid());
        assert!(ListIdentity::Trending.is_valid());
    }

    #[test]
    fn test_discover_rejects_unknown_category() {
        assert_eq!(
            ListIdentity::discover("movie").unwrap(),
            ListIdentity::Discover(MediaType::Movie)
        );
        assert!(ListIdentity::discover("people").is_err());
    }

    #[test]
    fn test_detail_route_validation() {
        let route = DetailRoute::parse("tv", "1396").unwrap();
        assert_eq!(route.media_type, MediaType::Tv);
        assert_eq!(route.path(), "tv/1396");

        assert!(DetailRoute::parse("person", "1").is_err());
        assert!(DetailRoute::parse("movie", "").is_err());
        assert!(DetailRoute::parse("movie", "12a").is_err());
        assert!(DetailRoute::parse("movie", "-1").is_err());
        assert!(DetailRoute::parse("movie", "99999999999999999999999").is_err());
    }
}
