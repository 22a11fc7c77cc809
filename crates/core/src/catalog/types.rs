//! List-level catalog types.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::identity::RouteError;

/// Kind of catalog entry addressed by routes and endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(MediaType::Movie),
            "tv" => Ok(MediaType::Tv),
            other => Err(RouteError::NotFound(format!(
                "unsupported media type '{}'",
                other
            ))),
        }
    }
}

/// A movie or show as returned in a list response.
///
/// Only `id` is required. Fields the views do not read are kept in `extra`
/// so the record stays opaque.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultItem {
    pub id: u64,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub poster_path: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub backdrop_path: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub vote_average: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub release_date: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub first_air_date: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub media_type: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub overview: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResultItem {
    /// Build a bare item, mostly useful in tests and fixtures.
    pub fn with_id(id: u64) -> Self {
        Self {
            id,
            title: None,
            name: None,
            poster_path: None,
            backdrop_path: None,
            vote_average: None,
            release_date: None,
            first_air_date: None,
            media_type: None,
            overview: None,
            extra: Map::new(),
        }
    }

    /// Parse one entry of a `results` array. Entries without an integer
    /// `id` are invalid and yield `None`.
    pub fn from_json(value: Value) -> Option<Self> {
        if !value.get("id").is_some_and(Value::is_u64) {
            return None;
        }
        serde_json::from_value(value).ok()
    }

    /// Title for movies, name for shows.
    pub fn display_label(&self) -> &str {
        non_empty(&self.title)
            .or_else(|| non_empty(&self.name))
            .unwrap_or("Untitled")
    }

    pub fn display_date(&self) -> Option<&str> {
        non_empty(&self.release_date).or_else(|| non_empty(&self.first_air_date))
    }

    pub fn release_year(&self) -> Option<i32> {
        self.display_date().and_then(parse_year)
    }

    /// Rating with one decimal, e.g. `"7.3"`.
    pub fn display_rating(&self) -> Option<String> {
        self.vote_average.map(|v| format!("{:.1}", v))
    }

    /// Render key. Items may repeat across pages, so the position is part of it.
    pub fn display_key(&self, position: usize) -> String {
        format!("{}-{}", self.id, position)
    }

    /// Banner artwork: backdrop first, poster otherwise.
    pub fn banner_path(&self) -> Option<&str> {
        non_empty(&self.backdrop_path).or_else(|| non_empty(&self.poster_path))
    }
}

/// One page of a list endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListPage {
    pub results: Vec<ResultItem>,
    /// Declared page count; 0 when the upstream did not say.
    pub total_pages: u32,
}

impl ListPage {
    /// Parse `{ results, total_pages }`, defaulting whatever is absent.
    pub fn from_json(body: &Value) -> Self {
        let results = body
            .get("results")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .cloned()
                    .filter_map(ResultItem::from_json)
                    .collect()
            })
            .unwrap_or_default();

        let total_pages = body
            .get("total_pages")
            .and_then(Value::as_u64)
            .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
            .unwrap_or(0);

        Self {
            results,
            total_pages,
        }
    }
}

/// Optional field that tolerates a value of the wrong type by treating it
/// as absent.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

pub(crate) fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

pub(crate) fn parse_year(date: &str) -> Option<i32> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.year())
        .ok()
        .or_else(|| date.split('-').next().and_then(|y| y.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_media_type_parse() {
        assert_eq!("movie".parse::<MediaType>().unwrap(), MediaType::Movie);
        assert_eq!("tv".parse::<MediaType>().unwrap(), MediaType::Tv);
        assert!(matches!(
            "person".parse::<MediaType>(),
            Err(RouteError::NotFound(_))
        ));
    }

    #[test]
    fn test_list_page_parses_results_and_total() {
        let body = json!({
            "page": 1,
            "results": [
                {"id": 1, "title": "Alien", "vote_average": 8.1},
                {"id": 2, "name": "Dark", "first_air_date": "2017-12-01"}
            ],
            "total_pages": 5
        });

        let page = ListPage::from_json(&body);
        assert_eq!(page.total_pages, 5);
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].display_label(), "Alien");
        assert_eq!(page.results[1].display_label(), "Dark");
        assert_eq!(page.results[1].release_year(), Some(2017));
    }

    #[test]
    fn test_list_page_defaults_missing_fields() {
        let page = ListPage::from_json(&json!({}));
        assert!(page.results.is_empty());
        assert_eq!(page.total_pages, 0);

        let page = ListPage::from_json(&json!({"results": null, "total_pages": "many"}));
        assert!(page.results.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn test_list_page_drops_items_without_id() {
        let body = json!({
            "results": [
                {"id": 7},
                {"title": "No id"},
                {"id": "8"},
                {"id": -3},
                {"id": 9, "custom": {"nested": true}}
            ]
        });

        let page = ListPage::from_json(&body);
        let ids: Vec<u64> = page.results.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![7, 9]);
        assert_eq!(page.results[1].extra["custom"]["nested"], json!(true));
    }

    #[test]
    fn test_list_page_keeps_items_with_mistyped_fields() {
        let body = json!({
            "results": [
                {"id": 1, "vote_average": "N/A"},
                {"id": 2, "title": 42, "name": "Fallback"},
                {"id": 3, "release_date": 2020, "first_air_date": "2021-05-01"}
            ]
        });

        let page = ListPage::from_json(&body);
        let ids: Vec<u64> = page.results.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(page.results[0].vote_average, None);
        assert_eq!(page.results[1].display_label(), "Fallback");
        assert_eq!(page.results[2].release_year(), Some(2021));
    }

    #[test]
    fn test_list_page_keeps_repeated_items() {
        let body = json!({"results": [{"id": 4}, {"id": 4}]});
        let page = ListPage::from_json(&body);
        assert_eq!(page.results.len(), 2);
        assert_ne!(page.results[0].display_key(0), page.results[1].display_key(1));
    }

    #[test]
    fn test_display_helpers() {
        let mut item = ResultItem::with_id(12);
        assert_eq!(item.display_label(), "Untitled");
        assert!(item.display_rating().is_none());
        assert!(item.banner_path().is_none());

        item.title = Some(String::new());
        item.name = Some("Severance".to_string());
        item.vote_average = Some(8.36);
        item.poster_path = Some("/p.jpg".to_string());
        assert_eq!(item.display_label(), "Severance");
        assert_eq!(item.display_rating().as_deref(), Some("8.4"));
        assert_eq!(item.banner_path(), Some("/p.jpg"));

        item.backdrop_path = Some("/b.jpg".to_string());
        assert_eq!(item.banner_path(), Some("/b.jpg"));
    }
}
