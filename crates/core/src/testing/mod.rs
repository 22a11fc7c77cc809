//! Testing utilities and mock implementations.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use reelscout_core::testing::{fixtures, MockCatalogSource};
//! use reelscout_core::ListController;
//!
//! let source = Arc::new(MockCatalogSource::new());
//! source.set_page("discover/movie", 1, fixtures::list_page(&[1, 2], 5)).await;
//!
//! let controller = ListController::new(source.clone());
//! ```

mod mock_catalog_source;

pub use mock_catalog_source::{MockCatalogSource, RecordedRequest};

/// Test fixtures and helper functions.
pub mod fixtures {
    use serde_json::{json, Value};

    /// A list response with bare items for `ids`.
    pub fn list_page(ids: &[u64], total_pages: u32) -> Value {
        let results: Vec<Value> = ids.iter().map(|id| json!({ "id": id })).collect();
        json!({ "page": 1, "results": results, "total_pages": total_pages })
    }

    /// A list response with titled items.
    pub fn titled_page(items: &[(u64, &str)], total_pages: u32) -> Value {
        let results: Vec<Value> = items
            .iter()
            .map(|(id, title)| {
                json!({
                    "id": id,
                    "title": title,
                    "poster_path": format!("/poster-{}.jpg", id),
                    "backdrop_path": format!("/backdrop-{}.jpg", id),
                    "vote_average": 7.5
                })
            })
            .collect();
        json!({ "results": results, "total_pages": total_pages })
    }

    /// A `/configuration` response.
    pub fn configuration(secure_base_url: &str) -> Value {
        json!({
            "images": {
                "base_url": secure_base_url.replacen("https://", "http://", 1),
                "secure_base_url": secure_base_url,
                "poster_sizes": ["w92", "w185", "w500", "original"]
            }
        })
    }

    /// A movie detail record with credits and videos appended.
    pub fn movie_details(id: u64, title: &str) -> Value {
        json!({
            "id": id,
            "title": title,
            "overview": format!("{} overview", title),
            "release_date": "1999-03-30",
            "runtime": 136,
            "vote_average": 8.2,
            "genres": [{"id": 28, "name": "Action"}],
            "credits": {"cast": [{"id": 1, "name": "Lead Actor", "character": "Hero"}]},
            "videos": {"results": [{"key": "abc123", "site": "YouTube", "type": "Trailer"}]}
        })
    }
}
