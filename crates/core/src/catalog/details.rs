//! Detail record for a single movie or show.

use serde::{Deserialize, Serialize};

use super::types::{lenient, non_empty, parse_year};

/// Number of cast members shown on a detail page.
pub const CAST_LIMIT: usize = 15;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Genre {
    #[serde(default)]
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CastMember {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast_id: Option<u64>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Video {
    pub key: String,
    #[serde(default)]
    pub site: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
struct Credits {
    #[serde(default)]
    cast: Vec<CastMember>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
struct Videos {
    #[serde(default)]
    results: Vec<Video>,
}

/// A movie or show fetched with `append_to_response=credits,videos`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaDetails {
    pub id: u64,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub backdrop_path: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// Movie runtime in minutes.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub runtime: Option<u32>,
    /// Per-episode runtimes in minutes (shows).
    #[serde(default)]
    pub episode_run_time: Vec<u32>,
    #[serde(default)]
    credits: Credits,
    #[serde(default)]
    videos: Videos,
}

impl MediaDetails {
    pub fn display_label(&self) -> &str {
        non_empty(&self.title)
            .or_else(|| non_empty(&self.name))
            .unwrap_or("Untitled")
    }

    pub fn overview_or_default(&self) -> &str {
        non_empty(&self.overview).unwrap_or("No overview available.")
    }

    pub fn release_year(&self) -> Option<i32> {
        non_empty(&self.release_date)
            .or_else(|| non_empty(&self.first_air_date))
            .and_then(parse_year)
    }

    pub fn display_rating(&self) -> Option<String> {
        self.vote_average
            .filter(|v| *v > 0.0)
            .map(|v| format!("{:.1}", v))
    }

    /// `"2h 16m"` for movies, `"45m per episode"` for shows.
    pub fn display_runtime(&self) -> Option<String> {
        match self.runtime.filter(|m| *m > 0) {
            Some(minutes) => Some(format!("{}h {}m", minutes / 60, minutes % 60)),
            None => self
                .episode_run_time
                .first()
                .map(|m| format!("{}m per episode", m)),
        }
    }

    /// Leading cast members, capped at [`CAST_LIMIT`].
    pub fn top_cast(&self) -> &[CastMember] {
        let cast = &self.credits.cast;
        &cast[..cast.len().min(CAST_LIMIT)]
    }

    pub fn videos(&self) -> &[Video] {
        &self.videos.results
    }

    /// First YouTube trailer, else the first YouTube video of any type.
    pub fn trailer(&self) -> Option<&Video> {
        let videos = &self.videos.results;
        videos
            .iter()
            .find(|v| v.kind == "Trailer" && v.site == "YouTube")
            .or_else(|| videos.iter().find(|v| v.site == "YouTube"))
    }
}
