//! Catalog view-models: list items, pages, detail records and image URLs.
//!
//! Every type here is transient. Records are parsed from whatever JSON the
//! upstream returns and callers default any field that is missing.

mod details;
mod images;
mod types;

pub use details::{CastMember, Genre, MediaDetails, Video, CAST_LIMIT};
pub use images::{ImageBase, ImageConfig, ImageKind, BACKDROP_SIZE, ORIGINAL_SIZE, POSTER_SIZE, PROFILE_SIZE};
pub use types::*;
