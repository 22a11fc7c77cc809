//! Image URL construction with placeholder fallback.

use serde_json::Value;

/// Size segment used for backdrops.
pub const BACKDROP_SIZE: &str = "original";
/// Size segment used for full-resolution artwork.
pub const ORIGINAL_SIZE: &str = "original";
/// Size segment used for posters.
pub const POSTER_SIZE: &str = "w500";
/// Size segment used for cast portraits.
pub const PROFILE_SIZE: &str = "w185";

/// What an image is for; decides which placeholder stands in for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Poster,
    Backdrop,
    Profile,
}

impl ImageKind {
    pub fn placeholder(&self) -> &'static str {
        match self {
            ImageKind::Poster => "/moviePlaceHolder.png",
            ImageKind::Backdrop => "/images/backdrop-placeholder.png",
            ImageKind::Profile => "/user.png",
        }
    }
}

/// The `images` section of the upstream `/configuration` response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageConfig {
    pub secure_base_url: String,
}

impl ImageConfig {
    /// Extract `images.secure_base_url`; `None` when absent or blank.
    pub fn from_json(body: &Value) -> Option<Self> {
        body.get("images")
            .and_then(|images| images.get("secure_base_url"))
            .and_then(Value::as_str)
            .filter(|url| !url.trim().is_empty())
            .map(|url| Self {
                secure_base_url: url.to_string(),
            })
    }
}

/// Read-only image base shared by everything that renders artwork.
///
/// An absent base is a valid state: every lookup then resolves to a
/// placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageBase {
    base_url: Option<String>,
}

impl ImageBase {
    pub fn new(config: Option<ImageConfig>) -> Self {
        Self {
            base_url: config.map(|c| c.secure_base_url),
        }
    }

    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn is_available(&self) -> bool {
        self.base_url.is_some()
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// `{base}{size}{path}`, or `None` if either the base or the path is missing.
    pub fn url(&self, path: Option<&str>, size: &str) -> Option<String> {
        let base = self.base_url.as_deref()?;
        let path = path.filter(|p| !p.trim().is_empty())?;
        Some(format!("{}{}{}", base, size, path))
    }

    pub fn url_or_placeholder(&self, path: Option<&str>, size: &str, kind: ImageKind) -> String {
        self.url(path, size)
            .unwrap_or_else(|| kind.placeholder().to_string())
    }
}
