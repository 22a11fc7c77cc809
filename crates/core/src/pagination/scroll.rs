/// Distance from the document bottom, in layout units, that counts as
/// "near the bottom".
pub const NEAR_BOTTOM_THRESHOLD: f64 = 500.0;

/// Viewport geometry reported by the hosting view on scroll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub viewport_height: f64,
    pub scroll_y: f64,
    pub document_height: f64,
}

impl ScrollMetrics {
    /// Viewport bottom edge within [`NEAR_BOTTOM_THRESHOLD`] of the document end.
    pub fn is_near_bottom(&self) -> bool {
        self.viewport_height + self.scroll_y >= self.document_height - NEAR_BOTTOM_THRESHOLD
    }
}
