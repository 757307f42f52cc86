use std::time::Duration;

use brushlog_core::carousel::DEFAULT_ROTATION_INTERVAL;

/// Default distance (in pixels) outside the viewport at which a card
/// counts as visible.
pub const DEFAULT_VISIBILITY_MARGIN_PX: f64 = 200.0;

/// Tunables shared by every slot of a [`Gallery`](crate::Gallery).
#[derive(Debug, Clone, Copy)]
pub struct GalleryConfig {
    /// Time between carousel advances.
    pub rotation_interval: Duration,
    /// Proximity margin added around the viewport for lazy fetching.
    pub visibility_margin_px: f64,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            rotation_interval: DEFAULT_ROTATION_INTERVAL,
            visibility_margin_px: DEFAULT_VISIBILITY_MARGIN_PX,
        }
    }
}
