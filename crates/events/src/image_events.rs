//! Image-change events.
//!
//! Every mutation of an owner's images, or of a box's carousel preference,
//! publishes one [`ImageEvent`] naming the owner whose cached display state
//! is now stale.

use std::fmt;

use brushlog_core::images::OwnerRef;
use brushlog_core::types::{DbId, Timestamp};
use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageEventKind {
    #[serde(rename = "image.added")]
    Added,
    #[serde(rename = "image.updated")]
    Updated,
    #[serde(rename = "image.deleted")]
    Deleted,
    #[serde(rename = "image.primary_set")]
    PrimarySet,
    #[serde(rename = "image.reordered")]
    Reordered,
    #[serde(rename = "box.carousel_toggled")]
    CarouselToggled,
}

impl ImageEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "image.added",
            Self::Updated => "image.updated",
            Self::Deleted => "image.deleted",
            Self::PrimarySet => "image.primary_set",
            Self::Reordered => "image.reordered",
            Self::CarouselToggled => "box.carousel_toggled",
        }
    }
}

impl fmt::Display for ImageEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEvent {
    pub kind: ImageEventKind,
    pub owner: OwnerRef,
    /// User whose request caused the change.
    pub actor_user_id: DbId,
    /// The affected image, for single-image changes.
    pub image_id: Option<DbId>,
    pub occurred_at: Timestamp,
}

impl ImageEvent {
    pub fn new(kind: ImageEventKind, owner: OwnerRef, actor_user_id: DbId) -> Self {
        Self {
            kind,
            owner,
            actor_user_id,
            image_id: None,
            occurred_at: Utc::now(),
        }
    }

    pub fn with_image(mut self, image_id: DbId) -> Self {
        self.image_id = Some(image_id);
        self
    }
}
