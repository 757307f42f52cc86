//! Owner image models and DTOs.
//!
//! One shape covers both `battle_images` and `box_images`; the owner
//! foreign-key column is selected as `owner_id` so the same row struct
//! maps either table.

use brushlog_core::images::ImageCandidate;
use brushlog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from `battle_images` or `box_images`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OwnerImage {
    pub id: DbId,
    pub owner_id: DbId,
    pub image_url: String,
    pub display_order: i32,
    pub is_primary: bool,
    pub created_by: DbId,
    pub created_at: Timestamp,
}

impl From<OwnerImage> for ImageCandidate {
    fn from(image: OwnerImage) -> Self {
        Self {
            id: image.id,
            image_url: image.image_url,
            display_order: image.display_order,
            is_primary: image.is_primary,
        }
    }
}

/// DTO for adding an image to an owner.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOwnerImage {
    pub image_url: String,
    /// Defaults to `false`.
    pub is_primary: Option<bool>,
    /// Defaults to one past the owner's current maximum, or 0.
    pub display_order: Option<i32>,
}

/// DTO for patching an owner image. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOwnerImage {
    pub image_url: Option<String>,
    pub display_order: Option<i32>,
    pub is_primary: Option<bool>,
}

/// Request body for an explicit reorder.
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderOwnerImages {
    /// Image ids in their new display order.
    pub image_ids: Vec<DbId>,
}
