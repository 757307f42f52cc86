//! Collection ("box") entity model and DTOs.

use brushlog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `boxes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Collection {
    pub id: DbId,
    pub name: String,
    pub game_id: Option<DbId>,
    /// Legacy single-image column, predating `box_images`.
    pub image_url: Option<String>,
    /// When set, the display carousel also rotates through the box's models.
    pub show_carousel: bool,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new box.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCollection {
    pub name: String,
    pub game_id: Option<DbId>,
    pub image_url: Option<String>,
    pub show_carousel: Option<bool>,
    pub created_by: Option<DbId>,
}

/// Request body for toggling the carousel preference.
#[derive(Debug, Clone, Deserialize)]
pub struct SetShowCarousel {
    pub show_carousel: bool,
}

/// Owner row joined with its game's fallback imagery.
#[derive(Debug, Clone, FromRow)]
pub struct CollectionDisplayRow {
    pub id: DbId,
    pub image_url: Option<String>,
    pub show_carousel: bool,
    pub game_image: Option<String>,
    pub game_icon: Option<String>,
}
