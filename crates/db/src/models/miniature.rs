//! Miniature model entity and DTOs.
//!
//! Individual painted models (`models` table). A model can sit in any
//! number of boxes through the `model_boxes` join table; its image feeds a
//! box's carousel when the box opts in.

use brushlog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `models` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Miniature {
    pub id: DbId,
    pub name: String,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new model.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMiniature {
    pub name: String,
    pub image_url: Option<String>,
}
