//! Game entity model and DTOs.
//!
//! Games are the parent fallback for battle and box imagery.

use brushlog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `games` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Game {
    pub id: DbId,
    pub name: String,
    pub image: Option<String>,
    pub icon: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new game.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGame {
    pub name: String,
    pub image: Option<String>,
    pub icon: Option<String>,
}
