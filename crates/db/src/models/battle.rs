//! Battle entity model and DTOs.

use brushlog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `battles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Battle {
    pub id: DbId,
    pub title: String,
    pub game_id: Option<DbId>,
    pub box_id: Option<DbId>,
    /// Legacy single-image column, predating `battle_images`.
    pub image_url: Option<String>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new battle.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBattle {
    pub title: String,
    pub game_id: Option<DbId>,
    pub box_id: Option<DbId>,
    pub image_url: Option<String>,
    pub created_by: Option<DbId>,
}

/// Owner row joined with the fallback imagery of its game.
///
/// The game is the battle's own `game_id` when set, otherwise the game of
/// the box the battle was played with.
#[derive(Debug, Clone, FromRow)]
pub struct BattleDisplayRow {
    pub id: DbId,
    pub image_url: Option<String>,
    pub game_image: Option<String>,
    pub game_icon: Option<String>,
}
