//! Repository for the `battles` table.

use brushlog_core::types::DbId;
use sqlx::PgPool;

use crate::models::battle::{Battle, BattleDisplayRow, CreateBattle};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, game_id, box_id, image_url, created_by, created_at, updated_at";

/// Provides CRUD and display lookups for battles.
pub struct BattleRepo;

impl BattleRepo {
    /// Insert a new battle, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateBattle) -> Result<Battle, sqlx::Error> {
        let query = format!(
            "INSERT INTO battles (title, game_id, box_id, image_url, created_by) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Battle>(&query)
            .bind(&input.title)
            .bind(input.game_id)
            .bind(input.box_id)
            .bind(&input.image_url)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a battle by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Battle>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM battles WHERE id = $1");
        sqlx::query_as::<_, Battle>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The battle row joined with its game's image and icon.
    ///
    /// Uses the battle's own game when set, otherwise the game of the box
    /// it was played with.
    pub async fn find_display_row(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<BattleDisplayRow>, sqlx::Error> {
        sqlx::query_as::<_, BattleDisplayRow>(
            "SELECT bt.id, bt.image_url, \
                    g.image AS game_image, g.icon AS game_icon \
             FROM battles bt \
             LEFT JOIN boxes bx ON bx.id = bt.box_id \
             LEFT JOIN games g ON g.id = COALESCE(bt.game_id, bx.game_id) \
             WHERE bt.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
