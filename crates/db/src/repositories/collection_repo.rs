//! Repository for the `boxes` table.

use brushlog_core::types::DbId;
use sqlx::PgPool;

use crate::models::collection::{Collection, CollectionDisplayRow, CreateCollection};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, game_id, image_url, show_carousel, created_by, created_at, updated_at";

/// Provides CRUD and display lookups for boxes.
pub struct CollectionRepo;

impl CollectionRepo {
    /// Insert a new box, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCollection,
    ) -> Result<Collection, sqlx::Error> {
        let query = format!(
            "INSERT INTO boxes (name, game_id, image_url, show_carousel, created_by) \
             VALUES ($1, $2, $3, COALESCE($4, false), $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Collection>(&query)
            .bind(&input.name)
            .bind(input.game_id)
            .bind(&input.image_url)
            .bind(input.show_carousel)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a box by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Collection>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM boxes WHERE id = $1");
        sqlx::query_as::<_, Collection>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Persist the box's carousel preference.
    ///
    /// Returns `None` if no box with the given `id` exists.
    pub async fn set_show_carousel(
        pool: &PgPool,
        id: DbId,
        show_carousel: bool,
    ) -> Result<Option<Collection>, sqlx::Error> {
        let query = format!(
            "UPDATE boxes SET show_carousel = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Collection>(&query)
            .bind(id)
            .bind(show_carousel)
            .fetch_optional(pool)
            .await
    }

    /// The box row joined with its game's image and icon.
    pub async fn find_display_row(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CollectionDisplayRow>, sqlx::Error> {
        sqlx::query_as::<_, CollectionDisplayRow>(
            "SELECT b.id, b.image_url, b.show_carousel, \
                    g.image AS game_image, g.icon AS game_icon \
             FROM boxes b \
             LEFT JOIN games g ON g.id = b.game_id \
             WHERE b.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Image URLs of the models in a box, oldest membership first.
    ///
    /// Models without an image are skipped; URL validity is left to the
    /// resolver.
    pub async fn list_child_image_urls(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT m.image_url \
             FROM model_boxes mb \
             JOIN models m ON m.id = mb.model_id \
             WHERE mb.box_id = $1 AND m.image_url IS NOT NULL \
             ORDER BY mb.created_at, m.id",
        )
        .bind(id)
        .fetch_all(pool)
        .await
    }
}
