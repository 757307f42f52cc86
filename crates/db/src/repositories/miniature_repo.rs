//! Repository for the `models` and `model_boxes` tables.

use brushlog_core::types::DbId;
use sqlx::PgPool;

use crate::models::miniature::{CreateMiniature, Miniature};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, image_url, created_at, updated_at";

/// Provides create and box-membership operations for models.
pub struct MiniatureRepo;

impl MiniatureRepo {
    /// Insert a new model, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateMiniature) -> Result<Miniature, sqlx::Error> {
        let query =
            format!("INSERT INTO models (name, image_url) VALUES ($1, $2) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Miniature>(&query)
            .bind(&input.name)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    /// Put a model into a box. Attaching twice is a no-op.
    pub async fn attach_to_box(
        pool: &PgPool,
        model_id: DbId,
        box_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO model_boxes (model_id, box_id) VALUES ($1, $2) \
             ON CONFLICT (model_id, box_id) DO NOTHING",
        )
        .bind(model_id)
        .bind(box_id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
