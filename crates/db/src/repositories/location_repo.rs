//! Repository for the `locations` table.

use sqlx::PgPool;

use crate::models::location::{CreateLocation, Location};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, address, is_active, created_at, updated_at";

/// Provides read and create operations for venue locations.
pub struct LocationRepo;

impl LocationRepo {
    /// Insert a new location, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateLocation) -> Result<Location, sqlx::Error> {
        let query = format!(
            "INSERT INTO locations (name, address) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(&input.name)
            .bind(&input.address)
            .fetch_one(pool)
            .await
    }

    /// List active locations ordered by name.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Location>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM locations WHERE is_active = true ORDER BY name");
        sqlx::query_as::<_, Location>(&query).fetch_all(pool).await
    }
}
