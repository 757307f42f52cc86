//! Brushlog persistence layer.
//!
//! PostgreSQL access via `sqlx`: entity models and DTOs, zero-sized
//! repositories, and the database-backed [`PgImageOwnerSource`].

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;
pub mod source;

pub use source::PgImageOwnerSource;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
