//! Repository for the `battle_images` and `box_images` tables.
//!
//! Both tables share one shape and differ only in the owner column, so every
//! method takes the [`ImageOwnerKind`] and builds its SQL from the kind's
//! static table/column names.

use brushlog_core::images::ImageOwnerKind;
use brushlog_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::owner_image::{CreateOwnerImage, OwnerImage, UpdateOwnerImage};

/// Column list for `kind`, with the owner column aliased to `owner_id`.
fn columns(kind: ImageOwnerKind) -> String {
    format!(
        "id, {} AS owner_id, image_url, display_order, is_primary, created_by, created_at",
        kind.owner_column()
    )
}

/// Provides CRUD, primary-flag and ordering operations for owner images.
pub struct OwnerImageRepo;

impl OwnerImageRepo {
    /// Whether the owner row itself exists.
    pub async fn owner_exists(
        pool: &PgPool,
        kind: ImageOwnerKind,
        owner_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE id = $1)",
            kind.owner_table()
        );
        sqlx::query_scalar::<_, bool>(&query)
            .bind(owner_id)
            .fetch_one(pool)
            .await
    }

    /// List an owner's images ordered by `display_order`, then id.
    pub async fn list_by_owner(
        pool: &PgPool,
        kind: ImageOwnerKind,
        owner_id: DbId,
    ) -> Result<Vec<OwnerImage>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM {} WHERE {} = $1 ORDER BY display_order, id",
            columns(kind),
            kind.image_table(),
            kind.owner_column()
        );
        sqlx::query_as::<_, OwnerImage>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Find one image, scoped to its owner.
    pub async fn find_by_id(
        pool: &PgPool,
        kind: ImageOwnerKind,
        owner_id: DbId,
        id: DbId,
    ) -> Result<Option<OwnerImage>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM {} WHERE id = $1 AND {} = $2",
            columns(kind),
            kind.image_table(),
            kind.owner_column()
        );
        sqlx::query_as::<_, OwnerImage>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new image, returning the created row.
    ///
    /// If `display_order` is `None` the image is appended after the owner's
    /// current maximum (or gets 0 for the first image). If `is_primary` is
    /// true, the owner's existing primary is cleared in the same transaction;
    /// a missing owner is then `RowNotFound`.
    pub async fn create(
        pool: &PgPool,
        kind: ImageOwnerKind,
        owner_id: DbId,
        created_by: DbId,
        input: &CreateOwnerImage,
    ) -> Result<OwnerImage, sqlx::Error> {
        let is_primary = input.is_primary.unwrap_or(false);
        let mut tx = pool.begin().await?;

        if is_primary {
            if !lock_owner(&mut tx, kind, owner_id).await? {
                return Err(sqlx::Error::RowNotFound);
            }
            clear_primary(&mut tx, kind, owner_id, None).await?;
        }

        let table = kind.image_table();
        let owner = kind.owner_column();
        let query = format!(
            "INSERT INTO {table} ({owner}, image_url, display_order, is_primary, created_by) \
             VALUES ($1, $2, \
                     COALESCE($3, (SELECT COALESCE(MAX(display_order) + 1, 0) \
                                   FROM {table} WHERE {owner} = $1)), \
                     $4, $5) \
             RETURNING {}",
            columns(kind)
        );
        let image = sqlx::query_as::<_, OwnerImage>(&query)
            .bind(owner_id)
            .bind(&input.image_url)
            .bind(input.display_order)
            .bind(is_primary)
            .bind(created_by)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(image)
    }

    /// Patch an image. Only non-`None` fields in `input` are applied.
    ///
    /// Setting `is_primary = true` clears the owner's other primary in the
    /// same transaction. Returns `None` if the image does not belong to the
    /// owner, in which case nothing is changed.
    pub async fn update(
        pool: &PgPool,
        kind: ImageOwnerKind,
        owner_id: DbId,
        id: DbId,
        input: &UpdateOwnerImage,
    ) -> Result<Option<OwnerImage>, sqlx::Error> {
        let makes_primary = input.is_primary == Some(true);
        let mut tx = pool.begin().await?;

        if makes_primary && !lock_owner(&mut tx, kind, owner_id).await? {
            return Ok(None);
        }
        if !lock_image(&mut tx, kind, owner_id, id).await? {
            return Ok(None);
        }
        if makes_primary {
            clear_primary(&mut tx, kind, owner_id, Some(id)).await?;
        }

        let query = format!(
            "UPDATE {} SET \
                image_url = COALESCE($3, image_url), \
                display_order = COALESCE($4, display_order), \
                is_primary = COALESCE($5, is_primary) \
             WHERE id = $1 AND {} = $2 \
             RETURNING {}",
            kind.image_table(),
            kind.owner_column(),
            columns(kind)
        );
        let image = sqlx::query_as::<_, OwnerImage>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(&input.image_url)
            .bind(input.display_order)
            .bind(input.is_primary)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(image)
    }

    /// Make `id` the owner's only primary image.
    ///
    /// Clears any other primary and sets this one in a single transaction.
    /// Returns `None` if the image does not belong to the owner.
    pub async fn set_primary(
        pool: &PgPool,
        kind: ImageOwnerKind,
        owner_id: DbId,
        id: DbId,
    ) -> Result<Option<OwnerImage>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if !lock_owner(&mut tx, kind, owner_id).await? {
            return Ok(None);
        }
        if !lock_image(&mut tx, kind, owner_id, id).await? {
            return Ok(None);
        }
        clear_primary(&mut tx, kind, owner_id, Some(id)).await?;

        let query = format!(
            "UPDATE {} SET is_primary = true WHERE id = $1 AND {} = $2 RETURNING {}",
            kind.image_table(),
            kind.owner_column(),
            columns(kind)
        );
        let image = sqlx::query_as::<_, OwnerImage>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(image)
    }

    /// Assign `display_order = index` for each id, in one transaction.
    ///
    /// Every update is also filtered by `owner_id`, so ids belonging to a
    /// different owner match nothing. Returns the number of rows updated.
    pub async fn reorder(
        pool: &PgPool,
        kind: ImageOwnerKind,
        owner_id: DbId,
        image_ids: &[DbId],
    ) -> Result<u64, sqlx::Error> {
        let query = format!(
            "UPDATE {} SET display_order = $1 WHERE id = $2 AND {} = $3",
            kind.image_table(),
            kind.owner_column()
        );

        let mut tx = pool.begin().await?;
        let mut updated = 0;
        for (index, id) in (0_i32..).zip(image_ids) {
            let result = sqlx::query(&query)
                .bind(index)
                .bind(id)
                .bind(owner_id)
                .execute(&mut *tx)
                .await?;
            updated += result.rows_affected();
        }
        tx.commit().await?;

        Ok(updated)
    }

    /// The flagged primary image, else the lowest `display_order`.
    ///
    /// Returns `None` only when the owner has no images.
    pub async fn find_primary(
        pool: &PgPool,
        kind: ImageOwnerKind,
        owner_id: DbId,
    ) -> Result<Option<OwnerImage>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM {} WHERE {} = $1 \
             ORDER BY is_primary DESC, display_order, id \
             LIMIT 1",
            columns(kind),
            kind.image_table(),
            kind.owner_column()
        );
        sqlx::query_as::<_, OwnerImage>(&query)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete one image, scoped to its owner. Returns `true` if a row was removed.
    pub async fn delete(
        pool: &PgPool,
        kind: ImageOwnerKind,
        owner_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "DELETE FROM {} WHERE id = $1 AND {} = $2",
            kind.image_table(),
            kind.owner_column()
        );
        let result = sqlx::query(&query)
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Lock the owner row for the rest of the transaction. Returns `false` if
/// the owner does not exist.
///
/// Every primary change takes this lock first, so concurrent changes on one
/// owner run one after the other and the later one clears the earlier flag.
/// `NO KEY UPDATE` leaves plain image inserts (which take `KEY SHARE` on the
/// owner through the foreign key) unblocked.
async fn lock_owner(
    conn: &mut PgConnection,
    kind: ImageOwnerKind,
    owner_id: DbId,
) -> Result<bool, sqlx::Error> {
    let query = format!(
        "SELECT id FROM {} WHERE id = $1 FOR NO KEY UPDATE",
        kind.owner_table()
    );
    let row = sqlx::query_scalar::<_, DbId>(&query)
        .bind(owner_id)
        .fetch_optional(conn)
        .await?;
    Ok(row.is_some())
}

/// Row-lock an image inside a transaction. Returns `false` if it does not
/// belong to the owner.
async fn lock_image(
    conn: &mut PgConnection,
    kind: ImageOwnerKind,
    owner_id: DbId,
    id: DbId,
) -> Result<bool, sqlx::Error> {
    let query = format!(
        "SELECT id FROM {} WHERE id = $1 AND {} = $2 FOR UPDATE",
        kind.image_table(),
        kind.owner_column()
    );
    let row = sqlx::query_scalar::<_, DbId>(&query)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(conn)
        .await?;
    Ok(row.is_some())
}

/// Clear the owner's primary flag, optionally sparing one image.
async fn clear_primary(
    conn: &mut PgConnection,
    kind: ImageOwnerKind,
    owner_id: DbId,
    except: Option<DbId>,
) -> Result<(), sqlx::Error> {
    let query = format!(
        "UPDATE {} SET is_primary = false \
         WHERE {} = $1 AND is_primary = true AND ($2::BIGINT IS NULL OR id <> $2)",
        kind.image_table(),
        kind.owner_column()
    );
    sqlx::query(&query)
        .bind(owner_id)
        .bind(except)
        .execute(conn)
        .await?;
    Ok(())
}
