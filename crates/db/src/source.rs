//! Database-backed [`ImageOwnerSource`].

use async_trait::async_trait;
use brushlog_core::error::CoreError;
use brushlog_core::image_resolution::OwnerDisplayData;
use brushlog_core::images::{ImageCandidate, ImageOwnerKind, OwnerRef};
use brushlog_core::source::ImageOwnerSource;
use brushlog_core::types::DbId;

use crate::repositories::{BattleRepo, CollectionRepo, OwnerImageRepo};
use crate::DbPool;

/// Loads owner display data from PostgreSQL.
///
/// An error reading the owner row is returned to the caller. Errors reading
/// the owner's image list or a box's child images are logged and treated as
/// empty, so the legacy and game tiers can still resolve.
#[derive(Clone)]
pub struct PgImageOwnerSource {
    pool: DbPool,
}

impl PgImageOwnerSource {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn images_or_empty(&self, owner: OwnerRef) -> Vec<ImageCandidate> {
        match OwnerImageRepo::list_by_owner(&self.pool, owner.kind, owner.id).await {
            Ok(rows) => rows.into_iter().map(ImageCandidate::from).collect(),
            Err(e) => {
                tracing::warn!(
                    owner_kind = %owner.kind,
                    owner_id = owner.id,
                    error = %e,
                    "Failed to load owner images, continuing without them"
                );
                Vec::new()
            }
        }
    }

    async fn child_urls_or_empty(&self, box_id: DbId) -> Vec<String> {
        match CollectionRepo::list_child_image_urls(&self.pool, box_id).await {
            Ok(urls) => urls,
            Err(e) => {
                tracing::warn!(
                    owner_id = box_id,
                    error = %e,
                    "Failed to load box model images, continuing without them"
                );
                Vec::new()
            }
        }
    }
}

fn internal(e: sqlx::Error) -> CoreError {
    CoreError::Internal(format!("owner lookup failed: {e}"))
}

#[async_trait]
impl ImageOwnerSource for PgImageOwnerSource {
    async fn fetch_owner_with_images(
        &self,
        owner: OwnerRef,
    ) -> Result<Option<OwnerDisplayData>, CoreError> {
        match owner.kind {
            ImageOwnerKind::Battle => {
                let Some(row) = BattleRepo::find_display_row(&self.pool, owner.id)
                    .await
                    .map_err(internal)?
                else {
                    return Ok(None);
                };
                Ok(Some(OwnerDisplayData {
                    images: self.images_or_empty(owner).await,
                    legacy_image_url: row.image_url,
                    game_image: row.game_image,
                    game_icon: row.game_icon,
                    show_carousel: false,
                    child_image_urls: Vec::new(),
                }))
            }
            ImageOwnerKind::Box => {
                let Some(row) = CollectionRepo::find_display_row(&self.pool, owner.id)
                    .await
                    .map_err(internal)?
                else {
                    return Ok(None);
                };
                let child_image_urls = if row.show_carousel {
                    self.child_urls_or_empty(owner.id).await
                } else {
                    Vec::new()
                };
                Ok(Some(OwnerDisplayData {
                    images: self.images_or_empty(owner).await,
                    legacy_image_url: row.image_url,
                    game_image: row.game_image,
                    game_icon: row.game_icon,
                    show_carousel: row.show_carousel,
                    child_image_urls,
                }))
            }
        }
    }
}
