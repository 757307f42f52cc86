//! Resolved display view for one owner.

use axum::extract::{Path, State};
use axum::{Extension, Json};
use brushlog_core::image_resolution::{resolve, ImageTier, ResolvedImages};
use brushlog_core::images::{ImageOwnerKind, OwnerRef};
use brushlog_core::types::DbId;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::{self, DataResponse};
use crate::state::AppState;

/// What a card renders before any client-side rotation.
#[derive(Debug, Serialize)]
pub struct DisplayView {
    pub image_src: String,
    pub is_carousel: bool,
    pub all_images: Vec<String>,
    pub total_images: usize,
    /// Set when the image comes from the parent game rather than the owner.
    pub is_game_fallback: bool,
    pub tier: ImageTier,
}

impl From<ResolvedImages> for DisplayView {
    fn from(resolved: ResolvedImages) -> Self {
        Self {
            image_src: resolved.primary_src().to_string(),
            is_carousel: resolved.is_carousel(),
            total_images: resolved.images.len(),
            is_game_fallback: resolved.is_game_fallback(),
            tier: resolved.tier,
            all_images: resolved.images,
        }
    }
}

/// GET /api/v1/{battles|boxes}/{owner_id}/display
///
/// 404 for an unknown owner. A failed lookup is logged and served as the
/// placeholder.
pub async fn get_display(
    Extension(kind): Extension<ImageOwnerKind>,
    State(state): State<AppState>,
    Path(owner_id): Path<DbId>,
) -> AppResult<Json<DataResponse<DisplayView>>> {
    let owner = OwnerRef { kind, id: owner_id };
    let resolved = match state.image_source.fetch_owner_with_images(owner).await {
        Ok(Some(data)) => resolve(&data),
        Ok(None) => return Err(AppError::not_found(kind.owner_entity(), owner_id)),
        Err(e) => {
            tracing::warn!(
                owner_kind = %kind,
                owner_id,
                error = %e,
                "Display lookup failed, serving placeholder"
            );
            ResolvedImages::placeholder()
        }
    };

    Ok(response::data(DisplayView::from(resolved)))
}

#[cfg(test)]
mod tests {
    use brushlog_core::image_resolution::PLACEHOLDER_IMAGE;

    use super::*;

    #[test]
    fn placeholder_view_is_static() {
        let view = DisplayView::from(ResolvedImages::placeholder());
        assert_eq!(view.image_src, PLACEHOLDER_IMAGE);
        assert!(!view.is_carousel);
        assert_eq!(view.total_images, 1);
        assert!(!view.is_game_fallback);
        assert_eq!(view.tier, ImageTier::Placeholder);
    }

    #[test]
    fn game_tier_view_is_flagged_as_fallback() {
        let view = DisplayView::from(ResolvedImages {
            images: vec!["https://cdn.example/game.png".into()],
            tier: ImageTier::GameIcon,
        });
        assert!(view.is_game_fallback);
        assert_eq!(view.all_images, vec!["https://cdn.example/game.png".to_string()]);
    }
}
