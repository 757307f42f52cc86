//! Box-level display preferences.

use axum::extract::{Path, State};
use axum::Json;
use brushlog_core::images::{ImageOwnerKind, OwnerRef};
use brushlog_core::types::DbId;
use brushlog_db::models::collection::{Collection, SetShowCarousel};
use brushlog_db::repositories::CollectionRepo;
use brushlog_events::{ImageEvent, ImageEventKind};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// PUT /api/v1/boxes/{owner_id}/carousel
///
/// Toggles whether the box's display also rotates through its models.
pub async fn set_carousel(
    State(state): State<AppState>,
    Path(box_id): Path<DbId>,
    user: AuthUser,
    Json(input): Json<SetShowCarousel>,
) -> AppResult<Json<Collection>> {
    let collection = CollectionRepo::set_show_carousel(&state.pool, box_id, input.show_carousel)
        .await?
        .ok_or(AppError::not_found(ImageOwnerKind::Box.owner_entity(), box_id))?;

    tracing::info!(
        box_id,
        show_carousel = collection.show_carousel,
        "Box carousel preference changed"
    );
    state.event_bus.publish(ImageEvent::new(
        ImageEventKind::CarouselToggled,
        OwnerRef::boxed(box_id),
        user.user_id,
    ));

    Ok(Json(collection))
}
