//! Handlers for owner image sets.
//!
//! Battles and boxes expose the same routes; the owner kind is injected by
//! the router as an [`Extension`]:
//! `/{battles|boxes}/{owner_id}/images[/{id}]`

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use brushlog_core::images::{
    validate_display_order, validate_image_url, validate_reorder_ids, ImageOwnerKind, OwnerRef,
};
use brushlog_core::types::DbId;
use brushlog_db::models::owner_image::{
    CreateOwnerImage, OwnerImage, ReorderOwnerImages, UpdateOwnerImage,
};
use brushlog_db::repositories::OwnerImageRepo;
use brushlog_events::{ImageEvent, ImageEventKind};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Fail with 404 unless the owner row exists.
pub(crate) async fn ensure_owner(
    state: &AppState,
    kind: ImageOwnerKind,
    owner_id: DbId,
) -> AppResult<()> {
    if OwnerImageRepo::owner_exists(&state.pool, kind, owner_id).await? {
        Ok(())
    } else {
        Err(AppError::not_found(kind.owner_entity(), owner_id))
    }
}

fn event(
    kind: ImageEventKind,
    owner_kind: ImageOwnerKind,
    owner_id: DbId,
    user: &AuthUser,
) -> ImageEvent {
    let owner = OwnerRef {
        kind: owner_kind,
        id: owner_id,
    };
    ImageEvent::new(kind, owner, user.user_id)
}

/// GET /api/v1/{battles|boxes}/{owner_id}/images
///
/// Ordered by ascending `display_order`. An owner with no images yields `[]`.
pub async fn list(
    Extension(kind): Extension<ImageOwnerKind>,
    State(state): State<AppState>,
    Path(owner_id): Path<DbId>,
) -> AppResult<Json<Vec<OwnerImage>>> {
    ensure_owner(&state, kind, owner_id).await?;
    let images = OwnerImageRepo::list_by_owner(&state.pool, kind, owner_id).await?;
    Ok(Json(images))
}

/// POST /api/v1/{battles|boxes}/{owner_id}/images
pub async fn create(
    Extension(kind): Extension<ImageOwnerKind>,
    State(state): State<AppState>,
    Path(owner_id): Path<DbId>,
    user: AuthUser,
    Json(input): Json<CreateOwnerImage>,
) -> AppResult<(StatusCode, Json<OwnerImage>)> {
    validate_image_url(&input.image_url)?;
    if let Some(order) = input.display_order {
        validate_display_order(order)?;
    }
    ensure_owner(&state, kind, owner_id).await?;

    let image = OwnerImageRepo::create(&state.pool, kind, owner_id, user.user_id, &input).await?;
    tracing::info!(
        owner_kind = %kind,
        owner_id,
        image_id = image.id,
        user_id = user.user_id,
        "Image added"
    );
    state
        .event_bus
        .publish(event(ImageEventKind::Added, kind, owner_id, &user).with_image(image.id));

    Ok((StatusCode::CREATED, Json(image)))
}

/// GET /api/v1/{battles|boxes}/{owner_id}/images/primary
///
/// The flagged primary, else the lowest `display_order`. 404 only when the
/// owner has no images; the id in that error is the owner's.
pub async fn get_primary(
    Extension(kind): Extension<ImageOwnerKind>,
    State(state): State<AppState>,
    Path(owner_id): Path<DbId>,
) -> AppResult<Json<OwnerImage>> {
    ensure_owner(&state, kind, owner_id).await?;
    let image = OwnerImageRepo::find_primary(&state.pool, kind, owner_id)
        .await?
        .ok_or(AppError::not_found(kind.image_entity(), owner_id))?;
    Ok(Json(image))
}

/// PUT /api/v1/{battles|boxes}/{owner_id}/images/{id}
pub async fn update(
    Extension(kind): Extension<ImageOwnerKind>,
    State(state): State<AppState>,
    Path((owner_id, id)): Path<(DbId, DbId)>,
    user: AuthUser,
    Json(input): Json<UpdateOwnerImage>,
) -> AppResult<Json<OwnerImage>> {
    if let Some(url) = &input.image_url {
        validate_image_url(url)?;
    }
    if let Some(order) = input.display_order {
        validate_display_order(order)?;
    }

    let image = OwnerImageRepo::update(&state.pool, kind, owner_id, id, &input)
        .await?
        .ok_or(AppError::not_found(kind.image_entity(), id))?;
    state
        .event_bus
        .publish(event(ImageEventKind::Updated, kind, owner_id, &user).with_image(id));

    Ok(Json(image))
}

/// DELETE /api/v1/{battles|boxes}/{owner_id}/images/{id}
pub async fn delete(
    Extension(kind): Extension<ImageOwnerKind>,
    State(state): State<AppState>,
    Path((owner_id, id)): Path<(DbId, DbId)>,
    user: AuthUser,
) -> AppResult<StatusCode> {
    if !OwnerImageRepo::delete(&state.pool, kind, owner_id, id).await? {
        return Err(AppError::not_found(kind.image_entity(), id));
    }
    tracing::info!(owner_kind = %kind, owner_id, image_id = id, "Image deleted");
    state
        .event_bus
        .publish(event(ImageEventKind::Deleted, kind, owner_id, &user).with_image(id));

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/{battles|boxes}/{owner_id}/images/{id}/primary
///
/// Clears any other primary of the owner in the same transaction.
pub async fn set_primary(
    Extension(kind): Extension<ImageOwnerKind>,
    State(state): State<AppState>,
    Path((owner_id, id)): Path<(DbId, DbId)>,
    user: AuthUser,
) -> AppResult<Json<OwnerImage>> {
    let image = OwnerImageRepo::set_primary(&state.pool, kind, owner_id, id)
        .await?
        .ok_or(AppError::not_found(kind.image_entity(), id))?;
    state
        .event_bus
        .publish(event(ImageEventKind::PrimarySet, kind, owner_id, &user).with_image(id));

    Ok(Json(image))
}

/// PUT /api/v1/{battles|boxes}/{owner_id}/images/order
///
/// Assigns `display_order = index` to each listed id and returns the
/// owner's images in their new order. Ids of other owners are ignored.
pub async fn reorder(
    Extension(kind): Extension<ImageOwnerKind>,
    State(state): State<AppState>,
    Path(owner_id): Path<DbId>,
    user: AuthUser,
    Json(input): Json<ReorderOwnerImages>,
) -> AppResult<Json<Vec<OwnerImage>>> {
    validate_reorder_ids(&input.image_ids)?;
    ensure_owner(&state, kind, owner_id).await?;

    let updated = OwnerImageRepo::reorder(&state.pool, kind, owner_id, &input.image_ids).await?;
    if updated < input.image_ids.len() as u64 {
        tracing::warn!(
            owner_kind = %kind,
            owner_id,
            requested = input.image_ids.len(),
            updated,
            "Reorder skipped ids not owned by this owner"
        );
    }
    state
        .event_bus
        .publish(event(ImageEventKind::Reordered, kind, owner_id, &user));

    let images = OwnerImageRepo::list_by_owner(&state.pool, kind, owner_id).await?;
    Ok(Json(images))
}
