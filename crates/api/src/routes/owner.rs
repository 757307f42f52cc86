//! Image routes shared by every owner kind.

use axum::routing::{get, put};
use axum::{Extension, Router};
use brushlog_core::images::ImageOwnerKind;

use crate::handlers::{display, images};
use crate::state::AppState;

/// Routes mounted at `/battles` or `/boxes`, with `kind` available to every
/// handler as an `Extension`.
///
/// ```text
/// GET    /{owner_id}/images                 -> list
/// POST   /{owner_id}/images                 -> create
/// GET    /{owner_id}/images/primary         -> get_primary
/// PUT    /{owner_id}/images/order           -> reorder
/// PUT    /{owner_id}/images/{id}            -> update
/// DELETE /{owner_id}/images/{id}            -> delete
/// PUT    /{owner_id}/images/{id}/primary    -> set_primary
/// GET    /{owner_id}/display                -> get_display
/// ```
pub fn router(kind: ImageOwnerKind) -> Router<AppState> {
    Router::new()
        .route("/{owner_id}/images", get(images::list).post(images::create))
        .route("/{owner_id}/images/primary", get(images::get_primary))
        .route("/{owner_id}/images/order", put(images::reorder))
        .route(
            "/{owner_id}/images/{id}",
            put(images::update).delete(images::delete),
        )
        .route("/{owner_id}/images/{id}/primary", put(images::set_primary))
        .route("/{owner_id}/display", get(display::get_display))
        .layer(Extension(kind))
}
