pub mod health;
pub mod owner;

use axum::routing::{get, put};
use axum::Router;
use brushlog_core::images::ImageOwnerKind;

use crate::handlers::{collection, locations};
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /locations                                   active locations (cached)
///
/// /battles/{owner_id}/images                   list, add
/// /battles/{owner_id}/images/primary           primary image
/// /battles/{owner_id}/images/order             reorder (PUT)
/// /battles/{owner_id}/images/{id}              update, delete
/// /battles/{owner_id}/images/{id}/primary      set primary (PUT)
/// /battles/{owner_id}/display                  resolved display
///
/// /boxes/{owner_id}/...                        same as /battles
/// /boxes/{owner_id}/carousel                   toggle show_carousel (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    let boxes = owner::router(ImageOwnerKind::Box)
        .route("/{owner_id}/carousel", put(collection::set_carousel));

    Router::new()
        .route("/locations", get(locations::list))
        .nest("/battles", owner::router(ImageOwnerKind::Battle))
        .nest("/boxes", boxes)
}
