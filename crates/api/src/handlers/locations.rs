//! Venue locations, served from an in-memory TTL cache.

use axum::extract::State;
use axum::Json;
use brushlog_db::models::location::Location;
use brushlog_db::repositories::LocationRepo;

use crate::error::AppResult;
use crate::response::{self, DataResponse};
use crate::state::AppState;

/// GET /api/v1/locations
///
/// Active locations ordered by name. The list is read from the database at
/// most once per cache TTL.
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Location>>>> {
    if let Some(cached) = state.locations_cache.get(&()).await {
        return Ok(response::data(cached));
    }

    let locations = LocationRepo::list_active(&state.pool).await?;
    tracing::debug!(count = locations.len(), "Locations cache refreshed");
    state.locations_cache.insert((), locations.clone()).await;

    Ok(response::data(locations))
}
