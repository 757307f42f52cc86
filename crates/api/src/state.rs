use std::sync::Arc;

use brushlog_core::source::ImageOwnerSource;
use brushlog_core::ttl_cache::TtlCache;
use brushlog_db::models::location::Location;

use crate::config::ServerConfig;

/// In-memory copy of the active locations list. Keyed by `()` since there
/// is only one list.
pub type LocationsCache = TtlCache<(), Vec<Location>>;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; inner data is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: brushlog_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Bus carrying image-change events to display listeners.
    pub event_bus: Arc<brushlog_events::EventBus>,
    pub locations_cache: Arc<LocationsCache>,
    /// Loads owner rows, images and fallbacks for the display view.
    pub image_source: Arc<dyn ImageOwnerSource>,
}

impl AppState {
    /// Assemble state backed by PostgreSQL, with an empty locations cache.
    pub fn new(
        pool: brushlog_db::DbPool,
        config: ServerConfig,
        event_bus: Arc<brushlog_events::EventBus>,
    ) -> Self {
        let ttl = std::time::Duration::from_secs(config.locations_cache_ttl_secs);
        Self {
            image_source: Arc::new(brushlog_db::PgImageOwnerSource::new(pool.clone())),
            locations_cache: Arc::new(LocationsCache::new(ttl)),
            pool,
            config: Arc::new(config),
            event_bus,
        }
    }
}
