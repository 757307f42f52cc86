use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast::{self, error::RecvError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use brushlog_api::config::ServerConfig;
use brushlog_api::router::build_app_router;
use brushlog_api::state::AppState;
use brushlog_events::{EventBus, ImageEvent};
use sqlx::PgPool;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    init_tracing();

    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = config.port,
        locations_cache_ttl_secs = config.locations_cache_ttl_secs,
        "Loaded server configuration"
    );

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = prepare_database(&database_url).await;

    let event_bus = Arc::new(EventBus::default());

    // Debug trail of every invalidation event.
    let audit_handle = tokio::spawn(log_image_events(event_bus.subscribe()));

    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    let state = AppState::new(pool, config, Arc::clone(&event_bus));
    let app = build_app_router(state);

    tracing::info!(%addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Server stopped accepting connections, cleaning up");

    // The router's state holds the other senders and is gone by now;
    // dropping the last one closes the channel.
    drop(event_bus);
    let _ = tokio::time::timeout(Duration::from_secs(5), audit_handle).await;

    tracing::info!("Graceful shutdown complete");
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "brushlog_api=debug,brushlog_db=info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Connect, verify and migrate. Any failure aborts startup.
async fn prepare_database(url: &str) -> PgPool {
    let pool = brushlog_db::create_pool(url)
        .await
        .expect("Failed to connect to database");
    brushlog_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    brushlog_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database ready, migrations applied");
    pool
}

async fn log_image_events(mut receiver: broadcast::Receiver<ImageEvent>) {
    loop {
        match receiver.recv().await {
            Ok(event) => {
                tracing::debug!(
                    event = %event.kind,
                    owner_kind = %event.owner.kind,
                    owner_id = event.owner.id,
                    image_id = ?event.image_id,
                    actor = event.actor_user_id,
                    "Display invalidated"
                );
            }
            Err(RecvError::Lagged(n)) => {
                tracing::warn!(skipped = n, "Event log lagged behind the bus");
            }
            Err(RecvError::Closed) => break,
        }
    }
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
