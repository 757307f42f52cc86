#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use brushlog_api::auth::jwt::{generate_access_token, JwtConfig};
use brushlog_api::config::ServerConfig;
use brushlog_api::router::build_app_router;
use brushlog_api::state::AppState;
use brushlog_db::models::battle::CreateBattle;
use brushlog_db::models::collection::CreateCollection;
use brushlog_db::models::game::CreateGame;
use brushlog_db::repositories::{BattleRepo, CollectionRepo, GameRepo};
use brushlog_events::EventBus;

pub const TEST_USER: i64 = 11;

fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret-long-enough".to_string(),
        access_token_expiry_mins: 15,
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        locations_cache_ttl_secs: 300,
        jwt: jwt_config(),
    }
}

/// Build the full application router over `pool`, returning the bus so
/// tests can observe published events.
pub fn build_test_app_with_bus(pool: PgPool) -> (Router, Arc<EventBus>) {
    let bus = Arc::new(EventBus::default());
    let state = AppState::new(pool, test_config(), Arc::clone(&bus));
    (build_app_router(state), bus)
}

pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_bus(pool).0
}

/// A valid bearer token for [`TEST_USER`].
pub fn token() -> String {
    generate_access_token(TEST_USER, "painter", &jwt_config()).expect("token should encode")
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub async fn create_game(pool: &PgPool, image: Option<&str>, icon: Option<&str>) -> i64 {
    GameRepo::create(
        pool,
        &CreateGame {
            name: "Necromunda".to_string(),
            image: image.map(str::to_string),
            icon: icon.map(str::to_string),
        },
    )
    .await
    .expect("game insert")
    .id
}

pub async fn create_box(pool: &PgPool, game_id: Option<i64>) -> i64 {
    CollectionRepo::create(
        pool,
        &CreateCollection {
            name: "Gang box".to_string(),
            game_id,
            image_url: None,
            show_carousel: None,
            created_by: Some(TEST_USER),
        },
    )
    .await
    .expect("box insert")
    .id
}

pub async fn create_battle(pool: &PgPool, game_id: Option<i64>, image_url: Option<&str>) -> i64 {
    BattleRepo::create(
        pool,
        &CreateBattle {
            title: "Zone mortalis".to_string(),
            game_id,
            box_id: None,
            image_url: image_url.map(str::to_string),
            created_by: Some(TEST_USER),
        },
    )
    .await
    .expect("battle insert")
    .id
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    app.oneshot(request).await.expect("request should complete")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), None).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), Some(token)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body), Some(token)).await
}

pub async fn put_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, None, Some(token)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None, Some(token)).await
}
