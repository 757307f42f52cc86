//! Integration tests for the owner image routes.
//!
//! Covers authentication, validation, primary handling, reordering and the
//! invalidation events published on every mutation.

mod common;

use axum::http::StatusCode;
use brushlog_core::images::OwnerRef;
use brushlog_events::ImageEventKind;
use common::{
    body_json, delete_auth, get, post_json, post_json_auth, put_auth, put_json_auth, token,
};
use serde_json::json;
use sqlx::PgPool;

async fn add_image(pool: &PgPool, uri: &str, body: serde_json::Value) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, uri, body, &token()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn add_image_requires_bearer_token(pool: PgPool) {
    let battle = common::create_battle(&pool, None, None).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        &format!("/api/v1/battles/{battle}/images"),
        json!({ "image_url": "https://cdn/a.png" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_token_is_rejected(pool: PgPool) {
    let battle = common::create_battle(&pool, None, None).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        &format!("/api/v1/battles/{battle}/images"),
        json!({ "image_url": "https://cdn/a.png" }),
        "not-a-jwt",
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Create / list
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn add_image_records_creator_and_publishes_event(pool: PgPool) {
    let battle = common::create_battle(&pool, None, None).await;
    let (app, bus) = common::build_test_app_with_bus(pool.clone());
    let mut events = bus.subscribe();

    let response = post_json_auth(
        app,
        &format!("/api/v1/battles/{battle}/images"),
        json!({ "image_url": "https://cdn/a.png" }),
        &token(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["owner_id"], battle);
    assert_eq!(json["created_by"], common::TEST_USER);
    assert_eq!(json["display_order"], 0);
    assert_eq!(json["is_primary"], false);

    let event = events.try_recv().expect("an event should be published");
    assert_eq!(event.kind, ImageEventKind::Added);
    assert_eq!(event.owner, OwnerRef::battle(battle));
    assert_eq!(event.actor_user_id, common::TEST_USER);
    assert_eq!(event.image_id, json["id"].as_i64());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn blank_image_url_is_a_validation_error(pool: PgPool) {
    let collection = common::create_box(&pool, None).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        &format!("/api/v1/boxes/{collection}/images"),
        json!({ "image_url": "   " }),
        &token(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_owner_is_404(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/boxes/424242/images").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/boxes/424242/images",
        json!({ "image_url": "https://cdn/a.png" }),
        &token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_of_owner_without_images_is_empty(pool: PgPool) {
    let collection = common::create_box(&pool, None).await;
    let app = common::build_test_app(pool);

    let response = get(app, &format!("/api/v1/boxes/{collection}/images")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

// ---------------------------------------------------------------------------
// Primary
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn set_primary_moves_the_flag(pool: PgPool) {
    let collection = common::create_box(&pool, None).await;
    let base = format!("/api/v1/boxes/{collection}/images");

    let first = add_image(&pool, &base, json!({ "image_url": "https://cdn/1.png", "is_primary": true })).await;
    let second = add_image(&pool, &base, json!({ "image_url": "https://cdn/2.png" })).await;

    let app = common::build_test_app(pool.clone());
    let response = put_auth(app, &format!("{base}/{}/primary", second["id"]), &token()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["is_primary"], true);

    let app = common::build_test_app(pool.clone());
    let images = body_json(get(app, &base).await).await;
    let flags: Vec<(i64, bool)> = images
        .as_array()
        .unwrap()
        .iter()
        .map(|img| (img["id"].as_i64().unwrap(), img["is_primary"].as_bool().unwrap()))
        .collect();
    assert_eq!(
        flags,
        vec![
            (first["id"].as_i64().unwrap(), false),
            (second["id"].as_i64().unwrap(), true),
        ]
    );

    let app = common::build_test_app(pool);
    let primary = body_json(get(app, &format!("{base}/primary")).await).await;
    assert_eq!(primary["id"], second["id"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn primary_of_owner_without_images_is_404(pool: PgPool) {
    let battle = common::create_battle(&pool, None, None).await;
    let app = common::build_test_app(pool);

    let response = get(app, &format!("/api/v1/battles/{battle}/images/primary")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn image_of_another_owner_cannot_be_touched(pool: PgPool) {
    let mine = common::create_battle(&pool, None, None).await;
    let other = common::create_battle(&pool, None, None).await;
    let foreign = add_image(
        &pool,
        &format!("/api/v1/battles/{other}/images"),
        json!({ "image_url": "https://cdn/x.png" }),
    )
    .await;
    let uri = format!("/api/v1/battles/{mine}/images/{}", foreign["id"]);

    let app = common::build_test_app(pool.clone());
    let response = put_auth(app, &format!("{uri}/primary"), &token()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(app, &uri, json!({ "display_order": 9 }), &token()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let response = delete_auth(app, &uri, &token()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Update / delete / reorder
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_rejects_negative_display_order(pool: PgPool) {
    let battle = common::create_battle(&pool, None, None).await;
    let base = format!("/api/v1/battles/{battle}/images");
    let img = add_image(&pool, &base, json!({ "image_url": "https://cdn/1.png" })).await;

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("{base}/{}", img["id"]),
        json!({ "display_order": -1 }),
        &token(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_removes_image(pool: PgPool) {
    let battle = common::create_battle(&pool, None, None).await;
    let base = format!("/api/v1/battles/{battle}/images");
    let img = add_image(&pool, &base, json!({ "image_url": "https://cdn/1.png" })).await;

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("{base}/{}", img["id"]), &token()).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    assert_eq!(body_json(get(app, &base).await).await, json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reorder_returns_new_order(pool: PgPool) {
    let collection = common::create_box(&pool, None).await;
    let base = format!("/api/v1/boxes/{collection}/images");
    let a = add_image(&pool, &base, json!({ "image_url": "https://cdn/a.png" })).await;
    let b = add_image(&pool, &base, json!({ "image_url": "https://cdn/b.png" })).await;
    let c = add_image(&pool, &base, json!({ "image_url": "https://cdn/c.png" })).await;

    let (app, bus) = common::build_test_app_with_bus(pool);
    let mut events = bus.subscribe();
    let response = put_json_auth(
        app,
        &format!("{base}/order"),
        json!({ "image_ids": [c["id"], a["id"], b["id"]] }),
        &token(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let urls: Vec<String> = body_json(response)
        .await
        .as_array()
        .unwrap()
        .iter()
        .map(|img| img["image_url"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(urls, vec!["https://cdn/c.png", "https://cdn/a.png", "https://cdn/b.png"]);

    let event = events.try_recv().expect("reorder should publish");
    assert_eq!(event.kind, ImageEventKind::Reordered);
    assert_eq!(event.owner, OwnerRef::boxed(collection));
    assert_eq!(event.image_id, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reorder_with_duplicate_ids_is_rejected(pool: PgPool) {
    let collection = common::create_box(&pool, None).await;
    let app = common::build_test_app(pool);

    let response = put_json_auth(
        app,
        &format!("/api/v1/boxes/{collection}/images/order"),
        json!({ "image_ids": [1, 1] }),
        &token(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
