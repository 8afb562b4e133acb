//! HTTP-level tests for `/api/tags`.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_json, get, post_json};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_list_delete(pool: PgPool) {
    let app = common::build_test_app(pool);

    let created = post_json(app.clone(), "/api/tags", json!({ "name": "infra" })).await;
    assert_eq!(created.status(), StatusCode::OK);
    let tag = body_json(created).await;

    let list = body_json(get(app.clone(), "/api/tags").await).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["name"], "infra");

    let deleted = delete_json(app, "/api/tags", json!({ "id": tag["id"] })).await;
    assert_eq!(deleted.status(), StatusCode::OK);
    assert_eq!(
        body_json(deleted).await,
        json!({ "message": "Tag deleted successfully" })
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_deleting_missing_tag_fails(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = delete_json(app, "/api/tags", json!({ "id": 424242 })).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Failed to delete tag" })
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_malformed_delete_body_fails(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = delete_json(app, "/api/tags", json!({ "id": "infra" })).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], "Failed to delete tag");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_tag_fails(pool: PgPool) {
    let app = common::build_test_app(pool);
    post_json(app.clone(), "/api/tags", json!({ "name": "ops" })).await;

    let response = post_json(app, "/api/tags", json!({ "name": "ops" })).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], "Failed to create tag");
}
