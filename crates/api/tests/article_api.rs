//! HTTP-level integration tests for article reads and edit submission.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::StatusCode;
use common::{bearer, body_json, get, post_json_auth, seed_contributor};
use sqlx::PgPool;

fn edit_body(base_version: i32, title: &str, content: &str) -> serde_json::Value {
    serde_json::json!({
        "base_version": base_version,
        "title": title,
        "content": content,
    })
}

// ---------------------------------------------------------------------------
// Edit submission
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_trusted_create_publishes_immediately(pool: PgPool) {
    seed_contributor(&pool, "alice", "trusted").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/articles/rust-lang/edits",
        &bearer("alice"),
        edit_body(0, "Rust", "A systems language."),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["version"], 1);
    assert_eq!(json["data"]["status"], "published");

    // The article is now readable at its head.
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/articles/rust-lang").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["head_version"], 1);
    assert_eq!(json["data"]["status"], "published");
    assert_eq!(json["data"]["content"], "A systems language.");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_new_contributor_edit_is_queued(pool: PgPool) {
    seed_contributor(&pool, "newbie", "new").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/articles/rust-lang/edits",
        &bearer("newbie"),
        edit_body(0, "Rust", "First draft."),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["version"], 1);
    assert_eq!(json["data"]["status"], "pending");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_stale_base_version_returns_409_with_head(pool: PgPool) {
    seed_contributor(&pool, "alice", "trusted").await;

    let app = common::build_test_app(pool.clone());
    post_json_auth(
        app,
        "/api/v1/articles/rust-lang/edits",
        &bearer("alice"),
        edit_body(0, "Rust", "v1"),
    )
    .await;

    // A second create against the now-existing article is stale.
    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/articles/rust-lang/edits",
        &bearer("alice"),
        edit_body(0, "Rust", "also v1"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VERSION_CONFLICT");
    assert_eq!(json["details"]["current_head"], 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_submit_without_auth_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::post_json(
        app,
        "/api/v1/articles/rust-lang/edits",
        edit_body(0, "Rust", "anonymous"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_submit_with_bad_key_returns_401(pool: PgPool) {
    seed_contributor(&pool, "alice", "trusted").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/articles/rust-lang/edits",
        "Bearer not-a-real-key",
        edit_body(0, "Rust", "impostor"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_empty_content_returns_400(pool: PgPool) {
    seed_contributor(&pool, "alice", "trusted").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/articles/rust-lang/edits",
        &bearer("alice"),
        edit_body(0, "Rust", ""),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Article reads
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_get_missing_article_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/articles/no-such-slug").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_list_articles_shows_published_only(pool: PgPool) {
    seed_contributor(&pool, "alice", "trusted").await;
    seed_contributor(&pool, "newbie", "new").await;

    // Published article.
    let app = common::build_test_app(pool.clone());
    post_json_auth(
        app,
        "/api/v1/articles/rust-lang/edits",
        &bearer("alice"),
        edit_body(0, "Rust", "published"),
    )
    .await;

    // Draft article (created by a new contributor, never approved).
    let app = common::build_test_app(pool.clone());
    post_json_auth(
        app,
        "/api/v1/articles/go-lang/edits",
        &bearer("newbie"),
        edit_body(0, "Go", "draft"),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/articles").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let slugs: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["rust-lang"]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_list_articles_search_filter(pool: PgPool) {
    seed_contributor(&pool, "alice", "trusted").await;

    for (slug, title, content) in [
        ("rust-lang", "Rust", "Fearless concurrency."),
        ("go-lang", "Go", "Goroutines everywhere."),
    ] {
        let app = common::build_test_app(pool.clone());
        post_json_auth(
            app,
            &format!("/api/v1/articles/{slug}/edits"),
            &bearer("alice"),
            edit_body(0, title, content),
        )
        .await;
    }

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/articles?q=fearless").await;
    let json = body_json(response).await;

    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["slug"], "rust-lang");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_history_tags_every_revision(pool: PgPool) {
    seed_contributor(&pool, "alice", "trusted").await;

    // v1 published, then a stale-free v2.
    let app = common::build_test_app(pool.clone());
    post_json_auth(
        app,
        "/api/v1/articles/rust-lang/edits",
        &bearer("alice"),
        edit_body(0, "Rust", "v1"),
    )
    .await;
    let app = common::build_test_app(pool.clone());
    post_json_auth(
        app,
        "/api/v1/articles/rust-lang/edits",
        &bearer("alice"),
        edit_body(1, "Rust", "v2"),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/articles/rust-lang/history").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["version"], 1);
    assert_eq!(data[0]["status"], "approved");
    assert_eq!(data[1]["version"], 2);
    assert_eq!(data[1]["status"], "approved");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_history_of_missing_article_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/articles/no-such-slug/history").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
