//! Integration tests for registration and login.
//!
//! Each test runs against its own server and database; no external setup
//! is required.

#![allow(clippy::indexing_slicing)]

use reqwest::{Response, StatusCode};
use serde_json::{Value, json};
use tradepost_integration_tests::TestContext;

/// Test helper: POST a JSON body to a path.
async fn post_json(ctx: &TestContext, path: &str, body: &Value) -> Response {
    ctx.client
        .post(ctx.url(path))
        .json(body)
        .send()
        .await
        .expect("Failed to send request")
}

// ============================================================================
// Registration Tests
// ============================================================================

#[tokio::test]
async fn test_register_creates_a_regular_user_by_default() {
    let ctx = TestContext::new().await;

    let resp = post_json(
        &ctx,
        "/users/register",
        &json!({"username": "walter", "password": "sup3rsecret"}),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert!(body["id"].as_i64().expect("id is a number") >= 1);
    assert_eq!(body["username"], "walter");
    assert_eq!(body["role"], "regular");

    // No password material in the response.
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_honors_the_admin_role() {
    let ctx = TestContext::new().await;

    let resp = post_json(
        &ctx,
        "/users/register",
        &json!({"username": "boss", "password": "sup3rsecret", "role": "admin"}),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["role"], "admin");
}

#[tokio::test]
async fn test_register_duplicate_username_conflicts() {
    let ctx = TestContext::new().await;
    let req = json!({"username": "walter", "password": "sup3rsecret"});

    let resp = post_json(&ctx, "/users/register", &req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = post_json(&ctx, "/users/register", &req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Username already exists");
}

#[tokio::test]
async fn test_register_validates_username_and_password() {
    let ctx = TestContext::new().await;

    // Usernames may not contain whitespace.
    let resp = post_json(
        &ctx,
        "/users/register",
        &json!({"username": "wal ter", "password": "sup3rsecret"}),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert!(
        body["error"]
            .as_str()
            .expect("error is a string")
            .starts_with("Invalid username")
    );

    // Passwords must be at least 8 characters.
    let resp = post_json(
        &ctx,
        "/users/register",
        &json!({"username": "walter", "password": "short"}),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "password must be at least 8 characters");
}

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
async fn test_login_round_trip() {
    let ctx = TestContext::new().await;

    let resp = post_json(
        &ctx,
        "/users/register",
        &json!({"username": "walter", "password": "sup3rsecret"}),
    )
    .await;
    let registered: Value = resp.json().await.expect("Failed to parse response");

    let resp = post_json(
        &ctx,
        "/users/login",
        &json!({"username": "walter", "password": "sup3rsecret"}),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["id"], registered["id"]);
    assert_eq!(body["username"], "walter");
}

#[tokio::test]
async fn test_login_does_not_reveal_whether_the_account_exists() {
    let ctx = TestContext::new().await;

    post_json(
        &ctx,
        "/users/register",
        &json!({"username": "walter", "password": "sup3rsecret"}),
    )
    .await;

    // Wrong password for a real account.
    let resp = post_json(
        &ctx,
        "/users/login",
        &json!({"username": "walter", "password": "wrong password"}),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let wrong_password: Value = resp.json().await.expect("Failed to parse response");

    // Account that does not exist.
    let resp = post_json(
        &ctx,
        "/users/login",
        &json!({"username": "nobody", "password": "sup3rsecret"}),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let no_account: Value = resp.json().await.expect("Failed to parse response");

    // Both failures read identically.
    assert_eq!(wrong_password["error"], "Invalid username or password");
    assert_eq!(wrong_password["error"], no_account["error"]);
}
