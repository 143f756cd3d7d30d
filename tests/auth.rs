//! Signup and login flows.

mod common;

use axum::http::StatusCode;
use common::{app, DEFAULT_PASSWORD};
use serde_json::json;

fn signup_payload(username: &str, bio: &str) -> serde_json::Value {
    json!({
        "user": {
            "username": username,
            "email": format!("{}@example.com", username),
            "first_name": "Test",
            "last_name": "User",
            "password": DEFAULT_PASSWORD,
        },
        "bio": bio,
    })
}

#[tokio::test]
async fn signup_then_login() {
    let app = app().await;

    let resp = app
        .post_json("/signup", signup_payload("auth_roundtrip", "A test bio."), None)
        .await;
    assert_eq!(resp.status, StatusCode::CREATED);
    let token = resp.json()["token"].as_str().unwrap().to_string();
    assert!(!token.is_empty());

    let resp = app
        .post_json(
            "/login",
            json!({"username": "auth_roundtrip", "password": DEFAULT_PASSWORD}),
            None,
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    let body = resp.json();
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["user"]["bio"].as_str().unwrap(), "A test bio.");
    assert_eq!(
        body["user"]["user"]["username"].as_str().unwrap(),
        "auth_roundtrip"
    );

    // The signup token is persistent: login hands back the same one.
    assert_eq!(body["token"].as_str().unwrap(), token);
}

#[tokio::test]
async fn signup_missing_username() {
    let app = app().await;

    let resp = app
        .post_json(
            "/signup",
            json!({
                "user": {"email": "nobody@example.com", "password": DEFAULT_PASSWORD},
                "bio": "",
            }),
            None,
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.message(), "username cannot be empty");
}

#[tokio::test]
async fn signup_missing_password() {
    let app = app().await;

    let resp = app
        .post_json(
            "/signup",
            json!({
                "user": {"username": "auth_nopass", "email": "auth_nopass@example.com"},
            }),
            None,
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.message(), "password cannot be empty");
}

#[tokio::test]
async fn signup_duplicate_username() {
    let app = app().await;
    app.create_user("auth_dup").await;

    let resp = app
        .post_json("/signup", signup_payload("testuser_auth_dup", ""), None)
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.message(), "A user with that username already exists.");
}

#[tokio::test]
async fn signup_bio_too_long() {
    let app = app().await;

    let resp = app
        .post_json(
            "/signup",
            signup_payload("auth_longbio", &"x".repeat(51)),
            None,
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.message(), "bio must be at most 50 characters");
}

#[tokio::test]
async fn login_wrong_password() {
    let app = app().await;
    let user = app.create_user("auth_wrongpw").await;

    let resp = app
        .post_json(
            "/login",
            json!({"username": user.username, "password": "not-the-password"}),
            None,
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.error_field(), "Invalid credentials");
    assert!(resp.json()["token"].is_null());
}

#[tokio::test]
async fn login_unknown_username() {
    let app = app().await;

    let resp = app
        .post_json(
            "/login",
            json!({"username": "auth_nobody", "password": DEFAULT_PASSWORD}),
            None,
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.error_field(), "Invalid credentials");
}

#[tokio::test]
async fn protected_endpoints_require_token() {
    let app = app().await;

    let resp = app.get("/profile", None).await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);

    let resp = app.get("/feed", Some("not-a-real-token")).await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}
