//! Profile fetch with count enrichment, and user search.

mod common;

use axum::http::StatusCode;
use common::app;

// ===========================================================================
// Profile
// ===========================================================================

#[tokio::test]
async fn fetch_profile_with_counts() {
    let app = app().await;
    let follower = app.create_user_with_bio("usr_counts_a", "Follower bio").await;
    let followee = app.create_user_with_bio("usr_counts_b", "Followee bio").await;

    app.follow(follower.profile_id, followee.profile_id).await;
    app.follow(followee.profile_id, follower.profile_id).await;
    app.create_post_for(followee.profile_id, "first post", 10, 20).await;
    app.create_post_for(followee.profile_id, "second post", 5, 10).await;

    // Follower's own profile: mutual follow, no posts.
    let resp = app.get("/profile", Some(&follower.token)).await;
    assert_eq!(resp.status, StatusCode::OK);
    let body = resp.json();
    assert_eq!(body["user"]["username"].as_str().unwrap(), follower.username);
    assert_eq!(body["bio"].as_str().unwrap(), "Follower bio");
    assert_eq!(body["followers_count"].as_i64().unwrap(), 1);
    assert_eq!(body["following_count"].as_i64().unwrap(), 1);
    assert_eq!(body["post_count"].as_i64().unwrap(), 0);

    // Followee's own profile: two posts, follows back.
    let resp = app.get("/profile", Some(&followee.token)).await;
    assert_eq!(resp.status, StatusCode::OK);
    let body = resp.json();
    assert_eq!(body["user"]["username"].as_str().unwrap(), followee.username);
    assert_eq!(body["bio"].as_str().unwrap(), "Followee bio");
    assert_eq!(body["followers_count"].as_i64().unwrap(), 1);
    assert_eq!(body["following_count"].as_i64().unwrap(), 1);
    assert_eq!(body["post_count"].as_i64().unwrap(), 2);
}

// ===========================================================================
// Search
// ===========================================================================

#[tokio::test]
async fn search_matches_username_email_and_bio() {
    let app = app().await;
    let searcher = app.create_user("usr_search_self").await;
    // Username match (case-insensitive substring).
    app.create_user_with_bio("SEARCHTARGET_name", "nothing here").await;
    // Bio match only.
    app.create_user_with_bio("usr_search_plain", "a searchtarget bio").await;

    let resp = app
        .get("/search/users?q=searchtarget", Some(&searcher.token))
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    let body = resp.json();
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 2);

    // Oldest account first, and each result carries the count enrichment.
    assert_eq!(
        results[0]["user"]["username"].as_str().unwrap(),
        "testuser_SEARCHTARGET_name"
    );
    assert_eq!(
        results[1]["user"]["username"].as_str().unwrap(),
        "testuser_usr_search_plain"
    );
    assert!(results[0]["followers_count"].is_i64());
    assert!(results[0]["following_count"].is_i64());
    assert!(results[0]["post_count"].is_i64());
}

#[tokio::test]
async fn search_matches_email() {
    let app = app().await;
    let searcher = app.create_user("usr_search_mail").await;

    // Emails are test_<suffix>@example.com; match on a unique piece of it.
    let resp = app
        .get("/search/users?q=usr_search_mail%40example", Some(&searcher.token))
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    let results = resp.json();
    let results = results.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(
        results[0]["user"]["email"].as_str().unwrap(),
        searcher.email
    );
}

#[tokio::test]
async fn search_empty_query() {
    let app = app().await;
    let searcher = app.create_user("usr_search_empty").await;

    let resp = app.get("/search/users?q=", Some(&searcher.token)).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.message(), "Search query is required.");

    let resp = app.get("/search/users", Some(&searcher.token)).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_like_metacharacters_are_literal() {
    let app = app().await;
    let searcher = app.create_user("usr_search_meta").await;
    app.create_user_with_bio("usr_search_pct", "100% organic").await;

    // "%" must match literally, not as a LIKE wildcard.
    let resp = app
        .get("/search/users?q=100%25%20organic", Some(&searcher.token))
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    let results = resp.json();
    let results = results.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["bio"].as_str().unwrap(), "100% organic");
}

#[tokio::test]
async fn search_requires_auth() {
    let app = app().await;

    let resp = app.get("/search/users?q=anything", None).await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}
