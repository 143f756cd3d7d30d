use axum::{routing::delete, routing::get, routing::patch, routing::post, Router};

use crate::http::handlers;
use crate::AppState;

pub fn health() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health))
}

pub fn auth() -> Router<AppState> {
    Router::new()
        .route("/signup", post(handlers::signup))
        .route("/login", post(handlers::login))
}

pub fn profile() -> Router<AppState> {
    Router::new().route("/profile", get(handlers::fetch_profile))
}

pub fn posts() -> Router<AppState> {
    Router::new()
        .route("/post", post(handlers::create_post))
        .route("/post/:id", delete(handlers::delete_post))
        .route("/post/:id", patch(handlers::like_post))
}

pub fn feed() -> Router<AppState> {
    Router::new().route("/feed", get(handlers::home_feed))
}

pub fn social() -> Router<AppState> {
    Router::new()
        .route("/follow/:id", post(handlers::follow_user))
        .route("/follow/:id", delete(handlers::unfollow_user))
}

pub fn search() -> Router<AppState> {
    Router::new().route("/search/users", get(handlers::search_users))
}
