use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::auth::{AuthService, NewAccount};
use crate::app::feed::FeedService;
use crate::app::posts::PostService;
use crate::app::profiles::ProfileService;
use crate::app::search::SearchService;
use crate::app::social::SocialService;
use crate::domain::post::{FeedItem, Post};
use crate::domain::user::ProfileView;
use crate::http::{AppError, AuthUser};
use crate::AppState;

const MAX_PASSWORD_LEN: usize = 128;
const MAX_BIO_LEN: usize = 50;
const MAX_POST_LEN: usize = 256;

#[derive(Serialize)]
pub(crate) struct HealthResponse {
    status: &'static str,
}

pub(crate) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let status = if state.db.ping().await.is_ok() {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse { status })
}

// All fields default to empty so that missing keys surface as validation
// errors instead of a deserialization rejection.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct SignupUserPayload {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub user: SignupUserPayload,
    #[serde(default)]
    pub bio: String,
}

#[derive(Serialize)]
pub struct SignupResponse {
    pub token: String,
}

pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), AppError> {
    if payload.user.username.trim().is_empty() {
        return Err(AppError::bad_request("username cannot be empty"));
    }
    if payload.user.email.trim().is_empty() {
        return Err(AppError::bad_request("email cannot be empty"));
    }
    if payload.user.password.trim().is_empty() {
        return Err(AppError::bad_request("password cannot be empty"));
    }
    if payload.user.password.len() > MAX_PASSWORD_LEN {
        return Err(AppError::bad_request("password must be at most 128 characters"));
    }
    if payload.bio.chars().count() > MAX_BIO_LEN {
        return Err(AppError::bad_request("bio must be at most 50 characters"));
    }

    let service = AuthService::new(state.db.clone());
    let token = service
        .signup(NewAccount {
            username: payload.user.username,
            email: payload.user.email,
            first_name: payload.user.first_name,
            last_name: payload.user.last_name,
            password: payload.user.password,
            bio: payload.bio,
        })
        .await
        .map_err(|err| {
            if let Some(sqlx_err) = err.downcast_ref::<sqlx::Error>() {
                if let Some(db_err) = sqlx_err.as_database_error() {
                    if db_err.code().as_deref() == Some("23505") {
                        return AppError::bad_request("A user with that username already exists.");
                    }
                }
            }
            tracing::error!(error = ?err, "failed to sign up");
            AppError::internal("failed to sign up")
        })?;

    Ok((StatusCode::CREATED, Json(SignupResponse { token })))
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: ProfileView,
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if payload.username.trim().is_empty() || payload.password.trim().is_empty() {
        return Err(AppError::bad_request("username and password are required"));
    }

    let service = AuthService::new(state.db.clone());
    let session = service
        .login(&payload.username, &payload.password)
        .await
        .map_err(|err| {
            tracing::error!(error = ?err, "failed to login");
            AppError::internal("failed to login")
        })?;

    let (token, profile_id) = match session {
        Some(session) => session,
        None => return Err(AppError::invalid_credentials()),
    };

    let profiles = ProfileService::new(state.db.clone());
    let profile = profiles
        .get_profile(profile_id)
        .await
        .map_err(|err| {
            tracing::error!(error = ?err, profile_id = %profile_id, "failed to fetch profile");
            AppError::internal("failed to fetch profile")
        })?
        .ok_or_else(|| AppError::internal("failed to fetch profile"))?;

    Ok(Json(LoginResponse {
        token,
        user: profile,
    }))
}

pub async fn fetch_profile(
    auth: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<ProfileView>, AppError> {
    let service = ProfileService::new(state.db.clone());
    let profile = service
        .get_profile(auth.profile_id)
        .await
        .map_err(|err| {
            tracing::error!(error = ?err, profile_id = %auth.profile_id, "failed to fetch profile");
            AppError::internal("failed to fetch profile")
        })?;

    match profile {
        Some(profile) => Ok(Json(profile)),
        None => Err(AppError::not_found("Profile not found.")),
    }
}

#[derive(Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Serialize)]
pub struct CreatePostResponse {
    pub message: &'static str,
    pub post: Post,
}

pub async fn create_post(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<CreatePostResponse>), AppError> {
    if payload.text.is_empty() {
        return Err(AppError::bad_request("Text field cannot be empty."));
    }
    if payload.text.chars().count() > MAX_POST_LEN {
        return Err(AppError::bad_request("Text must be at most 256 characters."));
    }

    let service = PostService::new(state.db.clone());
    let post = service
        .create_post(auth.profile_id, payload.text)
        .await
        .map_err(|err| {
            tracing::error!(error = ?err, profile_id = %auth.profile_id, "failed to create post");
            AppError::internal("failed to create post")
        })?;

    Ok((
        StatusCode::CREATED,
        Json(CreatePostResponse {
            message: "Post created successfully.",
            post,
        }),
    ))
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

pub async fn delete_post(
    Path(id): Path<Uuid>,
    auth: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    let service = PostService::new(state.db.clone());
    let deleted = service
        .delete_post(id, auth.profile_id)
        .await
        .map_err(|err| {
            tracing::error!(error = ?err, post_id = %id, "failed to delete post");
            AppError::internal("failed to delete post")
        })?;

    if deleted {
        Ok(Json(MessageResponse {
            message: "Post deleted successfully.",
        }))
    } else {
        Err(AppError::not_found("Post not found."))
    }
}

#[derive(Serialize)]
pub struct LikeResponse {
    pub likes: i64,
}

/// Unconditional increment: no ownership check and no per-caller dedup.
pub async fn like_post(
    Path(id): Path<Uuid>,
    _auth: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<LikeResponse>, AppError> {
    let service = PostService::new(state.db.clone());
    let likes = service.like_post(id).await.map_err(|err| {
        tracing::error!(error = ?err, post_id = %id, "failed to like post");
        AppError::internal("failed to like post")
    })?;

    match likes {
        Some(likes) => Ok(Json(LikeResponse { likes })),
        None => Err(AppError::not_found("Post not found.")),
    }
}

pub async fn home_feed(
    auth: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<FeedItem>>, AppError> {
    let service = FeedService::new(state.db.clone());
    let items = service.home_feed(auth.profile_id).await.map_err(|err| {
        tracing::error!(error = ?err, profile_id = %auth.profile_id, "failed to fetch feed");
        AppError::internal("failed to fetch feed")
    })?;

    Ok(Json(items))
}

pub async fn follow_user(
    Path(id): Path<Uuid>,
    auth: AuthUser,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let profiles = ProfileService::new(state.db.clone());
    let exists = profiles.exists(id).await.map_err(|err| {
        tracing::error!(error = ?err, profile_id = %id, "failed to look up profile");
        AppError::internal("failed to follow user")
    })?;
    if !exists {
        return Err(AppError::not_found("User not found."));
    }

    let service = SocialService::new(state.db.clone());
    let followed = service.follow(auth.profile_id, id).await.map_err(|err| {
        tracing::error!(error = ?err, follower_id = %auth.profile_id, followee_id = %id, "failed to follow user");
        AppError::internal("failed to follow user")
    })?;

    if followed {
        Ok((
            StatusCode::CREATED,
            Json(MessageResponse {
                message: "You are now following this user.",
            }),
        ))
    } else {
        Err(AppError::bad_request("You are already following this user."))
    }
}

pub async fn unfollow_user(
    Path(id): Path<Uuid>,
    auth: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    let service = SocialService::new(state.db.clone());
    let unfollowed = service.unfollow(auth.profile_id, id).await.map_err(|err| {
        tracing::error!(error = ?err, follower_id = %auth.profile_id, followee_id = %id, "failed to unfollow user");
        AppError::internal("failed to unfollow user")
    })?;

    if unfollowed {
        Ok(Json(MessageResponse {
            message: "You have unfollowed this user.",
        }))
    } else {
        Err(AppError::bad_request("You are not following this user."))
    }
}

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

pub async fn search_users(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ProfileView>>, AppError> {
    let q = query.q.unwrap_or_default();
    if q.trim().is_empty() {
        return Err(AppError::bad_request("Search query is required."));
    }

    let service = SearchService::new(state.db.clone());
    let profiles = service.search_users(&q).await.map_err(|err| {
        tracing::error!(error = ?err, "failed to search users");
        AppError::internal("failed to search users")
    })?;

    Ok(Json(profiles))
}
