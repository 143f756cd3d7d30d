use axum::Router;

use crate::AppState;

mod auth;
mod error;
mod handlers;
mod routes;

pub use auth::AuthUser;
pub use error::AppError;

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health())
        .merge(routes::auth())
        .merge(routes::profile())
        .merge(routes::posts())
        .merge(routes::feed())
        .merge(routes::social())
        .merge(routes::search())
        .with_state(state)
}
