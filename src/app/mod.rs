pub mod auth;
pub mod feed;
pub mod posts;
pub mod profiles;
pub mod search;
pub mod social;
