use serde::Serialize;
use uuid::Uuid;

/// Identity fields of the base account, embedded in profile payloads.
/// The password hash never leaves the database layer.
#[derive(Debug, Clone, Serialize)]
pub struct AccountSummary {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// A profile enriched with live aggregation counts. The counts are computed
/// per request by counting matching rows, never stored on the profile.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub id: Uuid,
    pub user: AccountSummary,
    pub bio: String,
    pub followers_count: i64,
    pub following_count: i64,
    pub post_count: i64,
}
