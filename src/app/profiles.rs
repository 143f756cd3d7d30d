use anyhow::Result;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::user::{AccountSummary, ProfileView};
use crate::infra::db::Db;

#[derive(Clone)]
pub struct ProfileService {
    db: Db,
}

pub(crate) const PROFILE_VIEW_COLUMNS: &str =
    "p.id, a.username, a.email, a.first_name, a.last_name, p.bio, \
     (SELECT COUNT(*) FROM follows WHERE followee_id = p.id) AS followers_count, \
     (SELECT COUNT(*) FROM follows WHERE follower_id = p.id) AS following_count, \
     (SELECT COUNT(*) FROM posts WHERE profile_id = p.id) AS post_count";

impl ProfileService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Fetch a profile with its follower/following/post counts. Each count is
    /// a live aggregation over the matching rows.
    pub async fn get_profile(&self, profile_id: Uuid) -> Result<Option<ProfileView>> {
        let row = sqlx::query(&format!(
            "SELECT {PROFILE_VIEW_COLUMNS} \
             FROM profiles p \
             JOIN accounts a ON a.id = p.account_id \
             WHERE p.id = $1",
        ))
        .bind(profile_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(profile_view_from_row))
    }

    pub async fn exists(&self, profile_id: Uuid) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM profiles WHERE id = $1)")
                .bind(profile_id)
                .fetch_one(self.db.pool())
                .await?;
        Ok(exists)
    }
}

pub(crate) fn profile_view_from_row(row: sqlx::postgres::PgRow) -> ProfileView {
    ProfileView {
        id: row.get("id"),
        user: AccountSummary {
            username: row.get("username"),
            email: row.get("email"),
            first_name: row.get("first_name"),
            last_name: row.get("last_name"),
        },
        bio: row.get("bio"),
        followers_count: row.get("followers_count"),
        following_count: row.get("following_count"),
        post_count: row.get("post_count"),
    }
}
