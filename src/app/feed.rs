use anyhow::Result;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::post::FeedItem;
use crate::infra::db::Db;

#[derive(Clone)]
pub struct FeedService {
    db: Db,
}

impl FeedService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Posts authored by any profile the caller follows, newest first.
    pub async fn home_feed(&self, profile_id: Uuid) -> Result<Vec<FeedItem>> {
        let rows = sqlx::query(
            "SELECT a.username, p.text, p.created_at, p.likes \
             FROM posts p \
             JOIN profiles pr ON pr.id = p.profile_id \
             JOIN accounts a ON a.id = pr.account_id \
             WHERE p.profile_id IN ( \
                 SELECT followee_id FROM follows WHERE follower_id = $1 \
             ) \
             ORDER BY p.created_at DESC, p.id DESC",
        )
        .bind(profile_id)
        .fetch_all(self.db.pool())
        .await?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(FeedItem {
                user: row.get("username"),
                text: row.get("text"),
                timestamp: row.get("created_at"),
                likes: row.get("likes"),
            });
        }

        Ok(items)
    }
}
