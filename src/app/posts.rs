use anyhow::Result;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::post::Post;
use crate::infra::db::Db;

#[derive(Clone)]
pub struct PostService {
    db: Db,
}

impl PostService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Create a post with a server-assigned timestamp and zero likes.
    pub async fn create_post(&self, profile_id: Uuid, text: String) -> Result<Post> {
        let row = sqlx::query(
            "INSERT INTO posts (profile_id, text) \
             VALUES ($1, $2) \
             RETURNING id, profile_id, text, created_at, likes",
        )
        .bind(profile_id)
        .bind(text)
        .fetch_one(self.db.pool())
        .await?;

        Ok(Post {
            id: row.get("id"),
            profile_id: row.get("profile_id"),
            text: row.get("text"),
            created_at: row.get("created_at"),
            likes: row.get("likes"),
        })
    }

    /// Delete a post owned by the caller. Returns false when the post does
    /// not exist or belongs to someone else.
    pub async fn delete_post(&self, post_id: Uuid, profile_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1 AND profile_id = $2")
            .bind(post_id)
            .bind(profile_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Increment the like counter and return the new value. A single atomic
    /// UPDATE, so concurrent likes cannot lose increments. There is no
    /// per-caller dedup: liking twice counts twice.
    pub async fn like_post(&self, post_id: Uuid) -> Result<Option<i64>> {
        let likes: Option<i64> = sqlx::query_scalar(
            "UPDATE posts SET likes = likes + 1 WHERE id = $1 RETURNING likes",
        )
        .bind(post_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(likes)
    }
}
