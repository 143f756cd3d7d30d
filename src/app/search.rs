use anyhow::Result;

use crate::app::profiles::{profile_view_from_row, PROFILE_VIEW_COLUMNS};
use crate::domain::user::ProfileView;
use crate::infra::db::Db;

#[derive(Clone)]
pub struct SearchService {
    db: Db,
}

impl SearchService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Case-insensitive substring match over username, email and bio.
    /// Results carry the standard count enrichment, oldest account first.
    pub async fn search_users(&self, query: &str) -> Result<Vec<ProfileView>> {
        let pattern = format!("%{}%", escape_like_pattern(query));
        let rows = sqlx::query(&format!(
            "SELECT {PROFILE_VIEW_COLUMNS} \
             FROM profiles p \
             JOIN accounts a ON a.id = p.account_id \
             WHERE a.username ILIKE $1 ESCAPE '\\' \
                OR a.email ILIKE $1 ESCAPE '\\' \
                OR p.bio ILIKE $1 ESCAPE '\\' \
             ORDER BY a.created_at ASC, p.id ASC",
        ))
        .bind(&pattern)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.into_iter().map(profile_view_from_row).collect())
    }
}

fn escape_like_pattern(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '%' | '_' | '\\' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            _ => escaped.push(ch),
        }
    }
    escaped
}
