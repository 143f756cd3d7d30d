use anyhow::{anyhow, Result};
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::RngCore;
use sqlx::Row;
use uuid::Uuid;

use crate::infra::db::Db;

/// The caller resolved from an opaque bearer token.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub account_id: Uuid,
    pub profile_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub bio: String,
}

#[derive(Clone)]
pub struct AuthService {
    db: Db,
}

impl AuthService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Create the base account, its profile and its token in one transaction
    /// so a half-created signup can never be observed. Returns the token.
    pub async fn signup(&self, account: NewAccount) -> Result<String> {
        let password_hash = hash_password(&account.password)?;
        let token = generate_token();

        let mut tx = self.db.pool().begin().await?;

        let account_id: Uuid = sqlx::query_scalar(
            "INSERT INTO accounts (username, email, first_name, last_name, password_hash) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id",
        )
        .bind(account.username)
        .bind(account.email)
        .bind(account.first_name)
        .bind(account.last_name)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO profiles (account_id, bio) VALUES ($1, $2)")
            .bind(account_id)
            .bind(account.bio)
            .execute(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO auth_tokens (account_id, token) VALUES ($1, $2)")
            .bind(account_id)
            .bind(&token)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(token)
    }

    /// Verify credentials and return the account's token plus its profile id.
    /// The token is persistent: an existing one is reused, otherwise a fresh
    /// one is created.
    pub async fn login(&self, username: &str, password: &str) -> Result<Option<(String, Uuid)>> {
        let row = sqlx::query(
            "SELECT a.id AS account_id, a.password_hash, p.id AS profile_id \
             FROM accounts a \
             JOIN profiles p ON p.account_id = a.id \
             WHERE a.username = $1",
        )
        .bind(username)
        .fetch_optional(self.db.pool())
        .await?;

        let row = match row {
            Some(row) => row,
            None => return Ok(None),
        };

        let account_id: Uuid = row.get("account_id");
        let profile_id: Uuid = row.get("profile_id");
        let password_hash: String = row.get("password_hash");

        if !verify_password(password, &password_hash)? {
            return Ok(None);
        }

        let token = self.get_or_create_token(account_id).await?;
        Ok(Some((token, profile_id)))
    }

    pub async fn authenticate_token(&self, token: &str) -> Result<Option<AuthSession>> {
        let row = sqlx::query(
            "SELECT t.account_id, p.id AS profile_id \
             FROM auth_tokens t \
             JOIN profiles p ON p.account_id = t.account_id \
             WHERE t.token = $1",
        )
        .bind(token)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(|row| AuthSession {
            account_id: row.get("account_id"),
            profile_id: row.get("profile_id"),
        }))
    }

    async fn get_or_create_token(&self, account_id: Uuid) -> Result<String> {
        let existing: Option<String> =
            sqlx::query_scalar("SELECT token FROM auth_tokens WHERE account_id = $1")
                .bind(account_id)
                .fetch_optional(self.db.pool())
                .await?;

        if let Some(token) = existing {
            return Ok(token);
        }

        let token = generate_token();
        sqlx::query(
            "INSERT INTO auth_tokens (account_id, token) VALUES ($1, $2) \
             ON CONFLICT (account_id) DO NOTHING",
        )
        .bind(account_id)
        .bind(&token)
        .execute(self.db.pool())
        .await?;

        // A concurrent login may have won the insert race.
        let token: String = sqlx::query_scalar("SELECT token FROM auth_tokens WHERE account_id = $1")
            .bind(account_id)
            .fetch_one(self.db.pool())
            .await?;

        Ok(token)
    }
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut argon2::password_hash::rand_core::OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| anyhow!("failed to hash password: {}", err))?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|err| anyhow!("failed to parse password hash: {}", err))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// 20 random bytes, hex-encoded to a 40-character opaque token.
fn generate_token() -> String {
    let mut bytes = [0u8; 20];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
