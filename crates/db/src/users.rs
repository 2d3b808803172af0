//! User repository
//!
//! Keeps every user who ever talked to the bot, so admin broadcasts know
//! who to deliver to.

use chrono::Utc;
use sqlx::SqlitePool;
use trackquiz_core::error::GameResult;
use trackquiz_core::models::User;

/// User store handle
#[derive(Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert the user or refresh their username.
    pub async fn upsert(&self, user_id: i64, username: Option<&str>) -> GameResult<()> {
        sqlx::query(
            "INSERT INTO users (user_id, username, joined_at)
             VALUES (?, ?, ?)
             ON CONFLICT(user_id) DO UPDATE SET username = excluded.username",
        )
        .bind(user_id)
        .bind(username)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn all_ids(&self) -> GameResult<Vec<i64>> {
        let ids = sqlx::query_scalar("SELECT user_id FROM users ORDER BY user_id")
            .fetch_all(&self.pool)
            .await?;

        Ok(ids)
    }

    pub async fn get(&self, user_id: i64) -> GameResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT user_id, username, joined_at FROM users WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
