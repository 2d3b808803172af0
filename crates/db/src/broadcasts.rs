//! Broadcast repository

use chrono::Utc;
use sqlx::SqlitePool;
use trackquiz_core::error::{GameError, GameResult};
use trackquiz_core::models::Broadcast;

/// Broadcast store handle
#[derive(Clone)]
pub struct BroadcastStore {
    pool: SqlitePool,
}

impl BroadcastStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, body: &str) -> GameResult<Broadcast> {
        let body = body.trim();
        if body.is_empty() {
            return Err(GameError::Validation(
                "broadcast text must not be empty".to_string(),
            ));
        }

        let broadcast = sqlx::query_as::<_, Broadcast>(
            "INSERT INTO broadcasts (body, created_at) VALUES (?, ?)
             RETURNING id, body, created_at, sent_at",
        )
        .bind(body)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(broadcast)
    }

    pub async fn mark_sent(&self, id: i64) -> GameResult<()> {
        sqlx::query("UPDATE broadcasts SET sent_at = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Newest first, sent or not.
    pub async fn list(&self) -> GameResult<Vec<Broadcast>> {
        let broadcasts = sqlx::query_as::<_, Broadcast>(
            "SELECT id, body, created_at, sent_at
             FROM broadcasts ORDER BY COALESCE(sent_at, created_at) DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(broadcasts)
    }
}
