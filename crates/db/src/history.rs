//! Play history repository
//!
//! Tracks which songs have been served to which user since their last
//! reset. Recording is idempotent; concurrent calls for different users
//! are independent.

use chrono::Utc;
use sqlx::SqlitePool;
use std::collections::HashSet;
use trackquiz_core::error::GameResult;
use trackquiz_core::selector::PlayHistory;

/// Play history store handle
#[derive(Clone)]
pub struct PlayHistoryStore {
    pool: SqlitePool,
}

impl PlayHistoryStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Track ids served to this user during the current play cycle.
    pub async fn seen_ids(&self, user_id: i64) -> GameResult<HashSet<i64>> {
        let ids: Vec<i64> =
            sqlx::query_scalar("SELECT track_id FROM play_history WHERE user_id = ?")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(ids.into_iter().collect())
    }

    pub async fn record(&self, user_id: i64, track_id: i64) -> GameResult<()> {
        sqlx::query(
            "INSERT OR IGNORE INTO play_history (user_id, track_id, shown_at)
             VALUES (?, ?, ?)",
        )
        .bind(user_id)
        .bind(track_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Wipe the user's play cycle. A no-op for users with no history.
    pub async fn reset(&self, user_id: i64) -> GameResult<()> {
        sqlx::query("DELETE FROM play_history WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

impl PlayHistory for PlayHistoryStore {
    async fn seen_ids(&self, user_id: i64) -> GameResult<HashSet<i64>> {
        Self::seen_ids(self, user_id).await
    }

    async fn record(&self, user_id: i64, track_id: i64) -> GameResult<()> {
        Self::record(self, user_id, track_id).await
    }

    async fn reset(&self, user_id: i64) -> GameResult<()> {
        Self::reset(self, user_id).await
    }
}
