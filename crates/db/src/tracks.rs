//! Track repository
//!
//! CRUD over the quiz track pool. Deletion follows the lifecycle rule: a
//! track referenced by play history is soft-deactivated instead of removed,
//! so the history it appears in stays meaningful.

use chrono::Utc;
use sqlx::SqlitePool;
use trackquiz_core::error::{GameError, GameResult};
use trackquiz_core::models::{NewTrack, Track, TrackUpdate};
use trackquiz_core::selector::TrackSource;

/// Track store handle
#[derive(Clone)]
pub struct TrackStore {
    pool: SqlitePool,
}

impl TrackStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Tracks currently eligible for selection.
    pub async fn list_active(&self) -> GameResult<Vec<Track>> {
        let tracks = sqlx::query_as::<_, Track>(
            "SELECT id, artist, title, points, hint, is_active, created_at
             FROM tracks WHERE is_active = 1 ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tracks)
    }

    /// Every track, newest first, for the admin listing.
    pub async fn list_all(&self) -> GameResult<Vec<Track>> {
        let tracks = sqlx::query_as::<_, Track>(
            "SELECT id, artist, title, points, hint, is_active, created_at
             FROM tracks ORDER BY id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tracks)
    }

    pub async fn get(&self, id: i64) -> GameResult<Track> {
        sqlx::query_as::<_, Track>(
            "SELECT id, artist, title, points, hint, is_active, created_at
             FROM tracks WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(GameError::TrackNotFound(id))
    }

    /// Create a track. New tracks start active.
    pub async fn create(&self, new: NewTrack) -> GameResult<Track> {
        let artist = new.artist.trim();
        let title = new.title.trim();
        validate(artist, title, new.points)?;

        let track = sqlx::query_as::<_, Track>(
            "INSERT INTO tracks (artist, title, points, hint, is_active, created_at)
             VALUES (?, ?, ?, ?, 1, ?)
             RETURNING id, artist, title, points, hint, is_active, created_at",
        )
        .bind(artist)
        .bind(title)
        .bind(new.points)
        .bind(normalize_hint(new.hint))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("Track {} created: {} - {}", track.id, track.artist, track.title);

        Ok(track)
    }

    pub async fn update(&self, id: i64, update: TrackUpdate) -> GameResult<Track> {
        let artist = update.artist.trim();
        let title = update.title.trim();
        validate(artist, title, update.points)?;

        sqlx::query_as::<_, Track>(
            "UPDATE tracks SET artist = ?, title = ?, points = ?, hint = ?, is_active = ?
             WHERE id = ?
             RETURNING id, artist, title, points, hint, is_active, created_at",
        )
        .bind(artist)
        .bind(title)
        .bind(update.points)
        .bind(normalize_hint(update.hint))
        .bind(update.is_active)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(GameError::TrackNotFound(id))
    }

    /// Soft-deactivate: the track stays for history/audit but is excluded
    /// from selection.
    pub async fn deactivate(&self, id: i64) -> GameResult<()> {
        let result = sqlx::query("UPDATE tracks SET is_active = 0 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(GameError::TrackNotFound(id));
        }

        Ok(())
    }

    /// Delete a track, or deactivate it when play history still references
    /// it. Returns true when the row was physically removed.
    pub async fn delete(&self, id: i64) -> GameResult<bool> {
        // Existence check first so an absent id is NotFound, not a no-op.
        self.get(id).await?;

        let referenced: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM play_history WHERE track_id = ?)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        if referenced {
            self.deactivate(id).await?;
            tracing::info!("Track {id} is referenced by play history, deactivated instead");
            return Ok(false);
        }

        sqlx::query("DELETE FROM tracks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::info!("Track {id} deleted");

        Ok(true)
    }
}

impl TrackSource for TrackStore {
    async fn list_active(&self) -> GameResult<Vec<Track>> {
        // Inherent method takes precedence over the trait method here.
        Self::list_active(self).await
    }
}

fn validate(artist: &str, title: &str, points: i64) -> GameResult<()> {
    if artist.is_empty() {
        return Err(GameError::Validation("artist must not be empty".to_string()));
    }
    if title.is_empty() {
        return Err(GameError::Validation("title must not be empty".to_string()));
    }
    if points < 0 {
        return Err(GameError::Validation("points must not be negative".to_string()));
    }
    Ok(())
}

fn normalize_hint(hint: Option<String>) -> Option<String> {
    hint.map(|h| h.trim().to_string()).filter(|h| !h.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_blank_fields() {
        assert!(matches!(validate("", "Song", 1), Err(GameError::Validation(_))));
        assert!(matches!(validate("Artist", "", 1), Err(GameError::Validation(_))));
        assert!(matches!(validate("Artist", "Song", -1), Err(GameError::Validation(_))));
        assert!(validate("Artist", "Song", 0).is_ok());
    }

    #[test]
    fn test_normalize_hint_drops_blank() {
        assert_eq!(normalize_hint(None), None);
        assert_eq!(normalize_hint(Some("  ".to_string())), None);
        assert_eq!(
            normalize_hint(Some(" from 1984 ".to_string())),
            Some("from 1984".to_string())
        );
    }
}
