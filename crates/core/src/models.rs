//! Core domain models for trackquiz
//!
//! These models represent the core business entities and map to database tables.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A song in the quiz pool.
///
/// Inactive tracks are excluded from selection but kept for history/audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[derive(sqlx::FromRow)]
pub struct Track {
    pub id: i64,
    pub artist: String,
    pub title: String,
    pub points: i64,
    pub hint: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields for creating a new track. The id is assigned by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTrack {
    pub artist: String,
    pub title: String,
    pub points: i64,
    pub hint: Option<String>,
}

/// Fields for updating an existing track.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackUpdate {
    pub artist: String,
    pub title: String,
    pub points: i64,
    pub hint: Option<String>,
    pub is_active: bool,
}

/// One "this track was shown to this user" record.
///
/// Weak reference: the track may be deactivated or deleted independently,
/// in which case stale records are simply ignored by the selector.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[derive(sqlx::FromRow)]
pub struct PlayRecord {
    pub user_id: i64,
    pub track_id: i64,
    pub shown_at: DateTime<Utc>,
}

/// Bot user, kept for broadcast delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[derive(sqlx::FromRow)]
pub struct User {
    pub user_id: i64,
    pub username: Option<String>,
    pub joined_at: DateTime<Utc>,
}

/// Admin broadcast message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[derive(sqlx::FromRow)]
pub struct Broadcast {
    pub id: i64,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub sent_at: Option<DateTime<Utc>>,
}
