//! Shared bot state passed to every handler through dptree

use rand::SeedableRng;
use rand::rngs::StdRng;
use sqlx::SqlitePool;
use std::sync::Arc;
use trackquiz_core::selector::TrackSelector;
use trackquiz_db::{PlayHistoryStore, TrackStore, UserStore};

/// Concrete selector wired to the SQLite stores.
pub type GameSelector = TrackSelector<TrackStore, PlayHistoryStore, StdRng>;

/// Handler dependencies, constructed once at startup.
#[derive(Clone)]
pub struct BotState {
    pub selector: Arc<GameSelector>,
    pub users: UserStore,
}

impl BotState {
    /// Build the stores and selector from a shared pool. The RNG is seeded
    /// from entropy here; tests construct the selector directly with a
    /// fixed seed.
    pub fn new(pool: SqlitePool) -> Self {
        let selector = TrackSelector::new(
            TrackStore::new(pool.clone()),
            PlayHistoryStore::new(pool.clone()),
            StdRng::from_entropy(),
        );

        Self {
            selector: Arc::new(selector),
            users: UserStore::new(pool),
        }
    }
}
