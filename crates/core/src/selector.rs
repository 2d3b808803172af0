//! Track selection with per-user play history
//!
//! Picks the next track for a user so that nothing repeats within a play
//! cycle, and starts a fresh cycle automatically once the user has seen the
//! whole active pool.

use crate::error::{GameError, GameResult};
use crate::models::Track;
use rand::Rng;
use std::collections::HashSet;
use tokio::sync::Mutex;

/// Read access to the active track pool.
pub trait TrackSource {
    fn list_active(&self) -> impl Future<Output = GameResult<Vec<Track>>> + Send;
}

/// Per-user record of which tracks were already served.
///
/// Calls for different users are independent. Calls for the same user are
/// serialized by the selector, not by the store.
pub trait PlayHistory {
    fn seen_ids(&self, user_id: i64) -> impl Future<Output = GameResult<HashSet<i64>>> + Send;
    fn record(&self, user_id: i64, track_id: i64) -> impl Future<Output = GameResult<()>> + Send;
    fn reset(&self, user_id: i64) -> impl Future<Output = GameResult<()>> + Send;
}

/// Chooses the next track for a user.
///
/// The random generator is injected so selection is deterministic under
/// test. The lock around it is held only across the draw itself, never
/// across a store call.
pub struct TrackSelector<S, H, R> {
    tracks: S,
    history: H,
    rng: Mutex<R>,
}

impl<S, H, R> TrackSelector<S, H, R>
where
    S: TrackSource,
    H: PlayHistory,
    R: Rng,
{
    pub fn new(tracks: S, history: H, rng: R) -> Self {
        Self {
            tracks,
            history,
            rng: Mutex::new(rng),
        }
    }

    /// Select the next track for `user_id`.
    ///
    /// Candidates are the active tracks the user has not seen this cycle.
    /// When that set is empty the user has exhausted the pool: history is
    /// reset and every active track becomes eligible again, including the
    /// one served last. This is the automatic counterpart of the explicit
    /// [`start_over`](Self::start_over).
    ///
    /// The active pool and the seen set are two independent snapshots; a
    /// track deactivated between the two reads may be served once more.
    /// No cross-store transaction is taken.
    ///
    /// # Errors
    ///
    /// [`GameError::NoTracksAvailable`] when the active pool is empty
    /// (nothing is recorded in that case); store errors propagate unchanged.
    pub async fn select_next(&self, user_id: i64) -> GameResult<Track> {
        let active = self.tracks.list_active().await?;
        if active.is_empty() {
            return Err(GameError::NoTracksAvailable);
        }

        let seen = self.history.seen_ids(user_id).await?;

        let mut candidates: Vec<&Track> =
            active.iter().filter(|t| !seen.contains(&t.id)).collect();

        if candidates.is_empty() {
            // Pool exhausted for this user: new play cycle.
            self.history.reset(user_id).await?;
            candidates = active.iter().collect();
        }

        let idx = {
            let mut rng = self.rng.lock().await;
            rng.gen_range(0..candidates.len())
        };
        let chosen = candidates[idx].clone();

        self.history.record(user_id, chosen.id).await?;

        Ok(chosen)
    }

    /// Explicit user-initiated "start over": wipe the play history so the
    /// next selection draws from the full active pool.
    pub async fn start_over(&self, user_id: i64) -> GameResult<()> {
        self.history.reset(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;
    use std::sync::Mutex as StdMutex;

    fn track(id: i64) -> Track {
        Track {
            id,
            artist: format!("Artist {id}"),
            title: format!("Title {id}"),
            points: 1,
            hint: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    struct MemTracks(Vec<Track>);

    impl TrackSource for MemTracks {
        async fn list_active(&self) -> GameResult<Vec<Track>> {
            Ok(self.0.clone())
        }
    }

    #[derive(Default)]
    struct MemHistory(StdMutex<HashMap<i64, HashSet<i64>>>);

    impl MemHistory {
        fn with_seen(user_id: i64, ids: &[i64]) -> Self {
            let history = Self::default();
            history
                .0
                .lock()
                .unwrap()
                .insert(user_id, ids.iter().copied().collect());
            history
        }

        fn seen(&self, user_id: i64) -> HashSet<i64> {
            self.0
                .lock()
                .unwrap()
                .get(&user_id)
                .cloned()
                .unwrap_or_default()
        }
    }

    impl PlayHistory for &MemHistory {
        async fn seen_ids(&self, user_id: i64) -> GameResult<HashSet<i64>> {
            Ok(self.seen(user_id))
        }

        async fn record(&self, user_id: i64, track_id: i64) -> GameResult<()> {
            self.0
                .lock()
                .unwrap()
                .entry(user_id)
                .or_default()
                .insert(track_id);
            Ok(())
        }

        async fn reset(&self, user_id: i64) -> GameResult<()> {
            self.0.lock().unwrap().remove(&user_id);
            Ok(())
        }
    }

    fn selector<'a>(
        tracks: Vec<Track>,
        history: &'a MemHistory,
        seed: u64,
    ) -> TrackSelector<MemTracks, &'a MemHistory, StdRng> {
        TrackSelector::new(MemTracks(tracks), history, StdRng::seed_from_u64(seed))
    }

    #[tokio::test]
    async fn never_returns_a_seen_track() {
        let user = 7;
        let pool: Vec<Track> = (1..=5).map(track).collect();

        // Over many seeds, with seen a strict subset, the chosen track is
        // always outside it.
        for seed in 0..50 {
            let history = MemHistory::with_seen(user, &[1, 2, 3]);
            let sel = selector(pool.clone(), &history, seed);

            let chosen = sel.select_next(user).await.unwrap();
            assert!(
                chosen.id == 4 || chosen.id == 5,
                "seed {seed} picked already-seen track {}",
                chosen.id
            );
        }
    }

    #[tokio::test]
    async fn fresh_user_gets_any_track_and_it_is_recorded() {
        let user = 1;
        let history = MemHistory::default();
        let sel = selector((1..=3).map(track).collect(), &history, 42);

        let chosen = sel.select_next(user).await.unwrap();
        assert!((1..=3).contains(&chosen.id));
        assert_eq!(history.seen(user), HashSet::from([chosen.id]));
    }

    #[tokio::test]
    async fn exhaustion_starts_a_new_cycle() {
        let user = 2;
        let history = MemHistory::with_seen(user, &[1, 2]);
        let sel = selector(vec![track(1), track(2)], &history, 3);

        let chosen = sel.select_next(user).await.unwrap();
        assert!(chosen.id == 1 || chosen.id == 2);

        // History was reset; only the fresh selection remains.
        assert_eq!(history.seen(user), HashSet::from([chosen.id]));
    }

    #[tokio::test]
    async fn empty_pool_fails_and_records_nothing() {
        let user = 3;
        let history = MemHistory::with_seen(user, &[9]);
        let sel = selector(Vec::new(), &history, 0);

        let err = sel.select_next(user).await.unwrap_err();
        assert!(matches!(err, GameError::NoTracksAvailable));

        // Seen set untouched.
        assert_eq!(history.seen(user), HashSet::from([9]));
    }

    #[tokio::test]
    async fn full_cycle_covers_every_track_without_repeats() {
        let user = 4;
        let history = MemHistory::default();
        let pool: Vec<Track> = (1..=10).map(track).collect();
        let sel = selector(pool, &history, 1234);

        let mut served = HashSet::new();
        for _ in 0..10 {
            let chosen = sel.select_next(user).await.unwrap();
            assert!(served.insert(chosen.id), "repeat within a cycle");
        }
        assert_eq!(served.len(), 10);
    }

    #[tokio::test]
    async fn deterministic_under_a_fixed_seed() {
        let user = 5;
        let pool: Vec<Track> = (1..=20).map(track).collect();

        let history_a = MemHistory::default();
        let history_b = MemHistory::default();
        let sel_a = selector(pool.clone(), &history_a, 77);
        let sel_b = selector(pool, &history_b, 77);

        for _ in 0..5 {
            let a = sel_a.select_next(user).await.unwrap();
            let b = sel_b.select_next(user).await.unwrap();
            assert_eq!(a.id, b.id);
        }
    }

    #[tokio::test]
    async fn start_over_is_idempotent() {
        let user = 6;
        let history = MemHistory::with_seen(user, &[1, 2]);
        let sel = selector(vec![track(1)], &history, 0);

        sel.start_over(user).await.unwrap();
        assert!(history.seen(user).is_empty());

        sel.start_over(user).await.unwrap();
        assert!(history.seen(user).is_empty());
    }

    #[tokio::test]
    async fn stale_history_ids_are_ignored() {
        let user = 8;
        // User has seen track 99 which no longer exists; it must not make
        // the candidate computation think the pool is exhausted early.
        let history = MemHistory::with_seen(user, &[99]);
        let sel = selector(vec![track(1), track(2)], &history, 11);

        let chosen = sel.select_next(user).await.unwrap();
        assert!(chosen.id == 1 || chosen.id == 2);
    }
}
