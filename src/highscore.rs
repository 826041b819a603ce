//! Persisted best score
//!
//! One integer under one fixed key. Absent or malformed stored values read
//! as 0, and only a strictly greater score is ever written back.

use crate::storage::KeyValueStore;

/// Storage key for the best score
pub const HIGH_SCORE_KEY: &str = "glyph_hunt_high_score";

/// Monotonically non-decreasing best score over a key-value store
#[derive(Debug)]
pub struct HighScore<S: KeyValueStore> {
    store: S,
    best: u32,
}

impl<S: KeyValueStore> HighScore<S> {
    /// Load the stored best, treating anything unparseable as 0
    pub fn load(store: S) -> Self {
        let best = store
            .get(HIGH_SCORE_KEY)
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(0);
        log::info!("loaded high score {best}");
        Self { store, best }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Offer a finished round's score. Persists and returns true only on a
    /// strict improvement.
    pub fn offer(&mut self, score: u32) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        self.store.set(HIGH_SCORE_KEY, &score.to_string());
        log::info!("new high score {score}");
        true
    }

    /// Access the underlying store (shared with other persisted values)
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
