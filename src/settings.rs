//! Player preferences
//!
//! Persisted next to the high score. Currently just the difficulty
//! selection; anything unreadable falls back to the default.

use serde::{Deserialize, Serialize};

use crate::sim::Difficulty;
use crate::storage::KeyValueStore;

/// Storage key for preferences
pub const PREFS_KEY: &str = "glyph_hunt_prefs";

/// Persisted preferences
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Prefs {
    pub difficulty: Difficulty,
}

impl Prefs {
    /// Load preferences, defaulting on absent or malformed data
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get(PREFS_KEY) {
            Some(json) => match serde_json::from_str(&json) {
                Ok(prefs) => prefs,
                Err(err) => {
                    log::warn!("ignoring malformed prefs: {err}");
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    pub fn save(&self, store: &mut impl KeyValueStore) {
        if let Ok(json) = serde_json::to_string(self) {
            store.set(PREFS_KEY, &json);
        }
    }
}
