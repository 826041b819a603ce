//! Glyph Hunt - a spot-the-target browser minigame
//!
//! Core modules:
//! - `sim`: Deterministic round logic (generation, timer, scoring)
//! - `session`: Round state machine wired to its side-effect collaborators
//! - `storage`: Key-value persistence abstraction (LocalStorage on web)
//! - `highscore`: Single persisted best-score integer
//! - `notify`: Fire-and-forget transient messages
//! - `settings`: Persisted player preferences

pub mod highscore;
pub mod notify;
pub mod session;
pub mod settings;
pub mod sim;
pub mod storage;

pub use highscore::HighScore;
pub use session::Session;
pub use settings::Prefs;

/// Game configuration constants
pub mod consts {
    /// Round length in whole seconds
    pub const ROUND_DURATION_SECS: u32 = 60;

    /// Spawn bounds, in percent of the viewport. The strip above `Y_MIN`
    /// is reserved for the HUD.
    pub const X_MIN: f32 = 5.0;
    pub const X_MAX: f32 = 90.0;
    pub const Y_MIN: f32 = 15.0;
    pub const Y_MAX: f32 = 90.0;

    /// Hard caps on round population, regardless of tier and level
    pub const MAX_ENTITIES: usize = 80;
    pub const MAX_TARGETS: usize = 12;

    /// Extra entities added per level past the first
    pub const ENTITIES_PER_LEVEL: usize = 5;

    /// Points for finding a target, multiplied by the current level
    pub const TARGET_POINTS: u32 = 100;
    /// Points lost for clicking a decoy (score floors at 0)
    pub const MISS_PENALTY: u32 = 25;
    /// Bonus per second left on the clock when the last target is found
    pub const TIME_BONUS_PER_SEC: u32 = 10;

    /// The glyph every target wears
    pub const TARGET_GLYPH: char = '👾';
    /// Decoy glyphs, drawn uniformly at random (cosmetic only)
    pub const DECOY_GLYPHS: [char; 8] = ['🤖', '👻', '👽', '💀', '🎃', '😺', '🐸', '🦊'];
}
