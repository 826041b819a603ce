//! Deterministic round logic
//!
//! All gameplay lives here. This module must be pure and deterministic:
//! - Explicit tick transitions only (no real timers)
//! - Seeded RNG only, injected by the caller
//! - No rendering or platform dependencies

pub mod spawn;
pub mod state;
pub mod tick;

pub use spawn::generate_round;
pub use state::{Difficulty, Entity, RoundPhase, RoundState};
pub use tick::{ClickOutcome, click, reset_round, start_round, tick};
