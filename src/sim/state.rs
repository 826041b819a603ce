//! Round state and core gameplay types

use serde::{Deserialize, Serialize};

use crate::consts::ROUND_DURATION_SECS;

/// Difficulty tiers, ordered easiest to hardest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "med" | "medium" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Entities placed at level 1 for this tier
    pub fn base_count(&self) -> usize {
        match self {
            Difficulty::Easy => 20,
            Difficulty::Normal => 30,
            Difficulty::Hard => 40,
        }
    }

    /// Targets hidden among them at level 1
    pub fn base_targets(&self) -> usize {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Normal => 4,
            Difficulty::Hard => 5,
        }
    }
}

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RoundPhase {
    /// No round running yet
    #[default]
    Idle,
    /// Round underway, timer counting down
    Active,
    /// Every target found with time to spare
    Won,
    /// Timer hit zero first
    Lost,
}

impl RoundPhase {
    /// Terminal for this round; only `start_round` or `reset_round` leave it
    pub fn is_over(&self) -> bool {
        matches!(self, RoundPhase::Won | RoundPhase::Lost)
    }
}

/// One placed glyph on the field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique within the round, allocated in generation order
    pub id: u32,
    /// Horizontal position, percent of viewport width
    pub x: f32,
    /// Vertical position, percent of viewport height
    pub y: f32,
    /// Whether this is one of the glyphs the player must find
    pub is_target: bool,
    /// Flipped to true exactly once, by a click on a target
    pub found: bool,
    /// Display glyph (cosmetic for decoys)
    pub glyph: char,
}

/// Complete per-session game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundState {
    pub difficulty: Difficulty,
    /// Current level, starting at 1; bumped when a round is won
    pub level: u32,
    /// Cumulative score; every deduction saturates at 0
    pub score: u32,
    /// Whole seconds left on the clock
    pub time_left: u32,
    pub phase: RoundPhase,
    /// Field contents; regenerated at round start, cleared on reset
    pub entities: Vec<Entity>,
}

impl RoundState {
    /// Fresh idle state at level 1
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            level: 1,
            score: 0,
            time_left: ROUND_DURATION_SECS,
            phase: RoundPhase::Idle,
            entities: Vec::new(),
        }
    }

    /// Targets still hiding on the field
    pub fn targets_remaining(&self) -> usize {
        self.entities
            .iter()
            .filter(|e| e.is_target && !e.found)
            .count()
    }

    /// Total targets placed this round
    pub fn target_count(&self) -> usize {
        self.entities.iter().filter(|e| e.is_target).count()
    }

    pub fn entity(&self, id: u32) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_idle_at_level_one() {
        let state = RoundState::new(Difficulty::Hard);
        assert_eq!(state.phase, RoundPhase::Idle);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.time_left, ROUND_DURATION_SECS);
        assert!(state.entities.is_empty());
        assert_eq!(state.difficulty, Difficulty::Hard);
    }

    #[test]
    fn difficulty_str_round_trip() {
        for d in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
        assert_eq!(Difficulty::from_str("nope"), None);
    }
}
