//! Round state machine transitions
//!
//! Everything here is an explicit transition on `RoundState`. The
//! once-per-second tick is an external event fed in by the driver, so
//! time-based behavior is fully testable without a real timer.

use rand::Rng;

use crate::consts::*;
use crate::sim::spawn::generate_round;
use crate::sim::state::{RoundPhase, RoundState};

/// What a click did to the round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Round not active, unknown id, or entity already found
    Ignored,
    /// Clicked a decoy; penalty applied
    Miss,
    /// Found a target, more remain
    TargetFound,
    /// Found the last target; round is won
    Cleared,
}

/// Begin a round: Idle/Won/Lost -> Active.
///
/// Resets the clock and generates a fresh field for the current level.
/// Cumulative score carries over; `reset_round` is the only way back to 0.
pub fn start_round<R: Rng + ?Sized>(state: &mut RoundState, rng: &mut R) {
    if state.phase == RoundPhase::Active {
        return;
    }
    state.time_left = ROUND_DURATION_SECS;
    state.entities = generate_round(state.difficulty, state.level, rng);
    state.phase = RoundPhase::Active;
    log::info!(
        "round started: level {} ({}), {} entities / {} targets",
        state.level,
        state.difficulty.as_str(),
        state.entities.len(),
        state.target_count(),
    );
}

/// Return to Idle from any phase, keeping only the difficulty choice.
pub fn reset_round(state: &mut RoundState) {
    state.entities.clear();
    state.score = 0;
    state.level = 1;
    state.time_left = ROUND_DURATION_SECS;
    state.phase = RoundPhase::Idle;
}

/// Advance the clock by one second. No-op outside Active, so a terminal
/// phase can never see the timer move again.
pub fn tick(state: &mut RoundState) {
    if state.phase != RoundPhase::Active {
        return;
    }
    state.time_left = state.time_left.saturating_sub(1);
    if state.time_left == 0 {
        state.phase = RoundPhase::Lost;
        log::info!("time up at level {} with score {}", state.level, state.score);
    }
}

/// Apply a click on entity `id`.
///
/// Targets are marked found and score `TARGET_POINTS * level`; finding the
/// last one wins the round, banks the time bonus and bumps the level for
/// the next round. Decoys cost `MISS_PENALTY` (floored at 0) and remain
/// clickable. Anything else is a no-op.
pub fn click(state: &mut RoundState, id: u32) -> ClickOutcome {
    if state.phase != RoundPhase::Active {
        return ClickOutcome::Ignored;
    }
    let Some(entity) = state.entities.iter_mut().find(|e| e.id == id) else {
        return ClickOutcome::Ignored;
    };
    if entity.found {
        return ClickOutcome::Ignored;
    }

    if !entity.is_target {
        state.score = state.score.saturating_sub(MISS_PENALTY);
        return ClickOutcome::Miss;
    }

    entity.found = true;
    state.score += TARGET_POINTS * state.level;

    // `found` only ever flips here, so this is the one place the win
    // condition can become true.
    if state.targets_remaining() == 0 {
        state.score += TIME_BONUS_PER_SEC * state.time_left;
        state.phase = RoundPhase::Won;
        state.level += 1;
        log::info!(
            "level cleared with {}s left, score {}",
            state.time_left,
            state.score
        );
        return ClickOutcome::Cleared;
    }
    ClickOutcome::TargetFound
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Difficulty;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn active_state(difficulty: Difficulty) -> RoundState {
        let mut state = RoundState::new(difficulty);
        let mut rng = Pcg32::seed_from_u64(42);
        start_round(&mut state, &mut rng);
        state
    }

    fn target_ids(state: &RoundState) -> Vec<u32> {
        state
            .entities
            .iter()
            .filter(|e| e.is_target)
            .map(|e| e.id)
            .collect()
    }

    fn decoy_id(state: &RoundState) -> u32 {
        state.entities.iter().find(|e| !e.is_target).unwrap().id
    }

    #[test]
    fn start_round_activates_and_populates() {
        let state = active_state(Difficulty::Easy);
        assert_eq!(state.phase, RoundPhase::Active);
        assert_eq!(state.time_left, ROUND_DURATION_SECS);
        assert_eq!(state.entities.len(), 20);
        assert_eq!(state.target_count(), 3);
    }

    #[test]
    fn start_round_is_noop_while_active() {
        let mut state = active_state(Difficulty::Easy);
        let before = state.entities.clone();
        tick(&mut state);
        let mut rng = Pcg32::seed_from_u64(1);
        start_round(&mut state, &mut rng);
        assert_eq!(state.entities, before);
        assert_eq!(state.time_left, ROUND_DURATION_SECS - 1);
    }

    #[test]
    fn tick_counts_down_and_loses_at_zero() {
        let mut state = active_state(Difficulty::Normal);
        for _ in 0..ROUND_DURATION_SECS - 1 {
            tick(&mut state);
            assert_eq!(state.phase, RoundPhase::Active);
        }
        tick(&mut state);
        assert_eq!(state.phase, RoundPhase::Lost);
        assert_eq!(state.time_left, 0);
    }

    #[test]
    fn lost_round_is_frozen() {
        let mut state = active_state(Difficulty::Easy);
        for _ in 0..ROUND_DURATION_SECS {
            tick(&mut state);
        }
        assert_eq!(state.phase, RoundPhase::Lost);
        let score = state.score;

        tick(&mut state);
        assert_eq!(state.time_left, 0);
        let id = target_ids(&state)[0];
        assert_eq!(click(&mut state, id), ClickOutcome::Ignored);
        assert_eq!(state.score, score);
    }

    #[test]
    fn clicking_targets_scores_by_level() {
        let mut state = active_state(Difficulty::Easy);
        let ids = target_ids(&state);
        assert_eq!(click(&mut state, ids[0]), ClickOutcome::TargetFound);
        assert_eq!(state.score, 100);
        assert!(state.entity(ids[0]).unwrap().found);
    }

    #[test]
    fn clicking_found_target_again_is_ignored() {
        let mut state = active_state(Difficulty::Easy);
        let id = target_ids(&state)[0];
        click(&mut state, id);
        let score = state.score;
        assert_eq!(click(&mut state, id), ClickOutcome::Ignored);
        assert_eq!(state.score, score);
    }

    #[test]
    fn unknown_id_is_ignored() {
        let mut state = active_state(Difficulty::Easy);
        assert_eq!(click(&mut state, 9999), ClickOutcome::Ignored);
    }

    #[test]
    fn decoy_click_penalizes_and_floors_at_zero() {
        let mut state = active_state(Difficulty::Easy);
        let id = decoy_id(&state);
        assert_eq!(state.score, 0);
        assert_eq!(click(&mut state, id), ClickOutcome::Miss);
        assert_eq!(state.score, 0);
        // decoy stays clickable
        assert!(!state.entity(id).unwrap().found);
        assert_eq!(click(&mut state, id), ClickOutcome::Miss);

        state.score = 30;
        click(&mut state, id);
        assert_eq!(state.score, 5);
        click(&mut state, id);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn finding_all_targets_wins_with_time_bonus() {
        // The worked scenario: easy tier, level 1, last target found with
        // 45 seconds left -> 3*100*1 + 45*10 = 750
        let mut state = active_state(Difficulty::Easy);
        for _ in 0..15 {
            tick(&mut state);
        }
        assert_eq!(state.time_left, 45);

        let ids = target_ids(&state);
        assert_eq!(click(&mut state, ids[0]), ClickOutcome::TargetFound);
        assert_eq!(click(&mut state, ids[1]), ClickOutcome::TargetFound);
        assert_eq!(click(&mut state, ids[2]), ClickOutcome::Cleared);

        assert_eq!(state.phase, RoundPhase::Won);
        assert_eq!(state.score, 750);
        assert_eq!(state.time_left, 45);
        assert_eq!(state.level, 2);

        // timer frozen after the win
        tick(&mut state);
        assert_eq!(state.time_left, 45);
    }

    #[test]
    fn win_order_does_not_matter() {
        let mut state = active_state(Difficulty::Easy);
        let mut ids = target_ids(&state);
        ids.reverse();
        let (last, rest) = ids.split_last().unwrap();
        for id in rest {
            assert_eq!(click(&mut state, *id), ClickOutcome::TargetFound);
        }
        assert_eq!(click(&mut state, *last), ClickOutcome::Cleared);
        assert_eq!(state.phase, RoundPhase::Won);
    }

    #[test]
    fn next_round_after_win_plays_harder_level() {
        let mut state = active_state(Difficulty::Easy);
        for id in target_ids(&state) {
            click(&mut state, id);
        }
        assert_eq!(state.level, 2);
        let score = state.score;

        let mut rng = Pcg32::seed_from_u64(5);
        start_round(&mut state, &mut rng);
        assert_eq!(state.phase, RoundPhase::Active);
        assert_eq!(state.entities.len(), 25);
        assert_eq!(state.score, score, "cumulative score carries over");
    }

    #[test]
    fn retry_after_loss_keeps_level() {
        let mut state = active_state(Difficulty::Normal);
        for _ in 0..ROUND_DURATION_SECS {
            tick(&mut state);
        }
        assert_eq!(state.phase, RoundPhase::Lost);
        assert_eq!(state.level, 1);

        let mut rng = Pcg32::seed_from_u64(5);
        start_round(&mut state, &mut rng);
        assert_eq!(state.level, 1);
        assert_eq!(state.entities.len(), 30);
    }

    #[test]
    fn reset_clears_everything_but_difficulty() {
        let mut state = active_state(Difficulty::Hard);
        let target = target_ids(&state)[0];
        click(&mut state, target);
        tick(&mut state);

        reset_round(&mut state);
        assert_eq!(state.phase, RoundPhase::Idle);
        assert!(state.entities.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.time_left, ROUND_DURATION_SECS);
        assert_eq!(state.difficulty, Difficulty::Hard);
    }
}
