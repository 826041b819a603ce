//! Session: the round state machine plus its collaborators
//!
//! The sim stays pure; everything with a side effect (best-score
//! persistence, toasts, preference saves) happens here, so a headless test
//! can drive a whole game with an in-memory store and a recording
//! notifier.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::highscore::HighScore;
use crate::notify::{Notifier, Severity};
use crate::settings::Prefs;
use crate::sim::{self, ClickOutcome, Difficulty, RoundPhase, RoundState};
use crate::storage::KeyValueStore;

pub struct Session<S: KeyValueStore, N: Notifier> {
    round: RoundState,
    rng: Pcg32,
    scores: HighScore<S>,
    notifier: N,
}

impl<S: KeyValueStore, N: Notifier> Session<S, N> {
    /// Build a session: difficulty preference and best score come from the
    /// store, the RNG from the caller's seed.
    pub fn new(seed: u64, store: S, notifier: N) -> Self {
        let prefs = Prefs::load(&store);
        let scores = HighScore::load(store);
        log::info!(
            "session start: seed {seed}, difficulty {}",
            prefs.difficulty.as_str()
        );
        Self {
            round: RoundState::new(prefs.difficulty),
            rng: Pcg32::seed_from_u64(seed),
            scores,
            notifier,
        }
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn best(&self) -> u32 {
        self.scores.best()
    }

    /// Select a tier. Takes effect when the next round is generated and is
    /// persisted as a preference.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.round.difficulty = difficulty;
        Prefs { difficulty }.save(self.scores.store_mut());
    }

    /// Start a round (initial start, next level, or retry)
    pub fn start(&mut self) {
        sim::start_round(&mut self.round, &mut self.rng);
        self.notifier.show(
            &format!("Level {}", self.round.level),
            &format!("Find {} hidden {}!", self.round.target_count(), crate::consts::TARGET_GLYPH),
            Severity::Normal,
        );
    }

    /// Back to idle; only the difficulty choice survives
    pub fn reset(&mut self) {
        sim::reset_round(&mut self.round);
    }

    /// One second elapsed. Returns the resulting phase so the driver can
    /// cancel its interval as soon as the round leaves Active.
    pub fn tick(&mut self) -> RoundPhase {
        let was_active = self.round.phase == RoundPhase::Active;
        sim::tick(&mut self.round);
        if was_active && self.round.phase == RoundPhase::Lost {
            let improved = self.scores.offer(self.round.score);
            self.notifier.show(
                "Time's up!",
                &self.final_message(improved),
                Severity::Destructive,
            );
        }
        self.round.phase
    }

    /// A click landed on entity `id`
    pub fn click(&mut self, id: u32) -> ClickOutcome {
        let outcome = sim::click(&mut self.round, id);
        match outcome {
            ClickOutcome::Miss => {
                self.notifier.show(
                    "Wrong glyph!",
                    &format!("-{} points", crate::consts::MISS_PENALTY),
                    Severity::Destructive,
                );
            }
            ClickOutcome::Cleared => {
                let improved = self.scores.offer(self.round.score);
                self.notifier.show(
                    &format!("Level {} cleared!", self.round.level - 1),
                    &self.final_message(improved),
                    Severity::Normal,
                );
            }
            ClickOutcome::TargetFound | ClickOutcome::Ignored => {}
        }
        outcome
    }

    fn final_message(&self, new_best: bool) -> String {
        if new_best {
            format!("Score {} - new best!", self.round.score)
        } else {
            format!("Score {} (best {})", self.round.score, self.scores.best())
        }
    }
}
