//! Round generation
//!
//! Produces the entity set for a level. Takes the RNG by argument so a
//! seeded generator reproduces the exact same field in tests.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::consts::*;
use crate::sim::state::{Difficulty, Entity};

/// Total entities placed for a tier/level
pub fn entity_count(difficulty: Difficulty, level: u32) -> usize {
    let level_ups = level.saturating_sub(1) as usize;
    (difficulty.base_count() + ENTITIES_PER_LEVEL * level_ups).min(MAX_ENTITIES)
}

/// How many of them are targets
pub fn target_count(difficulty: Difficulty, level: u32) -> usize {
    let level_ups = level.saturating_sub(1) as usize;
    (difficulty.base_targets() + level_ups / 2).min(MAX_TARGETS)
}

/// Generate the field for one round.
///
/// Positions are drawn independently and uniformly inside the spawn
/// bounds; overlap between entities is allowed. Targets all wear
/// `TARGET_GLYPH`, decoys draw from `DECOY_GLYPHS`.
pub fn generate_round<R: Rng + ?Sized>(
    difficulty: Difficulty,
    level: u32,
    rng: &mut R,
) -> Vec<Entity> {
    let total = entity_count(difficulty, level);
    let targets = target_count(difficulty, level);

    let mut entities = Vec::with_capacity(total);
    for id in 0..total as u32 {
        let is_target = (id as usize) < targets;
        let glyph = if is_target {
            TARGET_GLYPH
        } else {
            *DECOY_GLYPHS.choose(rng).unwrap_or(&TARGET_GLYPH)
        };
        entities.push(Entity {
            id,
            x: rng.random_range(X_MIN..=X_MAX),
            y: rng.random_range(Y_MIN..=Y_MAX),
            is_target,
            found: false,
            glyph,
        });
    }
    entities
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn easy_level_one_field() {
        let mut rng = Pcg32::seed_from_u64(7);
        let field = generate_round(Difficulty::Easy, 1, &mut rng);
        assert_eq!(field.len(), 20);
        assert_eq!(field.iter().filter(|e| e.is_target).count(), 3);
    }

    #[test]
    fn targets_share_glyph_and_start_unfound() {
        let mut rng = Pcg32::seed_from_u64(7);
        let field = generate_round(Difficulty::Normal, 4, &mut rng);
        for e in &field {
            assert!(!e.found);
            if e.is_target {
                assert_eq!(e.glyph, TARGET_GLYPH);
            } else {
                assert!(DECOY_GLYPHS.contains(&e.glyph));
            }
        }
    }

    #[test]
    fn same_seed_same_field() {
        let mut a = Pcg32::seed_from_u64(99);
        let mut b = Pcg32::seed_from_u64(99);
        assert_eq!(
            generate_round(Difficulty::Hard, 3, &mut a),
            generate_round(Difficulty::Hard, 3, &mut b)
        );
    }

    #[test]
    fn counts_cap_at_high_levels() {
        // Hard tier hits both caps well before level 50
        assert_eq!(entity_count(Difficulty::Hard, 50), MAX_ENTITIES);
        assert_eq!(target_count(Difficulty::Hard, 50), MAX_TARGETS);
    }

    #[test]
    fn ids_are_unique() {
        let mut rng = Pcg32::seed_from_u64(3);
        let field = generate_round(Difficulty::Hard, 9, &mut rng);
        let mut ids: Vec<u32> = field.iter().map(|e| e.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), field.len());
    }

    proptest! {
        #[test]
        fn counts_and_bounds_hold(tier in 0..3usize, level in 1u32..200, seed in any::<u64>()) {
            let difficulty = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard][tier];
            let mut rng = Pcg32::seed_from_u64(seed);
            let field = generate_round(difficulty, level, &mut rng);

            let targets = field.iter().filter(|e| e.is_target).count();
            prop_assert!(field.len() <= MAX_ENTITIES);
            prop_assert!(targets <= MAX_TARGETS);
            prop_assert!(targets <= field.len());
            for e in &field {
                prop_assert!((X_MIN..=X_MAX).contains(&e.x));
                prop_assert!((Y_MIN..=Y_MAX).contains(&e.y));
            }
        }
    }
}
