//! Catch outcome computation.
//!
//! The harder a creature is to train (higher base experience), the lower
//! the chance of catching it.

use rand::Rng;

use crate::models::Pokemon;

/// Probability of a successful catch: `1 / (1 + base_experience / 100)`.
///
/// A missing base experience counts as zero, which always succeeds.
pub fn catch_chance(base_experience: Option<u32>) -> f64 {
    let experience = f64::from(base_experience.unwrap_or(0));
    1.0 / (1.0 + experience / 100.0)
}

/// Rolls one catch attempt against `pokemon` using `rng`.
///
/// Callers should keep a single RNG for the life of the process instead of
/// seeding one per attempt.
pub fn attempt_catch<R: Rng>(pokemon: &Pokemon, rng: &mut R) -> bool {
    rng.gen::<f64>() < catch_chance(pokemon.base_experience)
}
