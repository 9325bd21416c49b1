//! Seedable random source used by every engine.
//!
//! Each engine owns exactly one generator. Passing the same seed twice
//! reproduces the same run step for step.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// The generator type owned by engines.
pub type SearchRng = StdRng;

/// Creates a generator from a fixed seed.
pub fn create_rng(seed: u64) -> SearchRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from an optional seed, drawing a fresh seed when `None`.
pub fn rng_from_seed(seed: Option<u64>) -> SearchRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}
