//! Randomness seam for turn processing
//!
//! The engine asks for dice through `DiceRoller` so tests can script rolls
//! and assert that no roll happened at all.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of die rolls
pub trait DiceRoller {
    /// Roll one die with `sides` faces, returning 1..=sides
    fn roll(&mut self, sides: u8) -> u8;
}

/// Deterministic roller backed by ChaCha8
#[derive(Debug, Clone)]
pub struct SeededRoller {
    rng: ChaCha8Rng,
}

impl SeededRoller {
    pub fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }
}

impl DiceRoller for SeededRoller {
    fn roll(&mut self, sides: u8) -> u8 {
        self.rng.gen_range(1..=sides.max(1))
    }
}

impl<R: DiceRoller + ?Sized> DiceRoller for &mut R {
    fn roll(&mut self, sides: u8) -> u8 {
        (**self).roll(sides)
    }
}
