//! The six-sided die.

use rand::Rng;

/// A single six-sided die.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dice;

impl Dice {
    /// Number of faces.
    pub const FACES: u8 = 6;

    /// Roll the die, returning a value in `1..=6`.
    pub fn roll<R: Rng>(rng: &mut R) -> u8 {
        rng.gen_range(1..=Self::FACES)
    }
}
