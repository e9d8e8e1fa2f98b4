//! Tuning constants for a game.

use std::ops::RangeInclusive;

/// Every number that shapes a new game.
///
/// All ranges are inclusive. Exponent ranges are powers of ten.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Number of tiles on the board, including the start tile.
    pub board_tiles: RangeInclusive<usize>,
    /// Number of upgrades sold by the upgrade shop.
    pub shop_upgrades: RangeInclusive<usize>,
    /// Exponent of a new place's gold cost.
    pub place_cost_exp: RangeInclusive<u32>,
    /// Exponent of an upgrade's gold cost.
    pub upgrade_cost_exp: RangeInclusive<u32>,
    /// Gold and experience multiplier of an upgrade.
    pub upgrade_multiplier: RangeInclusive<u32>,
    /// Exponent of the gold and experience granted by a random reward.
    pub reward_exp: RangeInclusive<u32>,
    /// Gold granted each time a player passes the start tile.
    pub start_bonus: RangeInclusive<u64>,
    /// Exponent of a new player's gold.
    pub starting_gold_exp: u32,
    /// Exponent of the experience a new player needs for level 2.
    pub starting_required_exp: u32,
    /// Chance that the computer player says yes to any offer.
    pub ai_accept_probability: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_tiles: 500..=800,
            shop_upgrades: 10..=20,
            place_cost_exp: 5..=2000,
            upgrade_cost_exp: 10..=5120,
            upgrade_multiplier: 1..=2560,
            reward_exp: 1000..=100_000,
            start_bonus: 100_000..=500_000,
            starting_gold_exp: 6,
            starting_required_exp: 6,
            ai_accept_probability: 0.75,
        }
    }
}

impl GameConfig {
    /// Config with a custom board size range; everything else is default.
    ///
    /// A board always has at least one tile.
    #[must_use]
    pub fn with_board_tiles(min: usize, max: usize) -> Self {
        let min = min.max(1);
        Self {
            board_tiles: min..=max.max(min),
            ..Self::default()
        }
    }
}
