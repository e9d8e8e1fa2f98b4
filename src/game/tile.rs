//! Board tiles.

use serde::{Deserialize, Serialize};

use crate::game::{Amount, Seat, triangular};

/// Kinds of place a place tile can describe.
pub const PLACE_KINDS: [&str; 11] = [
    "jungle",
    "mountain",
    "pirate cove",
    "lake",
    "forest",
    "desert",
    "harbor",
    "sea",
    "castle",
    "island",
    "beach",
];

/// A purchasable tile that yields gold and experience every turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    /// Display name, usually generated by the language model.
    pub name: String,
    /// Short description such as "A harbor".
    pub description: String,
    /// Current level, starting at 1.
    pub level: u32,
    /// Gold needed to buy, upgrade or acquire this place.
    pub gold_cost: Amount,
    /// Gold the owner earns per turn.
    pub gold_per_turn: Amount,
    /// Experience the owner earns per turn.
    pub exp_per_turn: Amount,
    /// Seat owning this place, if any.
    pub owner: Option<Seat>,
}

impl Place {
    /// Create an unowned level 1 place.
    ///
    /// Yields are derived from the cost: gold per turn is `cost / 10^3` and
    /// experience per turn is `cost / 10^5`.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: &str, gold_cost: Amount) -> Self {
        let gold_per_turn = &gold_cost / &Amount::pow10(3);
        let exp_per_turn = &gold_cost / &Amount::pow10(5);
        Self {
            name: name.into(),
            description: format!("A {kind}"),
            level: 1,
            gold_cost,
            gold_per_turn,
            exp_per_turn,
            owner: None,
        }
    }

    /// Raise the level by one and scale cost and yields.
    ///
    /// At the new level `L` the cost grows by `10^T(L)` and both yields by
    /// `10^(T(L) - 1)`, where `T` is [`triangular`].
    pub fn level_up(&mut self) {
        self.level += 1;
        let t = triangular(self.level);
        self.gold_cost *= &Amount::pow10(t);
        let yield_scale = Amount::pow10(t.saturating_sub(1));
        self.gold_per_turn *= &yield_scale;
        self.exp_per_turn *= &yield_scale;
    }
}

/// A single tile on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    /// The first tile. Passing it grants the start bonus.
    Start,
    /// Nothing happens here.
    EmptySpace,
    /// A purchasable place.
    Place(Place),
    /// Grants a fresh random reward to whoever lands here.
    RandomReward,
    /// Sells the board's upgrades.
    UpgradeShop,
}

impl Tile {
    /// Display name of the tile.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Tile::Start => "START TILE",
            Tile::EmptySpace => "EMPTY SPACE",
            Tile::Place(place) => &place.name,
            Tile::RandomReward => "RANDOM REWARD TILE",
            Tile::UpgradeShop => "UPGRADE SHOP",
        }
    }

    /// Description of the tile.
    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            Tile::Start => "A tile where the player can gain awards by passing or landing on it.",
            Tile::EmptySpace => "A tile where nothing happens if the player lands on it.",
            Tile::Place(place) => &place.description,
            Tile::RandomReward => "A tile granting random rewards to the player landing on it.",
            Tile::UpgradeShop => "A tile where the player can buy upgrades.",
        }
    }

    /// The place on this tile, if it is one.
    #[must_use]
    pub fn as_place(&self) -> Option<&Place> {
        match self {
            Tile::Place(place) => Some(place),
            _ => None,
        }
    }

    /// Mutable access to the place on this tile, if it is one.
    pub fn as_place_mut(&mut self) -> Option<&mut Place> {
        match self {
            Tile::Place(place) => Some(place),
            _ => None,
        }
    }
}
