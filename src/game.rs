//! Game layer.
//!
//! Implements the rules of the board game:
//! - Arbitrary-precision gold and experience
//! - Board of tiles (start, empty spaces, places, reward tiles, upgrade shops)
//! - Players with income, leveling and purchases
//! - Turn resolution with pluggable decision makers
//! - Invariant checks for ownership bookkeeping

mod amount;
mod board;
mod config;
mod controller;
mod dice;
mod invariants;
mod player;
mod state;
mod tile;
mod turn;
mod upgrade;

pub use amount::{Amount, triangular};
pub use board::{Board, GenerationProgress};
pub use config::GameConfig;
pub use controller::{AiController, Controller, PlaceOffer};
pub use dice::Dice;
pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use player::{AI_PLAYER_NAME, Income, Player, Seat};
pub use state::SavedGame;
pub use tile::{PLACE_KINDS, Place, Tile};
pub use turn::{TileOutcome, TurnReport};
pub use upgrade::{RandomReward, Upgrade};
