// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! A terminal board game against a computer opponent.
//!
//! Players walk a looping board, buy and level up places for passive income,
//! collect random rewards, and buy income multipliers in a shared upgrade
//! shop. Gold and experience grow without bound, so all amounts are
//! arbitrary-precision integers. Place and upgrade names come from a locally
//! hosted Ollama model.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │     CLI (prompts, rendering)        │
//! ├─────────────────────────────────────┤
//! │  Game rules  │  Saves  │  Names     │
//! ├─────────────────────────────────────┤
//! │  num-bigint  │ bincode │  Ollama    │
//! └─────────────────────────────────────┘
//! ```

pub mod error;
pub mod game;
pub mod llm;
pub mod save;

pub use error::{Error, Result};

// Re-export key game types at crate root for convenience
pub use game::{Amount, Board, GameConfig, Player, SavedGame, Seat, Tile, TurnReport};
