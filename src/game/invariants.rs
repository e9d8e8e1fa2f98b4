//! Game invariants - sanity checks that detect bugs.
//!
//! None of these should ever trigger in a correctly implemented game. They
//! are bug detectors for ownership bookkeeping and movement, not gameplay
//! limits.

use std::collections::HashSet;

use crate::game::{SavedGame, Seat};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(state: &SavedGame) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let board_len = state.board.len();
    let mut claimed = HashSet::new();

    for seat in Seat::ALL {
        let player = state.player(seat);

        if board_len > 0 && player.position >= board_len {
            violations.push(InvariantViolation {
                message: format!(
                    "{} stands on tile {} of a {board_len}-tile board",
                    player.name, player.position
                ),
            });
        }

        let mut seen = HashSet::new();
        for &index in &player.owned_places {
            if !seen.insert(index) {
                violations.push(InvariantViolation {
                    message: format!("{} lists place {index} twice", player.name),
                });
            }
            if !claimed.insert(index) {
                violations.push(InvariantViolation {
                    message: format!("Place {index} is listed by both players"),
                });
            }
            match state.board.place(index) {
                None => violations.push(InvariantViolation {
                    message: format!("{} owns tile {index}, which is not a place", player.name),
                }),
                Some(place) if place.owner != Some(seat) => violations.push(InvariantViolation {
                    message: format!(
                        "{} lists place {index} but its owner is {:?}",
                        player.name, place.owner
                    ),
                }),
                Some(_) => {}
            }
        }
    }

    // Every owned place must be listed by its owner
    for index in state.board.place_indices() {
        if let Some(owner) = state.board.place(index).and_then(|p| p.owner)
            && !state.player(owner).owns(index)
        {
            violations.push(InvariantViolation {
                message: format!("Place {index} is owned by {owner:?} but not in their list"),
            });
        }
    }

    violations
}

/// Assert all game invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &SavedGame) {
    let violations = check_invariants(state);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &SavedGame) {}
