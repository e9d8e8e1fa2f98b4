//! Decision makers for the two seats.
//!
//! The turn driver asks a [`Controller`] whenever a tile offers a choice. The
//! human seat is driven by terminal prompts in the CLI; the computer seat uses
//! [`AiController`], which accepts every offer with a fixed probability.

use std::io;

use rand::Rng;

use crate::game::{Place, Seat, Tile, Upgrade};

/// What a place tile offers the player standing on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceOffer {
    /// Buy the unowned place.
    Buy,
    /// Level up a place the player already owns.
    Upgrade,
    /// Take over the place from its current owner.
    Acquire {
        /// Seat currently owning the place.
        from: Seat,
    },
}

/// Makes decisions for one seat.
pub trait Controller {
    /// Called once the active player has moved onto `tile`, before any offer.
    ///
    /// # Errors
    ///
    /// Returns an error if the front end could not show the tile.
    fn arrived(&mut self, _tile: &Tile) -> io::Result<()> {
        Ok(())
    }

    /// Decide whether to take the offer on `place`.
    ///
    /// # Errors
    ///
    /// Returns an error if the decision could not be read.
    fn decide_place(&mut self, place: &Place, offer: PlaceOffer) -> io::Result<bool>;

    /// Pick an upgrade from the shop catalogue by index, or `None` to skip.
    ///
    /// # Errors
    ///
    /// Returns an error if the decision could not be read.
    fn choose_upgrade(&mut self, upgrades: &[Upgrade]) -> io::Result<Option<usize>>;
}

/// The computer opponent's heuristic.
///
/// Every yes/no decision is yes with probability `accept_probability`. A shop
/// visit picks a uniformly random upgrade regardless of price.
#[derive(Debug, Clone)]
pub struct AiController<R> {
    rng: R,
    accept_probability: f64,
}

impl<R: Rng> AiController<R> {
    /// Create a controller; the probability is clamped to `[0, 1]`.
    pub fn new(rng: R, accept_probability: f64) -> Self {
        Self {
            rng,
            accept_probability: accept_probability.clamp(0.0, 1.0),
        }
    }

    fn accepts(&mut self) -> bool {
        self.rng.gen_bool(self.accept_probability)
    }
}

impl<R: Rng> Controller for AiController<R> {
    fn decide_place(&mut self, _place: &Place, _offer: PlaceOffer) -> io::Result<bool> {
        Ok(self.accepts())
    }

    fn choose_upgrade(&mut self, upgrades: &[Upgrade]) -> io::Result<Option<usize>> {
        if upgrades.is_empty() || !self.accepts() {
            return Ok(None);
        }
        Ok(Some(self.rng.gen_range(0..upgrades.len())))
    }
}
