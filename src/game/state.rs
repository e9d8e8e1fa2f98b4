//! Game state management.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::game::{Amount, Board, GameConfig, GenerationProgress, Player, Seat};
use crate::llm::{LlmError, NameSource};

/// Complete state of one saved game.
///
/// This is the unit written to disk: one file per player name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    /// Name the save is stored under; also the human player's name.
    pub player_name: String,
    /// Turns played so far. Odd turns belong to the human.
    pub turn: u64,
    /// Gold paid for each lap around the board.
    pub start_bonus: Amount,
    /// The human player.
    pub human: Player,
    /// The computer opponent.
    pub ai: Player,
    /// The board.
    pub board: Board,
}

impl SavedGame {
    /// Create a fresh game on an existing board.
    #[must_use]
    pub fn new(
        player_name: impl Into<String>,
        start_bonus: Amount,
        board: Board,
        config: &GameConfig,
    ) -> Self {
        let player_name = player_name.into();
        Self {
            human: Player::new(player_name.clone(), config),
            ai: Player::ai(config),
            player_name,
            turn: 0,
            start_bonus,
            board,
        }
    }

    /// Create a fresh game with a randomly generated board.
    ///
    /// # Errors
    ///
    /// Returns an error if the name source fails.
    pub fn generate<R, N>(
        config: &GameConfig,
        rng: &mut R,
        player_name: impl Into<String>,
        names: &mut N,
        progress: impl FnMut(GenerationProgress),
    ) -> Result<Self, LlmError>
    where
        R: Rng,
        N: NameSource + ?Sized,
    {
        let start_bonus = Amount::from(rng.gen_range(config.start_bonus.clone()));
        let board = Board::generate(config, rng, names, progress)?;
        Ok(Self::new(player_name, start_bonus, board, config))
    }

    /// The seat that plays on a given turn number.
    #[must_use]
    pub const fn seat_for_turn(turn: u64) -> Seat {
        if turn % 2 == 1 { Seat::Human } else { Seat::Ai }
    }

    /// The seat that plays the next turn.
    #[must_use]
    pub const fn next_seat(&self) -> Seat {
        Self::seat_for_turn(self.turn + 1)
    }

    /// The player in a seat.
    #[must_use]
    pub fn player(&self, seat: Seat) -> &Player {
        match seat {
            Seat::Human => &self.human,
            Seat::Ai => &self.ai,
        }
    }

    /// Mutable access to the player in a seat.
    pub fn player_mut(&mut self, seat: Seat) -> &mut Player {
        match seat {
            Seat::Human => &mut self.human,
            Seat::Ai => &mut self.ai,
        }
    }

    /// Buy the unowned place at `index`.
    ///
    /// Returns `false` and changes nothing if the tile is not an unowned
    /// place or the player cannot afford it.
    pub fn buy_place(&mut self, seat: Seat, index: usize) -> bool {
        let Some(place) = self.board.place_mut(index) else {
            return false;
        };
        if place.owner.is_some() {
            return false;
        }
        let player = match seat {
            Seat::Human => &mut self.human,
            Seat::Ai => &mut self.ai,
        };
        if !player.pay(&place.gold_cost) {
            return false;
        }
        player.owned_places.push(index);
        place.owner = Some(seat);
        true
    }

    /// Level up the place at `index`, which `seat` must own.
    ///
    /// Returns `false` and changes nothing if the seat does not own the place
    /// or cannot afford the current cost.
    pub fn upgrade_place(&mut self, seat: Seat, index: usize) -> bool {
        let Some(place) = self.board.place_mut(index) else {
            return false;
        };
        if place.owner != Some(seat) {
            return false;
        }
        let player = match seat {
            Seat::Human => &mut self.human,
            Seat::Ai => &mut self.ai,
        };
        if !player.pay(&place.gold_cost) {
            return false;
        }
        place.level_up();
        true
    }

    /// Take over the opponent's place at `index`.
    ///
    /// The buyer pays the current cost to the previous owner, the place levels
    /// up, and it moves from the previous owner's list to the buyer's.
    /// Returns `false` and changes nothing if the opponent does not own the
    /// place or the buyer cannot afford it.
    pub fn acquire_place(&mut self, seat: Seat, index: usize) -> bool {
        let Some(place) = self.board.place_mut(index) else {
            return false;
        };
        if place.owner != Some(seat.other()) {
            return false;
        }
        let (buyer, owner) = match seat {
            Seat::Human => (&mut self.human, &mut self.ai),
            Seat::Ai => (&mut self.ai, &mut self.human),
        };
        if !buyer.pay(&place.gold_cost) {
            return false;
        }
        owner.gold += &place.gold_cost;
        place.level_up();
        owner.owned_places.retain(|&i| i != index);
        buyer.owned_places.push(index);
        place.owner = Some(seat);
        true
    }

    /// Move the player in `seat` forward, paying the start bonus per lap.
    ///
    /// Returns the number of laps completed.
    pub fn advance(&mut self, seat: Seat, steps: usize) -> usize {
        let board_len = self.board.len();
        let player = match seat {
            Seat::Human => &mut self.human,
            Seat::Ai => &mut self.ai,
        };
        player.advance(steps, board_len, &self.start_bonus)
    }
}
