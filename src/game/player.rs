//! Player state management.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game::{Amount, Board, GameConfig, RandomReward, Upgrade, triangular};

/// Name given to the computer-controlled player.
pub const AI_PLAYER_NAME: &str = "AI PLAYER";

/// Which side of the table a player sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    /// The person at the keyboard.
    Human,
    /// The computer opponent.
    Ai,
}

impl Seat {
    /// Both seats, in turn order.
    pub const ALL: [Seat; 2] = [Seat::Human, Seat::Ai];

    /// The opposing seat.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Seat::Human => Seat::Ai,
            Seat::Ai => Seat::Human,
        }
    }
}

/// Gold and experience earned in one step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Income {
    /// Gold earned.
    pub gold: Amount,
    /// Experience earned.
    pub exp: Amount,
    /// Levels gained as a result.
    pub levels_gained: u32,
}

/// State for a single player.
///
/// Owned places are stored as board indices; the board's [`crate::game::Place::owner`]
/// field mirrors this list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Unique identifier for this player.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Current level, starting at 1.
    pub level: u32,
    /// Index of the tile the player stands on.
    pub position: usize,
    /// Gold balance.
    pub gold: Amount,
    /// Experience balance.
    pub exp: Amount,
    /// Experience needed to reach the next level.
    pub required_exp: Amount,
    /// Board indices of owned places, in purchase order.
    pub owned_places: Vec<usize>,
    /// Upgrades bought, in purchase order.
    pub upgrades: Vec<Upgrade>,
}

impl Player {
    /// Create a new player on the start tile.
    #[must_use]
    pub fn new(name: impl Into<String>, config: &GameConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            level: 1,
            position: 0,
            gold: Amount::pow10(config.starting_gold_exp),
            exp: Amount::zero(),
            required_exp: Amount::pow10(config.starting_required_exp),
            owned_places: Vec::new(),
            upgrades: Vec::new(),
        }
    }

    /// Create the computer opponent.
    #[must_use]
    pub fn ai(config: &GameConfig) -> Self {
        Self::new(AI_PLAYER_NAME, config)
    }

    /// Whether this player owns the place at `index`.
    #[must_use]
    pub fn owns(&self, index: usize) -> bool {
        self.owned_places.contains(&index)
    }

    /// Gain levels while experience covers the requirement.
    ///
    /// Each new level `L` multiplies the requirement by `10^T(L)`.
    /// Returns the number of levels gained.
    pub fn level_up(&mut self) -> u32 {
        let mut gained = 0;
        while self.exp >= self.required_exp {
            self.level += 1;
            self.required_exp *= &Amount::pow10(triangular(self.level));
            gained += 1;
        }
        gained
    }

    /// Gold earned per turn from owned places and upgrades.
    #[must_use]
    pub fn gold_per_turn(&self, board: &Board) -> Amount {
        let base: Amount = self
            .owned_places
            .iter()
            .filter_map(|&i| board.place(i))
            .map(|p| &p.gold_per_turn)
            .sum();
        let multiplier: Amount = self.upgrades.iter().map(|u| &u.gold_multiplier).product();
        &base * &multiplier
    }

    /// Experience earned per turn from owned places and upgrades.
    #[must_use]
    pub fn exp_per_turn(&self, board: &Board) -> Amount {
        let base: Amount = self
            .owned_places
            .iter()
            .filter_map(|&i| board.place(i))
            .map(|p| &p.exp_per_turn)
            .sum();
        let multiplier: Amount = self.upgrades.iter().map(|u| &u.exp_multiplier).product();
        &base * &multiplier
    }

    /// Collect the passive income for one turn.
    pub fn gain_turn_reward(&mut self, board: &Board) -> Income {
        let gold = self.gold_per_turn(board);
        let exp = self.exp_per_turn(board);
        self.gold += &gold;
        self.exp += &exp;
        let levels_gained = self.level_up();
        Income {
            gold,
            exp,
            levels_gained,
        }
    }

    /// Collect a random reward.
    pub fn receive_reward(&mut self, reward: &RandomReward) -> u32 {
        self.gold += &reward.gold;
        self.exp += &reward.exp;
        self.level_up()
    }

    /// Pay `cost` if the balance covers it.
    ///
    /// Returns `false` and leaves the balance untouched otherwise.
    pub fn pay(&mut self, cost: &Amount) -> bool {
        match self.gold.checked_sub(cost) {
            Some(remaining) => {
                self.gold = remaining;
                true
            }
            None => false,
        }
    }

    /// Buy an upgrade if the balance covers it.
    pub fn buy_upgrade(&mut self, upgrade: &Upgrade) -> bool {
        if !self.pay(&upgrade.gold_cost) {
            return false;
        }
        self.upgrades.push(upgrade.clone());
        true
    }

    /// Move forward `steps` tiles on a board of `board_len` tiles.
    ///
    /// Every time the player passes the end of the board the position wraps
    /// and the start bonus is paid once. Returns the number of laps completed.
    pub fn advance(&mut self, steps: usize, board_len: usize, start_bonus: &Amount) -> usize {
        if board_len == 0 {
            return 0;
        }
        let target = self.position + steps;
        let laps = target / board_len;
        self.position = target % board_len;
        for _ in 0..laps {
            self.gold += start_bonus;
        }
        laps
    }
}
