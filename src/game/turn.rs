//! Turn resolution.
//!
//! One call to [`SavedGame::play_turn`] plays a whole turn for whichever seat
//! is due: passive income, the die roll, movement, and the landed tile's
//! effect. Nothing is printed here; the returned [`TurnReport`] describes what
//! happened so the front end can render it.

use std::io;

use rand::Rng;

use crate::game::{
    Controller, Dice, GameConfig, Income, PlaceOffer, RandomReward, SavedGame, Seat, Tile,
};

/// What happened on the landed tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileOutcome {
    /// Start tile, empty space, or nothing else to do.
    Nothing,
    /// The player turned down a place offer.
    PlaceDeclined(PlaceOffer),
    /// The player took a place offer.
    PlaceTaken(PlaceOffer),
    /// The player wanted to spend gold but could not afford it.
    InsufficientGold,
    /// A random reward was granted.
    Reward {
        /// The reward.
        reward: RandomReward,
        /// Levels gained from it.
        levels_gained: u32,
    },
    /// The player left the upgrade shop without buying.
    ShopSkipped,
    /// The player bought the upgrade at this catalogue index.
    UpgradeBought(usize),
}

/// Everything that happened during one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    /// Turn number just played.
    pub turn: u64,
    /// Seat that played it.
    pub seat: Seat,
    /// Passive income collected at the start of the turn.
    pub income: Income,
    /// Die value.
    pub roll: u8,
    /// Laps completed while moving; each paid the start bonus.
    pub laps: usize,
    /// Board index of the landed tile.
    pub tile: usize,
    /// Effect of the landed tile.
    pub outcome: TileOutcome,
}

impl SavedGame {
    /// Play the next turn with `controller` deciding for the active seat.
    ///
    /// # Errors
    ///
    /// Returns an error if the controller fails to produce a decision. The
    /// turn counter, income and movement have already been applied by then.
    pub fn play_turn<R, C>(
        &mut self,
        rng: &mut R,
        controller: &mut C,
        config: &GameConfig,
    ) -> io::Result<TurnReport>
    where
        R: Rng,
        C: Controller + ?Sized,
    {
        self.turn += 1;
        let seat = Self::seat_for_turn(self.turn);

        let board = &self.board;
        let income = match seat {
            Seat::Human => self.human.gain_turn_reward(board),
            Seat::Ai => self.ai.gain_turn_reward(board),
        };

        let roll = Dice::roll(rng);
        let laps = self.advance(seat, usize::from(roll));
        let tile = self.player(seat).position;
        if let Some(landed) = self.board.tile(tile) {
            controller.arrived(landed)?;
        }
        let outcome = self.resolve_tile(seat, tile, rng, controller, config)?;

        Ok(TurnReport {
            turn: self.turn,
            seat,
            income,
            roll,
            laps,
            tile,
            outcome,
        })
    }

    /// Apply the effect of the tile at `index` to the player in `seat`.
    fn resolve_tile<R, C>(
        &mut self,
        seat: Seat,
        index: usize,
        rng: &mut R,
        controller: &mut C,
        config: &GameConfig,
    ) -> io::Result<TileOutcome>
    where
        R: Rng,
        C: Controller + ?Sized,
    {
        let Some(tile) = self.board.tile(index) else {
            return Ok(TileOutcome::Nothing);
        };

        match tile {
            Tile::Start | Tile::EmptySpace => Ok(TileOutcome::Nothing),
            Tile::Place(place) => {
                let offer = match place.owner {
                    None => PlaceOffer::Buy,
                    Some(owner) if owner == seat => PlaceOffer::Upgrade,
                    Some(owner) => PlaceOffer::Acquire { from: owner },
                };
                if !controller.decide_place(place, offer)? {
                    return Ok(TileOutcome::PlaceDeclined(offer));
                }
                let done = match offer {
                    PlaceOffer::Buy => self.buy_place(seat, index),
                    PlaceOffer::Upgrade => self.upgrade_place(seat, index),
                    PlaceOffer::Acquire { .. } => self.acquire_place(seat, index),
                };
                Ok(if done {
                    TileOutcome::PlaceTaken(offer)
                } else {
                    TileOutcome::InsufficientGold
                })
            }
            Tile::RandomReward => {
                let reward = RandomReward::roll(rng, config);
                let levels_gained = self.player_mut(seat).receive_reward(&reward);
                Ok(TileOutcome::Reward {
                    reward,
                    levels_gained,
                })
            }
            Tile::UpgradeShop => {
                let upgrades = self.board.upgrades();
                let Some(choice) = controller.choose_upgrade(upgrades)? else {
                    return Ok(TileOutcome::ShopSkipped);
                };
                let Some(upgrade) = upgrades.get(choice) else {
                    return Ok(TileOutcome::ShopSkipped);
                };
                let player = match seat {
                    Seat::Human => &mut self.human,
                    Seat::Ai => &mut self.ai,
                };
                Ok(if player.buy_upgrade(upgrade) {
                    TileOutcome::UpgradeBought(choice)
                } else {
                    TileOutcome::InsufficientGold
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{AiController, Amount, Board, Place, Upgrade};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    /// Controller with scripted answers.
    struct Scripted {
        accept: bool,
        upgrade: Option<usize>,
        offers: Vec<PlaceOffer>,
        arrivals: Vec<String>,
    }

    impl Scripted {
        fn new(accept: bool, upgrade: Option<usize>) -> Self {
            Self {
                accept,
                upgrade,
                offers: Vec::new(),
                arrivals: Vec::new(),
            }
        }
    }

    impl Controller for Scripted {
        fn arrived(&mut self, tile: &Tile) -> io::Result<()> {
            self.arrivals.push(tile.name().to_string());
            Ok(())
        }

        fn decide_place(&mut self, _place: &Place, offer: PlaceOffer) -> io::Result<bool> {
            self.offers.push(offer);
            Ok(self.accept)
        }

        fn choose_upgrade(&mut self, _upgrades: &[Upgrade]) -> io::Result<Option<usize>> {
            Ok(self.upgrade)
        }
    }

    /// Controller whose input source is gone.
    struct Disconnected;

    impl Controller for Disconnected {
        fn decide_place(&mut self, _place: &Place, _offer: PlaceOffer) -> io::Result<bool> {
            Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"))
        }

        fn choose_upgrade(&mut self, _upgrades: &[Upgrade]) -> io::Result<Option<usize>> {
            Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"))
        }
    }

    /// A board where every non-start tile is `tile`.
    fn uniform_game(tile: &Tile, upgrades: Vec<Upgrade>) -> SavedGame {
        let mut tiles = vec![Tile::Start];
        tiles.extend(std::iter::repeat_n(tile.clone(), 12));
        SavedGame::new(
            "tester",
            Amount::from(100_000u64),
            Board::new(tiles, upgrades),
            &GameConfig::default(),
        )
    }

    fn cheap_place() -> Tile {
        Tile::Place(Place::new("Quiet Lake", "lake", Amount::pow10(5)))
    }

    #[test]
    fn test_turns_alternate_starting_with_human() {
        let mut game = uniform_game(&Tile::EmptySpace, Vec::new());
        let mut rng = SmallRng::seed_from_u64(1);
        let mut controller = Scripted::new(false, None);
        let config = GameConfig::default();

        let seats: Vec<Seat> = (0..4)
            .map(|_| game.play_turn(&mut rng, &mut controller, &config).unwrap().seat)
            .collect();
        assert_eq!(seats, vec![Seat::Human, Seat::Ai, Seat::Human, Seat::Ai]);
        assert_eq!(game.turn, 4);
    }

    #[test]
    fn test_roll_moves_active_player_only() {
        let mut game = uniform_game(&Tile::EmptySpace, Vec::new());
        let mut rng = SmallRng::seed_from_u64(2);
        let report = game
            .play_turn(&mut rng, &mut Scripted::new(false, None), &GameConfig::default())
            .unwrap();

        assert!((1..=6).contains(&report.roll));
        assert_eq!(report.tile, usize::from(report.roll));
        assert_eq!(game.human.position, usize::from(report.roll));
        assert_eq!(game.ai.position, 0);
        assert_eq!(report.outcome, TileOutcome::Nothing);
    }

    #[test]
    fn test_unowned_place_offers_buy() {
        let mut game = uniform_game(&cheap_place(), Vec::new());
        let mut rng = SmallRng::seed_from_u64(3);
        let mut controller = Scripted::new(true, None);
        let report = game
            .play_turn(&mut rng, &mut controller, &GameConfig::default())
            .unwrap();

        assert_eq!(controller.offers, vec![PlaceOffer::Buy]);
        assert_eq!(controller.arrivals, vec!["Quiet Lake"]);
        assert_eq!(report.outcome, TileOutcome::PlaceTaken(PlaceOffer::Buy));
        assert_eq!(game.human.owned_places, vec![report.tile]);
    }

    #[test]
    fn test_declined_place_changes_nothing() {
        let mut game = uniform_game(&cheap_place(), Vec::new());
        let mut rng = SmallRng::seed_from_u64(4);
        let report = game
            .play_turn(&mut rng, &mut Scripted::new(false, None), &GameConfig::default())
            .unwrap();

        assert_eq!(report.outcome, TileOutcome::PlaceDeclined(PlaceOffer::Buy));
        assert!(game.human.owned_places.is_empty());
        assert_eq!(game.human.gold, Amount::pow10(6));
    }

    #[test]
    fn test_own_place_offers_upgrade() {
        let mut game = uniform_game(&cheap_place(), Vec::new());
        for index in 1..game.board.len() {
            if let Some(place) = game.board.place_mut(index) {
                place.owner = Some(Seat::Human);
            }
            game.human.owned_places.push(index);
        }
        game.human.gold = Amount::pow10(20);

        let mut rng = SmallRng::seed_from_u64(5);
        let mut controller = Scripted::new(true, None);
        let report = game
            .play_turn(&mut rng, &mut controller, &GameConfig::default())
            .unwrap();

        assert_eq!(controller.offers, vec![PlaceOffer::Upgrade]);
        assert_eq!(report.outcome, TileOutcome::PlaceTaken(PlaceOffer::Upgrade));
        assert_eq!(game.board.place(report.tile).unwrap().level, 2);
    }

    #[test]
    fn test_opponent_place_offers_acquire() {
        let mut game = uniform_game(&cheap_place(), Vec::new());
        for index in 1..game.board.len() {
            if let Some(place) = game.board.place_mut(index) {
                place.owner = Some(Seat::Ai);
            }
            game.ai.owned_places.push(index);
        }

        let mut rng = SmallRng::seed_from_u64(6);
        let mut controller = Scripted::new(true, None);
        let report = game
            .play_turn(&mut rng, &mut controller, &GameConfig::default())
            .unwrap();

        let offer = PlaceOffer::Acquire { from: Seat::Ai };
        assert_eq!(controller.offers, vec![offer]);
        assert_eq!(report.outcome, TileOutcome::PlaceTaken(offer));
        assert!(game.human.owns(report.tile));
        assert!(!game.ai.owns(report.tile));
    }

    #[test]
    fn test_unaffordable_place_reports_insufficient_gold() {
        let pricey = Tile::Place(Place::new("Gold Keep", "castle", Amount::pow10(30)));
        let mut game = uniform_game(&pricey, Vec::new());
        let mut rng = SmallRng::seed_from_u64(7);
        let report = game
            .play_turn(&mut rng, &mut Scripted::new(true, None), &GameConfig::default())
            .unwrap();

        assert_eq!(report.outcome, TileOutcome::InsufficientGold);
        assert_eq!(game.human.gold, Amount::pow10(6));
        assert!(game.human.owned_places.is_empty());
    }

    #[test]
    fn test_random_reward_granted() {
        let mut game = uniform_game(&Tile::RandomReward, Vec::new());
        let config = GameConfig {
            reward_exp: 7..=7,
            ..GameConfig::default()
        };
        let mut rng = SmallRng::seed_from_u64(8);
        let report = game
            .play_turn(&mut rng, &mut Scripted::new(false, None), &config)
            .unwrap();

        let TileOutcome::Reward {
            reward,
            levels_gained,
        } = report.outcome
        else {
            panic!("expected a reward, got {:?}", report.outcome);
        };
        assert_eq!(reward.gold, Amount::pow10(7));
        assert_eq!(levels_gained, 2);
        assert_eq!(game.human.gold, &Amount::pow10(6) + &Amount::pow10(7));
        assert_eq!(game.human.level, 3);
    }

    #[test]
    fn test_upgrade_shop_purchase() {
        let upgrades = vec![
            Upgrade::new("Too Pricey", Amount::pow10(40), Amount::one(), Amount::one()),
            Upgrade::new("Affordable", Amount::pow10(3), Amount::from(2u32), Amount::one()),
        ];
        let mut game = uniform_game(&Tile::UpgradeShop, upgrades);
        let mut rng = SmallRng::seed_from_u64(9);
        let config = GameConfig::default();

        let report = game
            .play_turn(&mut rng, &mut Scripted::new(false, Some(1)), &config)
            .unwrap();
        assert_eq!(report.outcome, TileOutcome::UpgradeBought(1));
        assert_eq!(game.human.upgrades.len(), 1);

        let report = game
            .play_turn(&mut rng, &mut Scripted::new(false, Some(0)), &config)
            .unwrap();
        assert_eq!(report.outcome, TileOutcome::InsufficientGold);
        assert!(game.ai.upgrades.is_empty());

        let report = game
            .play_turn(&mut rng, &mut Scripted::new(false, None), &config)
            .unwrap();
        assert_eq!(report.outcome, TileOutcome::ShopSkipped);
    }

    #[test]
    fn test_out_of_range_upgrade_choice_skips() {
        let upgrades = vec![Upgrade::new("Only", Amount::one(), Amount::one(), Amount::one())];
        let mut game = uniform_game(&Tile::UpgradeShop, upgrades);
        let mut rng = SmallRng::seed_from_u64(10);
        let report = game
            .play_turn(&mut rng, &mut Scripted::new(false, Some(5)), &GameConfig::default())
            .unwrap();
        assert_eq!(report.outcome, TileOutcome::ShopSkipped);
        assert!(game.human.upgrades.is_empty());
    }

    #[test]
    fn test_income_collected_before_moving() {
        let mut game = uniform_game(&Tile::EmptySpace, Vec::new());
        game.board = Board::new(
            vec![
                Tile::Start,
                Tile::Place(Place::new("Rich Sea", "sea", Amount::pow10(12))),
                Tile::EmptySpace,
                Tile::EmptySpace,
                Tile::EmptySpace,
                Tile::EmptySpace,
                Tile::EmptySpace,
                Tile::EmptySpace,
            ],
            Vec::new(),
        );
        game.ai.gold = Amount::pow10(13);
        assert!(game.buy_place(Seat::Ai, 1));
        game.turn = 1;

        let mut rng = SmallRng::seed_from_u64(11);
        let report = game
            .play_turn(&mut rng, &mut Scripted::new(false, None), &GameConfig::default())
            .unwrap();
        assert_eq!(report.seat, Seat::Ai);
        assert_eq!(report.income.gold, Amount::pow10(9));
        assert_eq!(report.income.exp, Amount::pow10(7));
    }

    #[test]
    fn test_controller_error_propagates() {
        let mut game = uniform_game(&cheap_place(), Vec::new());
        let mut rng = SmallRng::seed_from_u64(12);
        let result = game.play_turn(&mut rng, &mut Disconnected, &GameConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_ai_controller_drives_turns() {
        let mut game = uniform_game(&cheap_place(), Vec::new());
        let mut rng = SmallRng::seed_from_u64(13);
        let mut ai = AiController::new(SmallRng::seed_from_u64(14), 1.0);
        let config = GameConfig::default();
        for _ in 0..10 {
            game.play_turn(&mut rng, &mut ai, &config).unwrap();
        }
        let owned = game.human.owned_places.len() + game.ai.owned_places.len();
        assert!(owned > 0);
    }
}
