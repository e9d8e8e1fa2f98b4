//! The board: an ordered ring of tiles plus the shop catalogue.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::game::{Amount, GameConfig, PLACE_KINDS, Place, Tile, Upgrade};
use crate::llm::{LlmError, NameSource};

/// Progress notification emitted while a board is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationProgress {
    /// An upgrade for the shop was named.
    Upgrade {
        /// Upgrades named so far.
        named: usize,
        /// Upgrades the shop will sell.
        total: usize,
    },
    /// A tile was laid down.
    Tile {
        /// Tiles laid so far.
        laid: usize,
        /// Tiles the board will have.
        total: usize,
        /// Places generated so far.
        places: usize,
    },
}

/// The game board.
///
/// Tiles are fixed at creation. Every upgrade shop tile sells the same
/// catalogue, held once on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    tiles: Vec<Tile>,
    upgrades: Vec<Upgrade>,
}

impl Board {
    /// Create a board from tiles and a shop catalogue.
    #[must_use]
    pub fn new(tiles: Vec<Tile>, upgrades: Vec<Upgrade>) -> Self {
        Self { tiles, upgrades }
    }

    /// Generate a random board, naming upgrades and places with `names`.
    ///
    /// The shop catalogue is generated first, then the tiles. Tile 0 is the
    /// start tile; every other tile is equally likely to be an empty space, a
    /// place, a random reward tile or an upgrade shop.
    ///
    /// # Errors
    ///
    /// Returns an error if the name source fails.
    pub fn generate<R, N>(
        config: &GameConfig,
        rng: &mut R,
        names: &mut N,
        mut progress: impl FnMut(GenerationProgress),
    ) -> Result<Self, LlmError>
    where
        R: Rng,
        N: NameSource + ?Sized,
    {
        let upgrade_count = rng.gen_range(config.shop_upgrades.clone());
        let mut upgrades = Vec::with_capacity(upgrade_count);
        for named in 1..=upgrade_count {
            let name = names.upgrade_name()?;
            upgrades.push(Upgrade::random(name, rng, config));
            progress(GenerationProgress::Upgrade {
                named,
                total: upgrade_count,
            });
        }

        let tile_count = rng.gen_range(config.board_tiles.clone());
        let mut tiles = Vec::with_capacity(tile_count);
        let mut places = 0;
        for laid in 1..=tile_count {
            let tile = if laid == 1 {
                Tile::Start
            } else {
                match rng.gen_range(1..=4) {
                    1 => Tile::EmptySpace,
                    2 => {
                        let name = names.place_name()?;
                        let kind = PLACE_KINDS[rng.gen_range(0..PLACE_KINDS.len())];
                        let cost = Amount::pow10(rng.gen_range(config.place_cost_exp.clone()));
                        places += 1;
                        Tile::Place(Place::new(name, kind, cost))
                    }
                    3 => Tile::RandomReward,
                    _ => Tile::UpgradeShop,
                }
            };
            tiles.push(tile);
            progress(GenerationProgress::Tile {
                laid,
                total: tile_count,
                places,
            });
        }

        Ok(Self::new(tiles, upgrades))
    }

    /// Number of tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the board has no tiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// All tiles in board order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// The tile at `index`.
    #[must_use]
    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// The place at `index`, if that tile is a place.
    #[must_use]
    pub fn place(&self, index: usize) -> Option<&Place> {
        self.tiles.get(index).and_then(Tile::as_place)
    }

    /// Mutable access to the place at `index`, if that tile is a place.
    pub fn place_mut(&mut self, index: usize) -> Option<&mut Place> {
        self.tiles.get_mut(index).and_then(Tile::as_place_mut)
    }

    /// Indices of every place tile.
    pub fn place_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| matches!(t, Tile::Place(_)))
            .map(|(i, _)| i)
    }

    /// The upgrades sold by every upgrade shop.
    #[must_use]
    pub fn upgrades(&self) -> &[Upgrade] {
        &self.upgrades
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::RandomNames;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    /// Name source that always fails.
    struct Unreachable;

    impl NameSource for Unreachable {
        fn upgrade_name(&mut self) -> Result<String, LlmError> {
            Err(LlmError::EmptyResponse)
        }

        fn place_name(&mut self) -> Result<String, LlmError> {
            Err(LlmError::EmptyResponse)
        }
    }

    fn small_config() -> GameConfig {
        GameConfig {
            place_cost_exp: 5..=20,
            upgrade_cost_exp: 10..=30,
            ..GameConfig::with_board_tiles(40, 60)
        }
    }

    #[test]
    fn test_generate_shape() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut names = RandomNames::new(SmallRng::seed_from_u64(43));
        let board = Board::generate(&small_config(), &mut rng, &mut names, |_| {}).unwrap();

        assert!((40..=60).contains(&board.len()));
        assert!((10..=20).contains(&board.upgrades().len()));
        assert_eq!(board.tile(0), Some(&Tile::Start));
        assert!(
            board.tiles()[1..].iter().all(|t| !matches!(t, Tile::Start)),
            "only the first tile is the start tile"
        );
        for index in board.place_indices() {
            let place = board.place(index).unwrap();
            assert_eq!(place.level, 1);
            assert!(place.owner.is_none());
            assert!(place.gold_cost >= Amount::pow10(5));
            assert!(place.gold_cost <= Amount::pow10(20));
        }
    }

    #[test]
    fn test_generate_is_deterministic_per_seed() {
        let generate = || {
            let mut rng = SmallRng::seed_from_u64(5);
            let mut names = RandomNames::new(SmallRng::seed_from_u64(6));
            Board::generate(&small_config(), &mut rng, &mut names, |_| {}).unwrap()
        };
        assert_eq!(generate(), generate());
    }

    #[test]
    fn test_generate_reports_progress() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut names = RandomNames::new(SmallRng::seed_from_u64(12));
        let mut last_upgrade = 0;
        let mut last_tile = (0, 0);
        let board = Board::generate(&small_config(), &mut rng, &mut names, |p| match p {
            GenerationProgress::Upgrade { named, .. } => last_upgrade = named,
            GenerationProgress::Tile { laid, places, .. } => last_tile = (laid, places),
        })
        .unwrap();

        assert_eq!(last_upgrade, board.upgrades().len());
        assert_eq!(last_tile.0, board.len());
        assert_eq!(last_tile.1, board.place_indices().count());
    }

    #[test]
    fn test_generate_propagates_name_errors() {
        let mut rng = SmallRng::seed_from_u64(1);
        let result = Board::generate(&small_config(), &mut rng, &mut Unreachable, |_| {});
        assert!(matches!(result, Err(LlmError::EmptyResponse)));
    }

    #[test]
    fn test_place_lookup() {
        let board = Board::new(
            vec![
                Tile::Start,
                Tile::Place(Place::new("Dune Sea", "desert", Amount::pow10(6))),
                Tile::UpgradeShop,
            ],
            Vec::new(),
        );
        assert!(board.place(0).is_none());
        assert_eq!(board.place(1).map(|p| p.name.as_str()), Some("Dune Sea"));
        assert!(board.place(2).is_none());
        assert!(board.place(99).is_none());
        assert_eq!(board.place_indices().collect::<Vec<_>>(), vec![1]);
    }
}
