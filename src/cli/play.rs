//! Play command: pick a game, then run the turn loop.

use std::io::{self, BufRead, Write};
use std::path::Path;

use ollama_board_game::game::{
    AiController, Controller, Place, PlaceOffer, Seat, Tile, Upgrade, assert_invariants,
};
use ollama_board_game::{GameConfig, SavedGame, save};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::output::{format_report, format_stats, format_upgrade};
use super::prompt::Prompter;
use super::{CliError, NewGameArgs, Session, load, new_game};

/// Decides for the human seat by asking at the terminal.
struct HumanController<'a, R, W> {
    prompter: &'a mut Prompter<R, W>,
}

impl<R: BufRead, W: Write> Controller for HumanController<'_, R, W> {
    fn arrived(&mut self, tile: &Tile) -> io::Result<()> {
        self.prompter.say(&format!("You are now at {}!", tile.name()))
    }

    fn decide_place(&mut self, place: &Place, offer: PlaceOffer) -> io::Result<bool> {
        let question = match offer {
            PlaceOffer::Buy => {
                format!("Do you want to buy {} for {} gold? ", place.name, place.gold_cost)
            }
            PlaceOffer::Upgrade => {
                format!("Do you want to upgrade {} for {} gold? ", place.name, place.gold_cost)
            }
            PlaceOffer::Acquire { .. } => {
                format!("Do you want to acquire {} for {} gold? ", place.name, place.gold_cost)
            }
        };
        self.prompter.confirm(&question)
    }

    fn choose_upgrade(&mut self, upgrades: &[Upgrade]) -> io::Result<Option<usize>> {
        if upgrades.is_empty() || !self.prompter.confirm("Do you want to buy an upgrade? ")? {
            return Ok(None);
        }

        self.prompter.say("Below is a list of upgrades sold in the upgrade shop.")?;
        for (i, upgrade) in upgrades.iter().enumerate() {
            self.prompter.say(&format!("UPGRADE #{}", i + 1))?;
            self.prompter.say(&format_upgrade(upgrade))?;
        }
        let question = format!(
            "Please enter the index of the upgrade you want to buy (1 - {}): ",
            upgrades.len()
        );
        let choice = self.prompter.choose_number(&question, 1..=upgrades.len())?;
        Ok(Some(choice - 1))
    }
}

/// Run turns until the player declines to continue or to roll.
fn turn_loop<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    game: &mut SavedGame,
    rng: &mut SmallRng,
    config: &GameConfig,
) -> Result<(), CliError> {
    let ai_rng = SmallRng::seed_from_u64(rng.gen_range(0..u64::MAX));
    let mut ai = AiController::new(ai_rng, config.ai_accept_probability);

    loop {
        prompter.clear()?;
        prompter.say("Enter \"Y\" for yes.")?;
        prompter.say("Enter anything else for no.")?;
        if prompter.ask("Do you want to continue playing? ")? != "Y" {
            return Ok(());
        }

        prompter.clear()?;
        prompter.say(&format_stats(game))?;

        let report = match game.next_seat() {
            Seat::Human => {
                prompter.say("It is your turn to roll the dice!")?;
                prompter.say("Enter 'ROLL' to roll the dice.")?;
                prompter.say("Enter anything else to save game data and quit the game.")?;
                if prompter.ask("What do you want to do? ")? != "ROLL" {
                    return Ok(());
                }
                let mut human = HumanController { prompter: &mut *prompter };
                game.play_turn(rng, &mut human, config)?
            }
            Seat::Ai => {
                prompter.say("It is CPU's turn to roll the dice!")?;
                game.play_turn(rng, &mut ai, config)?
            }
        };
        assert_invariants(game);

        let text = format_report(&report, game);
        if !text.is_empty() {
            prompter.say(&text)?;
        }
    }
}

/// Play `game` until the player stops, then save it.
///
/// The game is saved however the loop ends, including on input errors.
///
/// # Errors
///
/// Returns an error if input fails or the game cannot be saved.
pub(crate) fn run<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    game: &mut SavedGame,
    save_dir: &Path,
    rng: &mut SmallRng,
    config: &GameConfig,
) -> Result<(), CliError> {
    let outcome = turn_loop(prompter, game, rng, config);
    let path = save::save_game(save_dir, game)?;
    outcome?;
    prompter.say(&format!("Game data saved to {}.", path.display()))?;
    Ok(())
}

/// Ask whether to start a new game or load one.
fn choose_action<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> io::Result<bool> {
    let mut question = "What do you want to do? ".to_string();
    loop {
        prompter.say("Enter \"NEW GAME\" to create new saved game data.")?;
        prompter.say("Enter \"LOAD GAME\" to load existing saved game data.")?;
        match prompter.ask(&question)?.as_str() {
            "NEW GAME" => return Ok(true),
            "LOAD GAME" => return Ok(false),
            _ => {
                prompter.clear()?;
                question = "Sorry, invalid input! What do you want to do? ".to_string();
            }
        }
    }
}

/// Interactive entry: new or load, then play.
///
/// # Errors
///
/// Returns an error if setup fails, input closes, or saving fails.
pub(crate) fn execute(session: &Session, args: &NewGameArgs) -> Result<(), CliError> {
    let mut prompter = session.terminal();
    let mut rng = session.rng();
    let config = args.config();

    let wants_new = choose_action(&mut prompter)?;
    let loaded = if wants_new {
        None
    } else {
        let loaded = load::choose(&mut prompter, &session.save_dir)?;
        if loaded.is_none() {
            prompter.say("No saved game data found. Starting a new game.")?;
        }
        loaded
    };

    let mut game = match loaded {
        Some(game) => game,
        None => new_game::create(&mut prompter, session, args, None, &mut rng)?,
    };
    run(&mut prompter, &mut game, &session.save_dir, &mut rng, &config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ollama_board_game::{Amount, Board};
    use std::io::Cursor;
    use tempfile::tempdir;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), false)
    }

    fn place_game() -> SavedGame {
        let mut tiles = vec![Tile::Start];
        tiles.extend(std::iter::repeat_n(
            Tile::Place(Place::new("Mossy Glen", "forest", Amount::pow10(5))),
            6,
        ));
        let board = Board::new(tiles, Vec::new());
        SavedGame::new("hero", Amount::from(100_000u64), board, &GameConfig::default())
    }

    fn shop_game() -> SavedGame {
        let mut tiles = vec![Tile::Start];
        tiles.extend(std::iter::repeat_n(Tile::UpgradeShop, 6));
        let upgrades = vec![
            Upgrade::new("Cheap", Amount::pow10(3), Amount::from(2u64), Amount::from(2u64)),
            Upgrade::new("Pricey", Amount::pow10(30), Amount::from(9u64), Amount::from(9u64)),
        ];
        let board = Board::new(tiles, upgrades);
        SavedGame::new("hero", Amount::from(100_000u64), board, &GameConfig::default())
    }

    #[test]
    fn test_human_buys_place() {
        let mut p = prompter("Y\n");
        let mut human = HumanController { prompter: &mut p };
        let place = Place::new("Mossy Glen", "forest", Amount::pow10(5));
        assert!(human.decide_place(&place, PlaceOffer::Buy).unwrap());
        let printed = p.printed();
        assert!(printed.contains("Do you want to buy Mossy Glen for 100000 gold? "));
    }

    #[test]
    fn test_human_upgrade_choice() {
        let mut p = prompter("Y\n7\n2\n");
        let mut human = HumanController { prompter: &mut p };
        let upgrades = shop_game().board.upgrades().to_vec();
        assert_eq!(human.choose_upgrade(&upgrades).unwrap(), Some(1));
        let printed = p.printed();
        assert!(printed.contains("UPGRADE #1\nName: Cheap\n"));
        assert!(printed.contains("Sorry, invalid input! Please enter the index"));
    }

    #[test]
    fn test_human_skips_shop() {
        let mut p = prompter("n\n");
        let mut human = HumanController { prompter: &mut p };
        let upgrades = shop_game().board.upgrades().to_vec();
        assert_eq!(human.choose_upgrade(&upgrades).unwrap(), None);
    }

    #[test]
    fn test_full_round_then_stop_saves() {
        let dir = tempdir().unwrap();
        let mut game = place_game();
        let mut rng = SmallRng::seed_from_u64(5);
        // Continue, roll, buy; continue (CPU turn); stop.
        let mut p = prompter("Y\nROLL\nY\nY\nN\n");

        run(&mut p, &mut game, dir.path(), &mut rng, &GameConfig::default()).unwrap();

        assert_eq!(game.turn, 2);
        // The CPU may have acquired the place on its turn.
        let owned = game.human.owned_places.len() + game.ai.owned_places.len();
        assert!((1..=2).contains(&owned));
        let printed = p.printed();
        assert!(printed.contains("You are now at Mossy Glen!"));
        assert!(printed.contains("Congratulations! You have successfully bought Mossy Glen!"));
        assert!(printed.contains("It is CPU's turn to roll the dice!"));
        assert!(printed.contains("CPU is now at Mossy Glen!"));

        let saved = save::load_game(dir.path(), "hero").unwrap();
        assert_eq!(saved, game);
    }

    #[test]
    fn test_quit_instead_of_roll_saves() {
        let dir = tempdir().unwrap();
        let mut game = place_game();
        let mut rng = SmallRng::seed_from_u64(6);
        let mut p = prompter("Y\nquit\n");

        run(&mut p, &mut game, dir.path(), &mut rng, &GameConfig::default()).unwrap();

        assert_eq!(game.turn, 0);
        assert!(save::save_exists(dir.path(), "hero"));
    }

    #[test]
    fn test_eof_saves_then_errors() {
        let dir = tempdir().unwrap();
        let mut game = shop_game();
        let mut rng = SmallRng::seed_from_u64(7);
        // Input ends while the shop asks for an index.
        let mut p = prompter("Y\nROLL\nY\n");

        let result = run(&mut p, &mut game, dir.path(), &mut rng, &GameConfig::default());

        assert!(result.is_err());
        assert_eq!(save::load_game(dir.path(), "hero").unwrap().turn, 1);
    }

    #[test]
    fn test_choose_action_reprompts() {
        let mut p = prompter("new game\nLOAD GAME\n");
        assert!(!choose_action(&mut p).unwrap());
        let printed = p.printed();
        assert!(printed.contains("Sorry, invalid input! What do you want to do? "));
    }
}
