//! Load command implementation.

use std::io::{BufRead, Write};
use std::path::Path;

use ollama_board_game::{GameConfig, SavedGame, save};

use super::prompt::Prompter;
use super::{CliError, Session, list, play};

const LOAD_QUESTION: &str =
    "Please enter player name associated with saved game data you want to load: ";

/// Match an answer against the save names, by exact name or list number.
fn resolve<'a>(saves: &'a [String], answer: &str) -> Option<&'a str> {
    saves
        .iter()
        .find(|name| *name == answer)
        .or_else(|| {
            let number: usize = answer.parse().ok()?;
            saves.get(number.checked_sub(1)?)
        })
        .map(String::as_str)
}

/// Let the player pick a saved game. Returns `None` if there are no saves.
///
/// # Errors
///
/// Returns an error if input closes or the chosen save cannot be read.
pub(crate) fn choose<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    dir: &Path,
) -> Result<Option<SavedGame>, CliError> {
    let saves = save::list_saves(dir)?;
    if saves.is_empty() {
        return Ok(None);
    }

    prompter.clear()?;
    list::print_saves(prompter, &saves)?;
    let mut answer = prompter.ask(LOAD_QUESTION)?;
    loop {
        if let Some(name) = resolve(&saves, &answer) {
            return Ok(Some(save::load_game(dir, name)?));
        }
        prompter.clear()?;
        list::print_saves(prompter, &saves)?;
        answer = prompter.ask(&format!("Sorry, invalid input! {LOAD_QUESTION}"))?;
    }
}

/// Execute the load command.
///
/// # Errors
///
/// Returns an error if the game cannot be loaded, input closes, or saving
/// fails.
pub(crate) fn execute(session: &Session, name: Option<&str>) -> Result<(), CliError> {
    let mut prompter = session.terminal();
    let mut rng = session.rng();

    let mut game = match name {
        Some(name) => save::load_game(&session.save_dir, name)?,
        None => choose(&mut prompter, &session.save_dir)?.ok_or_else(|| {
            CliError::new(format!("no saved games in {}", session.save_dir.display()))
        })?,
    };
    play::run(&mut prompter, &mut game, &session.save_dir, &mut rng, &GameConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ollama_board_game::{Amount, Board, Tile};
    use std::io::Cursor;
    use tempfile::tempdir;

    fn store(dir: &Path, name: &str) {
        let board = Board::new(vec![Tile::Start, Tile::EmptySpace], Vec::new());
        let game = SavedGame::new(name, Amount::from(1u64), board, &GameConfig::default());
        save::save_game(dir, &game).unwrap();
    }

    #[test]
    fn test_resolve_by_name_or_number() {
        let saves = vec!["amy".to_string(), "bo".to_string()];
        assert_eq!(resolve(&saves, "bo"), Some("bo"));
        assert_eq!(resolve(&saves, "1"), Some("amy"));
        assert_eq!(resolve(&saves, "0"), None);
        assert_eq!(resolve(&saves, "3"), None);
        assert_eq!(resolve(&saves, "carl"), None);
    }

    #[test]
    fn test_choose_without_saves() {
        let dir = tempdir().unwrap();
        let mut p = Prompter::new(Cursor::new(Vec::new()), Vec::new(), false);
        assert!(choose(&mut p, dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_choose_reprompts_until_known_name() {
        let dir = tempdir().unwrap();
        store(dir.path(), "amy");
        store(dir.path(), "bo");

        let mut p = Prompter::new(Cursor::new(b"nobody\nbo\n".to_vec()), Vec::new(), false);
        let game = choose(&mut p, dir.path()).unwrap().unwrap();

        assert_eq!(game.player_name, "bo");
        assert!(p.printed().contains("Sorry, invalid input! Please enter player name"));
    }
}
