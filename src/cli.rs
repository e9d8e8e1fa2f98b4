//! CLI command implementations.

pub(crate) mod list;
pub(crate) mod load;
pub(crate) mod new_game;
pub(crate) mod play;

mod output;
mod prompt;

use std::error::Error;
use std::fmt;
use std::io::{self, Stdout, StdinLock};
use std::path::PathBuf;

use clap::Args;
use ollama_board_game::GameConfig;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use prompt::Prompter;

/// Prompter over the process's terminal.
pub(crate) type Terminal = Prompter<StdinLock<'static>, Stdout>;

/// Options shared by every command.
#[derive(Debug, Clone)]
pub(crate) struct Session {
    /// Directory holding saved games.
    pub(crate) save_dir: PathBuf,
    /// Base URL of the Ollama server.
    pub(crate) ollama_url: String,
    /// Seed for all randomness, if reproducibility is wanted.
    pub(crate) seed: Option<u64>,
    /// Whether to clear the screen between steps.
    pub(crate) clear_screen: bool,
}

impl Session {
    /// Random number generator for this session.
    pub(crate) fn rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        }
    }

    /// Prompter on stdin and stdout.
    pub(crate) fn terminal(&self) -> Terminal {
        Prompter::new(io::stdin().lock(), io::stdout(), self.clear_screen)
    }
}

/// Options for generating a new game.
#[derive(Debug, Clone, Args)]
pub(crate) struct NewGameArgs {
    /// Ollama model to name things with (default: choose from a menu)
    #[arg(short, long)]
    pub(crate) model: Option<String>,

    /// Generate random names instead of asking Ollama
    #[arg(long)]
    pub(crate) offline: bool,

    /// Fewest tiles on a new board
    #[arg(long, default_value = "500")]
    pub(crate) min_tiles: usize,

    /// Most tiles on a new board
    #[arg(long, default_value = "800")]
    pub(crate) max_tiles: usize,
}

impl Default for NewGameArgs {
    fn default() -> Self {
        Self {
            model: None,
            offline: false,
            min_tiles: 500,
            max_tiles: 800,
        }
    }
}

impl NewGameArgs {
    /// Game configuration for these options.
    pub(crate) fn config(&self) -> GameConfig {
        GameConfig::with_board_tiles(self.min_tiles, self.max_tiles)
    }
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            return Self::new("input closed before the game was finished");
        }
        Self::new(e.to_string())
    }
}

impl From<ollama_board_game::save::SaveError> for CliError {
    fn from(e: ollama_board_game::save::SaveError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ollama_board_game::llm::LlmError> for CliError {
    fn from(e: ollama_board_game::llm::LlmError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ollama_board_game::Error> for CliError {
    fn from(e: ollama_board_game::Error) -> Self {
        match e {
            ollama_board_game::Error::Io(e) => e.into(),
            other => Self::new(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eof_message() {
        let err = CliError::from(io::Error::new(io::ErrorKind::UnexpectedEof, "x"));
        assert_eq!(err.to_string(), "input closed before the game was finished");
    }

    #[test]
    fn test_llm_error_passes_message_through() {
        let err = CliError::from(ollama_board_game::llm::LlmError::ModelNotPulled(
            "llava".to_string(),
        ));
        assert_eq!(err.to_string(), "Cannot run llava! Please manually pull llava first!");
    }

    #[test]
    fn test_default_new_game_args_match_default_board() {
        let config = NewGameArgs::default().config();
        assert_eq!(config.board_tiles, GameConfig::default().board_tiles);
    }

    #[test]
    fn test_seeded_sessions_agree() {
        use rand::Rng;
        let session = Session {
            save_dir: PathBuf::from("saved"),
            ollama_url: String::new(),
            seed: Some(9),
            clear_screen: false,
        };
        let a = session.rng().gen_range(0..u64::MAX);
        let b = session.rng().gen_range(0..u64::MAX);
        assert_eq!(a, b);
    }
}
