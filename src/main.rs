//! Command-line board game against a computer opponent.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use ollama_board_game::llm::DEFAULT_OLLAMA_URL;
use ollama_board_game::save::DEFAULT_SAVE_DIR;

/// Buy places, level up and outgrow the computer on a board named by an LLM
#[derive(Parser, Debug)]
#[command(name = "ollama-board-game")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding saved games
    #[arg(long, global = true, default_value = DEFAULT_SAVE_DIR)]
    save_dir: PathBuf,

    /// Base URL of the Ollama server
    #[arg(long, global = true, default_value = DEFAULT_OLLAMA_URL)]
    ollama_url: String,

    /// Random seed (default: random)
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Do not clear the screen between steps
    #[arg(long, global = true)]
    no_clear: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start a new game or load one, then play (default)
    Play {
        #[command(flatten)]
        new_game: cli::NewGameArgs,
    },

    /// Create a new game, then play
    New {
        /// Player name, also the save file name
        #[arg(short, long)]
        name: Option<String>,

        #[command(flatten)]
        new_game: cli::NewGameArgs,
    },

    /// Load a saved game, then play
    Load {
        /// Player name of the saved game
        #[arg(short, long)]
        name: Option<String>,
    },

    /// List saved games
    List,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let session = cli::Session {
        save_dir: args.save_dir,
        ollama_url: args.ollama_url,
        seed: args.seed,
        clear_screen: !args.no_clear,
    };

    let command = args.command.unwrap_or_else(|| Commands::Play {
        new_game: cli::NewGameArgs::default(),
    });

    let result = match command {
        Commands::Play { new_game } => cli::play::execute(&session, &new_game),
        Commands::New { name, new_game } => {
            cli::new_game::execute(&session, &new_game, name.as_deref())
        }
        Commands::Load { name } => cli::load::execute(&session, name.as_deref()),
        Commands::List => cli::list::execute(&session),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
