//! New game command implementation.

use std::io::{self, BufRead, Write};
use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use ollama_board_game::game::GenerationProgress;
use ollama_board_game::llm::{MODELS, NameSource, OllamaClient, RandomNames};
use ollama_board_game::{SavedGame, save};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::prompt::Prompter;
use super::{CliError, NewGameArgs, Session, list, play};

/// Ask which model to name things with.
fn choose_model<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> io::Result<String> {
    prompter.say("LLM Models:")?;
    for (i, model) in MODELS.iter().enumerate() {
        prompter.say(&format!("{}. {model}", i + 1))?;
    }
    let choice = prompter.choose_number(
        "Please enter the number of the LLM model you want to use: ",
        1..=MODELS.len(),
    )?;
    Ok(MODELS[choice - 1].to_string())
}

/// Ask for a player name that is valid and not yet taken.
fn ask_name<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    dir: &Path,
) -> Result<String, CliError> {
    let mut name = prompter.ask("Please enter player name: ")?;
    loop {
        if save::validate_name(&name).is_err() {
            name = prompter.ask("Sorry, invalid input! Please enter player name: ")?;
        } else if save::save_exists(dir, &name) {
            list::print_saves(prompter, &save::list_saves(dir)?)?;
            name = prompter.ask(&format!(
                "Sorry, player name {name} already exists! Enter another player name: "
            ))?;
        } else {
            return Ok(name);
        }
    }
}

/// Progress bar for board generation.
fn generation_bar() -> ProgressBar {
    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("valid template")
            .progress_chars("=>-"),
    );
    bar
}

fn show_progress(bar: &ProgressBar, progress: GenerationProgress) {
    match progress {
        GenerationProgress::Upgrade { named, total } => {
            bar.set_length(total as u64);
            bar.set_position(named as u64);
            bar.set_message("upgrades named");
        }
        GenerationProgress::Tile {
            laid,
            total,
            places,
        } => {
            bar.set_length(total as u64);
            bar.set_position(laid as u64);
            bar.set_message(format!("tiles laid, {places} places generated!"));
        }
    }
}

/// Set up and save a new game, asking for whatever `args` and `name` leave
/// open.
///
/// # Errors
///
/// Returns an error if the name is unusable, the model is not available,
/// name generation fails, or the game cannot be saved.
pub(crate) fn create<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    session: &Session,
    args: &NewGameArgs,
    name: Option<&str>,
    rng: &mut SmallRng,
) -> Result<SavedGame, CliError> {
    let dir = session.save_dir.as_path();
    if let Some(name) = name {
        save::validate_name(name)?;
        if save::save_exists(dir, name) {
            return Err(save::SaveError::AlreadyExists(name.to_string()).into());
        }
    }

    let mut names: Box<dyn NameSource> = if args.offline {
        Box::new(RandomNames::new(SmallRng::seed_from_u64(rng.gen_range(0..u64::MAX))))
    } else {
        let model = match &args.model {
            Some(model) => model.clone(),
            None => choose_model(prompter)?,
        };
        let client = OllamaClient::new(session.ollama_url.as_str(), model);
        client.ensure_model()?;
        prompter.say(&format!("Using LLM model {}.", client.model()))?;
        Box::new(client)
    };

    let name = match name {
        Some(name) => name.to_string(),
        None => {
            prompter.clear()?;
            ask_name(prompter, dir)?
        }
    };

    let config = args.config();
    let bar = generation_bar();
    let game = save::create_game(dir, &name, &config, rng, names.as_mut(), |progress| {
        show_progress(&bar, progress);
    });
    bar.finish_and_clear();
    let game = game?;

    prompter.say(&format!(
        "Created a board of {} tiles for {name}.",
        game.board.len()
    ))?;
    Ok(game)
}

/// Execute the new command.
///
/// # Errors
///
/// Returns an error if setup fails, input closes, or saving fails.
pub(crate) fn execute(
    session: &Session,
    args: &NewGameArgs,
    name: Option<&str>,
) -> Result<(), CliError> {
    let mut prompter = session.terminal();
    let mut rng = session.rng();
    let mut game = create(&mut prompter, session, args, name, &mut rng)?;
    play::run(&mut prompter, &mut game, &session.save_dir, &mut rng, &args.config())
}
