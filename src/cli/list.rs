//! List command implementation.

use std::io::{self, BufRead, Write};
use std::path::Path;

use ollama_board_game::save;

use super::prompt::Prompter;
use super::{CliError, Session};

/// Print a numbered list of saved games.
pub(super) fn print_saves<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    saves: &[String],
) -> io::Result<()> {
    prompter.say("Below is a list of existing saved game files:\n")?;
    for (i, name) in saves.iter().enumerate() {
        prompter.say(&format!("{}. {name}", i + 1))?;
    }
    Ok(())
}

/// Format the save listing for `dir`.
fn format_list(saves: &[String], dir: &Path) -> String {
    if saves.is_empty() {
        return format!("No saved games in {}.\n", dir.display());
    }
    let mut output = String::new();
    for name in saves {
        output.push_str(name);
        output.push('\n');
    }
    output
}

/// Execute the list command.
///
/// # Errors
///
/// Returns an error if the save directory cannot be read.
pub(crate) fn execute(session: &Session) -> Result<(), CliError> {
    let saves = save::list_saves(&session.save_dir)?;
    print!("{}", format_list(&saves, &session.save_dir));
    Ok(())
}
