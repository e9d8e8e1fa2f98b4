//! Line-oriented terminal prompts.

use std::io::{self, BufRead, Write};
use std::ops::RangeInclusive;

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};

/// Asks questions on `output` and reads answers from `input`.
#[derive(Debug)]
pub(crate) struct Prompter<R, W> {
    input: R,
    output: W,
    clear_screen: bool,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Create a prompter. `clear_screen` enables [`Prompter::clear`].
    pub(crate) fn new(input: R, output: W, clear_screen: bool) -> Self {
        Self {
            input,
            output,
            clear_screen,
        }
    }

    /// Print a line.
    pub(crate) fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Print `question` and read one answer, without its line ending or
    /// surrounding whitespace.
    ///
    /// End of input is an [`io::ErrorKind::UnexpectedEof`] error.
    pub(crate) fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim().to_string())
    }

    /// Yes/no question; only `Y` means yes.
    pub(crate) fn confirm(&mut self, question: &str) -> io::Result<bool> {
        self.say("Enter 'Y' for yes.")?;
        self.say("Enter anything else for no.")?;
        Ok(self.ask(question)? == "Y")
    }

    /// Ask for a number in `range`, re-asking until one is given.
    pub(crate) fn choose_number(
        &mut self,
        question: &str,
        range: RangeInclusive<usize>,
    ) -> io::Result<usize> {
        let mut answer = self.ask(question)?;
        loop {
            if let Ok(n) = answer.parse::<usize>()
                && range.contains(&n)
            {
                return Ok(n);
            }
            answer = self.ask(&format!("Sorry, invalid input! {question}"))?;
        }
    }

    /// Clear the terminal, if enabled.
    pub(crate) fn clear(&mut self) -> io::Result<()> {
        if self.clear_screen {
            execute!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }
}

#[cfg(test)]
impl<R> Prompter<R, Vec<u8>> {
    /// Everything written so far.
    pub(crate) fn printed(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}
