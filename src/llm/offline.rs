//! Names without a language model.

use rand::Rng;

use crate::llm::{LlmError, NameSource};

const LETTERS: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";

/// Produces capitalized names of 3 to 25 random letters.
///
/// Used when no Ollama server is available, and in tests.
#[derive(Debug, Clone)]
pub struct RandomNames<R> {
    rng: R,
}

impl<R: Rng> RandomNames<R> {
    /// Create a name source drawing from `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// A fresh random name.
    pub fn name(&mut self) -> String {
        let len = self.rng.gen_range(3..=25);
        let mut name = String::with_capacity(len);
        for i in 0..len {
            let letter = char::from(LETTERS[self.rng.gen_range(0..LETTERS.len())]);
            if i == 0 {
                name.push(letter.to_ascii_uppercase());
            } else {
                name.push(letter);
            }
        }
        name
    }
}

impl<R: Rng> NameSource for RandomNames<R> {
    fn upgrade_name(&mut self) -> Result<String, LlmError> {
        Ok(self.name())
    }

    fn place_name(&mut self) -> Result<String, LlmError> {
        Ok(self.name())
    }
}
