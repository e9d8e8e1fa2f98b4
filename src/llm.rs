//! Flavor text from a language model.
//!
//! New games need a name for every upgrade and every place on the board. A
//! [`NameSource`] supplies them: [`OllamaClient`] asks a locally hosted
//! Ollama server, [`RandomNames`] makes up letter soup without a network.

mod offline;
mod ollama;

pub use offline::RandomNames;
pub use ollama::{DEFAULT_OLLAMA_URL, OllamaClient};

/// Models offered when starting a new game.
pub const MODELS: [&str; 18] = [
    "llama3.2",
    "llama3.2:1b",
    "llama3.1",
    "llama3.1:70b",
    "llama3.1:405b",
    "phi3",
    "phi3:medium",
    "gemma2:2b",
    "gemma2",
    "gemma2:27b",
    "mistral",
    "moondream",
    "neural-chat",
    "starling-lm",
    "codellama",
    "llama2-uncensored",
    "llava",
    "solar",
];

/// Prompt used to name an upgrade.
pub const UPGRADE_PROMPT: &str =
    "Please enter a good name of an upgrade (safe one word response only please)!";

/// Prompt used to name a place.
pub const PLACE_PROMPT: &str = "Please enter a name of a jungle, mountain, pirate cove, lake, \
                                forest, desert, harbor, sea, castle, island, or beach \
                                (include the place name only please)!";

/// Longest name kept from a model response, in characters.
const MAX_NAME_CHARS: usize = 40;

/// Errors from generating names.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The HTTP request failed or the server answered with an error status.
    #[error("request to {url} failed: {source}")]
    Http {
        /// URL that was requested.
        url: String,
        /// Underlying transport or status error.
        source: Box<ureq::Error>,
    },
    /// The server's answer was not the expected JSON.
    #[error("invalid response from Ollama: {0}")]
    Decode(#[from] serde_json::Error),
    /// The chosen model is not installed on the server.
    #[error("Cannot run {0}! Please manually pull {0} first!")]
    ModelNotPulled(String),
    /// The model kept answering with nothing usable.
    #[error("the model returned an empty response")]
    EmptyResponse,
}

/// Supplies names for upgrades and places.
pub trait NameSource {
    /// Name for a new upgrade.
    ///
    /// # Errors
    ///
    /// Returns an error if no name could be produced.
    fn upgrade_name(&mut self) -> Result<String, LlmError>;

    /// Name for a new place.
    ///
    /// # Errors
    ///
    /// Returns an error if no name could be produced.
    fn place_name(&mut self) -> Result<String, LlmError>;
}

/// Reduce a chatty model response to a bare name.
///
/// Keeps the first non-empty line, strips surrounding quotes, markdown and
/// punctuation, and caps the length. Returns `None` if nothing is left.
#[must_use]
pub fn clean_response(raw: &str) -> Option<String> {
    let line = raw.lines().map(str::trim).find(|l| !l.is_empty())?;
    let trimmed = line.trim_matches(|c: char| {
        c.is_whitespace() || matches!(c, '"' | '\'' | '*' | '`' | '.' | '!' | '#' | '_')
    });
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(MAX_NAME_CHARS).collect::<String>().trim_end().to_string())
}
