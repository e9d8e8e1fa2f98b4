//! Crate-level error type.

use crate::llm::LlmError;
use crate::save::SaveError;

/// Anything that can go wrong outside of pure game rules.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading or writing a save file failed.
    #[error(transparent)]
    Save(#[from] SaveError),
    /// Generating flavor text failed.
    #[error(transparent)]
    Llm(#[from] LlmError),
    /// Terminal input or output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
