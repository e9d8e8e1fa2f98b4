//! Save files.
//!
//! Each game is stored in its own file, named after the player, inside a save
//! directory. Files start with a 4-byte magic and a version byte, followed by
//! the LZ4-compressed bincode encoding of [`SavedGame`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bincode::Options;
use rand::Rng;

use crate::game::{GameConfig, GenerationProgress, SavedGame};
use crate::llm::NameSource;

/// Magic bytes for file format identification.
const MAGIC: &[u8; 4] = b"OBGS";

/// Current format version.
const VERSION: u8 = 1;

/// Upper bound on a decoded save, guarding against corrupt size prefixes.
const MAX_SAVE_BYTES: u64 = 256 * 1024 * 1024;

/// Default directory for save files, relative to the working directory.
pub const DEFAULT_SAVE_DIR: &str = "saved";

/// Errors from reading or writing save files.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// The player name cannot be used as a file name.
    #[error("invalid player name {0:?}")]
    InvalidName(String),
    /// A save with this name already exists.
    #[error("player name {0} already exists")]
    AlreadyExists(String),
    /// No save with this name exists.
    #[error("no saved game for {0}")]
    NotFound(String),
    /// File system failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The file does not start with the save magic.
    #[error("not a saved game file")]
    BadMagic,
    /// The file was written by an incompatible version.
    #[error("unsupported save version: {0}")]
    UnsupportedVersion(u8),
    /// The payload could not be decoded.
    #[error("corrupt save data: {0}")]
    Corrupt(String),
}

fn codec() -> impl Options {
    bincode::DefaultOptions::new().with_limit(MAX_SAVE_BYTES)
}

/// Check that `name` can be used as a save file name.
///
/// # Errors
///
/// Returns [`SaveError::InvalidName`] for empty names, `.`/`..`, and names
/// containing path separators or NUL.
pub fn validate_name(name: &str) -> Result<(), SaveError> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);
    if bad {
        return Err(SaveError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Path of the save file for `name` inside `dir`.
///
/// # Errors
///
/// Returns an error if the name is invalid.
pub fn save_path(dir: &Path, name: &str) -> Result<PathBuf, SaveError> {
    validate_name(name)?;
    Ok(dir.join(name))
}

/// Whether `name` is taken in `dir`. Any entry counts, directories included.
#[must_use]
pub fn save_exists(dir: &Path, name: &str) -> bool {
    save_path(dir, name).is_ok_and(|p| p.exists())
}

/// Encode a game into the save file format.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode(game: &SavedGame) -> Result<Vec<u8>, SaveError> {
    let encoded = codec()
        .serialize(game)
        .map_err(|e| SaveError::Corrupt(e.to_string()))?;
    let compressed = lz4_flex::compress_prepend_size(&encoded);

    let mut bytes = Vec::with_capacity(MAGIC.len() + 1 + compressed.len());
    bytes.extend_from_slice(MAGIC);
    bytes.push(VERSION);
    bytes.extend_from_slice(&compressed);
    Ok(bytes)
}

/// Decode a game from the save file format.
///
/// # Errors
///
/// Returns an error if the magic, version or payload is wrong.
pub fn decode(bytes: &[u8]) -> Result<SavedGame, SaveError> {
    let Some(rest) = bytes.strip_prefix(MAGIC.as_slice()) else {
        return Err(SaveError::BadMagic);
    };
    let Some((&version, compressed)) = rest.split_first() else {
        return Err(SaveError::Corrupt("missing version".to_string()));
    };
    if version != VERSION {
        return Err(SaveError::UnsupportedVersion(version));
    }

    // The LZ4 frame starts with the decompressed size; check it before allocating.
    let Some(size_prefix) = compressed.get(..4) else {
        return Err(SaveError::Corrupt("truncated payload".to_string()));
    };
    let mut size = [0u8; 4];
    size.copy_from_slice(size_prefix);
    if u64::from(u32::from_le_bytes(size)) > MAX_SAVE_BYTES {
        return Err(SaveError::Corrupt("payload too large".to_string()));
    }

    let decompressed = lz4_flex::decompress_size_prepended(compressed)
        .map_err(|e| SaveError::Corrupt(e.to_string()))?;
    codec()
        .deserialize(&decompressed)
        .map_err(|e| SaveError::Corrupt(e.to_string()))
}

/// Write a game to `dir`, under its player name.
///
/// Creates the directory if needed and overwrites any previous save.
///
/// # Errors
///
/// Returns an error if the name is invalid or file I/O fails.
pub fn save_game(dir: &Path, game: &SavedGame) -> Result<PathBuf, SaveError> {
    let path = save_path(dir, &game.player_name)?;
    let bytes = encode(game)?;
    fs::create_dir_all(dir)?;
    fs::write(&path, bytes)?;
    Ok(path)
}

/// Read the game saved under `name` in `dir`.
///
/// # Errors
///
/// Returns [`SaveError::NotFound`] if there is no such save, or a format
/// error if the file is damaged.
pub fn load_game(dir: &Path, name: &str) -> Result<SavedGame, SaveError> {
    let path = save_path(dir, name)?;
    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(SaveError::NotFound(name.to_string()));
        }
        Err(e) => return Err(e.into()),
    };
    decode(&bytes)
}

/// Names of every save in `dir`, sorted. A missing directory has no saves.
///
/// # Errors
///
/// Returns an error if the directory exists but cannot be read.
pub fn list_saves(dir: &Path) -> Result<Vec<String>, SaveError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_file()
            && let Some(name) = entry.file_name().to_str()
        {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// Generate a new game for `name` and save it straight away.
///
/// Saving immediately reserves the name.
///
/// # Errors
///
/// Returns an error if the name is invalid or taken, name generation fails,
/// or the save cannot be written.
pub fn create_game<R, N>(
    dir: &Path,
    name: &str,
    config: &GameConfig,
    rng: &mut R,
    names: &mut N,
    progress: impl FnMut(GenerationProgress),
) -> crate::Result<SavedGame>
where
    R: Rng,
    N: NameSource + ?Sized,
{
    validate_name(name)?;
    if save_exists(dir, name) {
        return Err(SaveError::AlreadyExists(name.to_string()).into());
    }
    let game = SavedGame::generate(config, rng, name, names, progress)?;
    save_game(dir, &game)?;
    Ok(game)
}
