//! Error types for the game.

use thiserror::Error;

/// Everything that can go wrong outside the simulation core.
///
/// All of these are startup or terminal failures. Apart from a missing audio
/// device, which falls back to the bell, they bubble up to `main` and end
/// the process.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("missing asset: {0}")]
    MissingAsset(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("could not parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("no audio output: {0}")]
    Audio(#[from] rodio::StreamError),

    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
