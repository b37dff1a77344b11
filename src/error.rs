//! Crate error type

use thiserror::Error;

/// Errors from persistence, configuration and the terminal collaborators.
/// The simulation itself is total.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("profile encoding failed: {0}")]
    Encode(#[from] bincode::Error),

    #[error("settings file is invalid: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("could not determine a home directory for game data")]
    NoHomeDir,

    #[error("required asset missing: {0}")]
    MissingAsset(String),
}

pub type Result<T> = std::result::Result<T, Error>;
