//! Error types for the hdseed CLI

use thiserror::Error;

/// CLI errors that are not raised by the core library
#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] hdseed_core::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
