//! Error types for hdseed-core

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid entropy strength: {0} bits (must be a multiple of 32 between 128 and 256)")]
    InvalidStrength(u32),

    #[error("Invalid derivation path: {0}")]
    PathSyntax(String),

    #[error("Extended key depth {0} exceeds 255")]
    DepthExceeded(u32),

    #[error("Invalid scalar: {0}")]
    InvalidScalar(String),

    #[error("Invalid seed: {0}")]
    InvalidSeed(String),

    #[error("Mnemonic dictionary unavailable: {0}")]
    DictionaryUnavailable(String),

    #[error("Unknown mnemonic word: {0}")]
    UnknownWord(String),

    #[error("Invalid mnemonic word count: {0}")]
    InvalidWordCount(usize),

    #[error("Invalid mnemonic checksum")]
    InvalidChecksum,

    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Cryptographic error: {0}")]
    Crypto(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
