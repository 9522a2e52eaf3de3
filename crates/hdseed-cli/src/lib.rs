//! hdseed CLI - mnemonic generation, key derivation and address encoding
//!
//! Thin command layer over `hdseed-core`. Commands return a [`Report`]
//! that the binary prints as text or JSON.

pub mod commands;
pub mod config;
pub mod error;
pub mod report;

pub use commands::{run, Cli, Commands, ConfigCommands};
pub use config::CliConfig;
pub use error::CliError;
pub use report::Report;
