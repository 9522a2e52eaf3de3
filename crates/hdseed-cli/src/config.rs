//! CLI configuration

use hdseed_core::{
    entropy::DEFAULT_STRENGTH, MnemonicCodec, Network, Wordlist, DEFAULT_BITCOIN_PATH,
    DEFAULT_ETHEREUM_PATH,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Entropy strength in bits for `generate`
    pub strength: u32,

    /// Network used for P2PKH addresses and extended key prefixes
    pub network: Network,

    /// Custom 2048-word dictionary (bundled English list when unset)
    pub wordlist_path: Option<PathBuf>,

    /// Derivation path for the Ethereum account
    pub ethereum_path: String,

    /// Derivation path for the Bitcoin account
    pub bitcoin_path: String,

    /// Print Ethereum addresses with EIP-55 mixed-case checksums
    pub eip55: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            strength: DEFAULT_STRENGTH,
            network: Network::Mainnet,
            wordlist_path: None,
            ethereum_path: DEFAULT_ETHEREUM_PATH.to_string(),
            bitcoin_path: DEFAULT_BITCOIN_PATH.to_string(),
            eip55: false,
        }
    }
}

impl CliConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Build the mnemonic codec for the configured dictionary
    pub fn codec(&self) -> Result<MnemonicCodec> {
        let wordlist = match &self.wordlist_path {
            Some(path) => Wordlist::from_file(path)?,
            None => Wordlist::english()?,
        };
        Ok(MnemonicCodec::new(wordlist))
    }
}
