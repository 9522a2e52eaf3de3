//! Command results and their human-readable rendering

use hdseed_core::Network;
use serde::Serialize;
use std::fmt;

/// Keys and address for one derived account
#[derive(Debug, Clone, Serialize)]
pub struct AccountReport {
    pub path: String,
    pub private_key: String,
    pub public_key: String,
    pub address: String,
}

/// Output of `hdseed generate`
#[derive(Debug, Clone, Serialize)]
pub struct GenerateReport {
    pub strength: u32,
    pub mnemonic: String,
    pub seed: String,
    pub master_private_key: String,
    pub master_chain_code: String,
    pub master_xprv: String,
    pub ethereum: AccountReport,
    pub bitcoin: AccountReport,
}

/// Output of `hdseed derive`
#[derive(Debug, Clone, Serialize)]
pub struct DeriveReport {
    pub path: String,
    pub depth: u32,
    pub child_number: u32,
    pub fingerprint: String,
    pub parent_fingerprint: String,
    pub private_key: String,
    pub chain_code: String,
    pub public_key: String,
    pub xprv: String,
    pub xpub: String,
    pub ethereum_address: String,
    pub bitcoin_address: String,
}

/// Output of `hdseed validate`
#[derive(Debug, Clone, Serialize)]
pub struct ValidateReport {
    pub valid: bool,
    pub word_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Output of `hdseed inspect`
#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub address: String,
    pub version: u8,
    pub network: Option<Network>,
    pub hash160: String,
}

/// Output of `hdseed config init`
#[derive(Debug, Clone, Serialize)]
pub struct ConfigReport {
    pub path: String,
}

/// Result of any command
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Report {
    Generate(GenerateReport),
    Derive(DeriveReport),
    Validate(ValidateReport),
    Inspect(InspectReport),
    Config(ConfigReport),
}

impl Report {
    /// Whether the process should exit successfully after printing
    pub fn is_success(&self) -> bool {
        match self {
            Report::Validate(report) => report.valid,
            _ => true,
        }
    }

    /// Render as pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for AccountReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Path: {}", self.path)?;
        writeln!(f, "  Private Key: 0x{}", self.private_key)?;
        writeln!(f, "  Public Key: 0x{}", self.public_key)?;
        write!(f, "  Address: {}", self.address)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Generate(r) => {
                writeln!(f, "\n=== Mnemonic Generated ({} bits) ===\n", r.strength)?;
                writeln!(f, "Mnemonic: {}", r.mnemonic)?;
                writeln!(f, "Seed: 0x{}", r.seed)?;
                writeln!(f, "\nMaster Key:")?;
                writeln!(f, "  Private Key: 0x{}", r.master_private_key)?;
                writeln!(f, "  Chain Code: 0x{}", r.master_chain_code)?;
                writeln!(f, "  xprv: {}", r.master_xprv)?;
                writeln!(f, "\nEthereum Account:")?;
                writeln!(f, "{}", r.ethereum)?;
                writeln!(f, "\nBitcoin Account:")?;
                writeln!(f, "{}", r.bitcoin)?;
                write!(
                    f,
                    "\n⚠️  Write down or securely store the mnemonic, then clear your terminal."
                )
            }
            Report::Derive(r) => {
                writeln!(f, "Derived Key:")?;
                writeln!(f, "  Path: {}", r.path)?;
                writeln!(f, "  Depth: {}", r.depth)?;
                writeln!(f, "  Child Number: {}", r.child_number)?;
                writeln!(f, "  Fingerprint: {}", r.fingerprint)?;
                writeln!(f, "  Parent Fingerprint: {}", r.parent_fingerprint)?;
                writeln!(f, "  Private Key: 0x{}", r.private_key)?;
                writeln!(f, "  Chain Code: 0x{}", r.chain_code)?;
                writeln!(f, "  Public Key: 0x{}", r.public_key)?;
                writeln!(f, "  xprv: {}", r.xprv)?;
                writeln!(f, "  xpub: {}", r.xpub)?;
                writeln!(f, "\nAddresses:")?;
                writeln!(f, "  Ethereum: {}", r.ethereum_address)?;
                write!(f, "  Bitcoin (P2PKH): {}", r.bitcoin_address)
            }
            Report::Validate(r) => match &r.error {
                None => write!(f, "✓ Mnemonic is valid ({} words)", r.word_count),
                Some(error) => write!(f, "✗ Mnemonic is invalid: {}", error),
            },
            Report::Inspect(r) => {
                writeln!(f, "Address: {}", r.address)?;
                match r.network {
                    Some(network) => writeln!(f, "  Version: 0x{:02x} ({})", r.version, network)?,
                    None => writeln!(f, "  Version: 0x{:02x} (unknown)", r.version)?,
                }
                write!(f, "  HASH160: {}", r.hash160)
            }
            Report::Config(r) => write!(f, "✓ Default config written to {}", r.path),
        }
    }
}
