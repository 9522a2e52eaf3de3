//! CLI command implementations

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};

use hdseed_core::{
    address::{decode_p2pkh, ethereum_address_from_public_key, p2pkh_address, to_checksum_address},
    DerivationPath, Entropy, ExtendedKey, Network, PublicKey,
};

use crate::config::CliConfig;
use crate::report::{
    AccountReport, ConfigReport, DeriveReport, GenerateReport, InspectReport, Report,
    ValidateReport,
};

/// hdseed - mnemonic, key tree and address derivation
#[derive(Parser)]
#[command(name = "hdseed")]
#[command(about = "BIP39 mnemonics, BIP32 key derivation and address encoding")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a JSON config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use testnet address and extended key prefixes
    #[arg(long, global = true)]
    pub testnet: bool,

    /// Print Ethereum addresses with EIP-55 checksum casing
    #[arg(long, global = true)]
    pub eip55: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a new mnemonic and derive the default accounts
    Generate {
        /// Entropy strength in bits (128, 160, 192, 224 or 256)
        #[arg(long)]
        strength: Option<u32>,

        /// Optional BIP39 passphrase
        #[arg(long, default_value = "")]
        passphrase: String,
    },

    /// Derive a key and addresses from an existing mnemonic
    Derive {
        /// Mnemonic phrase (quoted)
        #[arg(long)]
        mnemonic: String,

        /// Optional BIP39 passphrase
        #[arg(long, default_value = "")]
        passphrase: String,

        /// Derivation path, e.g. "m/44'/60'/0'/0/0" (config Ethereum path when omitted)
        #[arg(long)]
        path: Option<String>,
    },

    /// Check a mnemonic's words and checksum
    Validate {
        /// Mnemonic phrase (quoted)
        #[arg(long)]
        mnemonic: String,
    },

    /// Decode a P2PKH address
    Inspect {
        /// Base58Check address
        #[arg(long)]
        address: String,
    },

    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write the default configuration
    Init {
        /// Output path for the config file
        #[arg(long)]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// Load the config file and apply flag overrides
    pub fn resolve_config(&self) -> anyhow::Result<CliConfig> {
        let mut config = CliConfig::load_or_default(self.config.as_deref())
            .with_context(|| format!("failed to load config {:?}", self.config))?;

        if self.testnet {
            config.network = Network::Testnet;
        }
        if self.eip55 {
            config.eip55 = true;
        }

        Ok(config)
    }
}

/// Run the CLI
pub fn run(cli: Cli) -> anyhow::Result<Report> {
    let config = cli.resolve_config()?;
    debug!(network = %config.network, "Resolved configuration");

    match cli.command {
        Commands::Generate {
            strength,
            passphrase,
        } => generate(&config, strength.unwrap_or(config.strength), &passphrase),

        Commands::Derive {
            mnemonic,
            passphrase,
            path,
        } => {
            let path = path.unwrap_or_else(|| config.ethereum_path.clone());
            derive(&config, &mnemonic, &passphrase, &path)
        }

        Commands::Validate { mnemonic } => validate(&config, &mnemonic),

        Commands::Inspect { address } => inspect(&address),

        Commands::Config {
            command: ConfigCommands::Init { output, force },
        } => {
            if output.exists() && !force {
                bail!(
                    "{} already exists. Refusing to overwrite (use --force)",
                    output.display()
                );
            }
            CliConfig::default()
                .save(&output)
                .with_context(|| format!("failed to write {}", output.display()))?;
            info!("Config written to {:?}", output);

            Ok(Report::Config(ConfigReport {
                path: output.display().to_string(),
            }))
        }
    }
}

fn generate(config: &CliConfig, strength: u32, passphrase: &str) -> anyhow::Result<Report> {
    let codec = config.codec().context("failed to load wordlist")?;

    info!("Generating {}-bit mnemonic...", strength);
    let entropy = Entropy::generate(strength)?;
    let mnemonic = codec.encode(&entropy)?;
    let seed = mnemonic.to_seed(passphrase);

    let master = ExtendedKey::master(seed.as_bytes()).context("failed to derive master key")?;
    let ethereum = ethereum_account(config, &master)?;
    let bitcoin = bitcoin_account(config, &master)?;

    Ok(Report::Generate(GenerateReport {
        strength,
        mnemonic: mnemonic.phrase(),
        seed: seed.to_hex(),
        master_private_key: hex::encode(master.private_key()),
        master_chain_code: hex::encode(master.chain_code()),
        master_xprv: master.to_xprv(config.network)?,
        ethereum,
        bitcoin,
    }))
}

fn derive(
    config: &CliConfig,
    phrase: &str,
    passphrase: &str,
    path: &str,
) -> anyhow::Result<Report> {
    let codec = config.codec().context("failed to load wordlist")?;
    let mnemonic = codec.parse(phrase).context("invalid mnemonic")?;
    let path: DerivationPath = path.parse()?;

    info!(%path, "Deriving key");
    let seed = mnemonic.to_seed(passphrase);
    let master = ExtendedKey::master(seed.as_bytes())?;
    let key = master.derive_path(&path)?;
    let public_key = key.public_key()?;

    Ok(Report::Derive(DeriveReport {
        path: path.to_string(),
        depth: key.depth(),
        child_number: key.child_number(),
        fingerprint: hex::encode(key.fingerprint()?),
        parent_fingerprint: hex::encode(key.parent_fingerprint()),
        private_key: hex::encode(key.private_key()),
        chain_code: hex::encode(key.chain_code()),
        public_key: public_key.to_hex(),
        xprv: key.to_xprv(config.network)?,
        xpub: key.to_xpub(config.network)?,
        ethereum_address: format_ethereum(config, &public_key)?,
        bitcoin_address: p2pkh_address(&public_key, config.network),
    }))
}

fn validate(config: &CliConfig, phrase: &str) -> anyhow::Result<Report> {
    let codec = config.codec().context("failed to load wordlist")?;
    let word_count = phrase.split_whitespace().count();

    let error = codec.validate(phrase).err().map(|e| e.to_string());
    Ok(Report::Validate(ValidateReport {
        valid: error.is_none(),
        word_count,
        error,
    }))
}

fn inspect(address: &str) -> anyhow::Result<Report> {
    let (version, hash) = decode_p2pkh(address)?;

    Ok(Report::Inspect(InspectReport {
        address: address.to_string(),
        version,
        network: Network::from_p2pkh_version(version),
        hash160: hex::encode(hash),
    }))
}

fn ethereum_account(config: &CliConfig, master: &ExtendedKey) -> anyhow::Result<AccountReport> {
    let key = master
        .derive_path_str(&config.ethereum_path)
        .with_context(|| format!("failed to derive {}", config.ethereum_path))?;
    let public_key = key.public_key()?;

    Ok(AccountReport {
        path: config.ethereum_path.clone(),
        private_key: hex::encode(key.private_key()),
        public_key: public_key.to_hex(),
        address: format_ethereum(config, &public_key)?,
    })
}

fn bitcoin_account(config: &CliConfig, master: &ExtendedKey) -> anyhow::Result<AccountReport> {
    let key = master
        .derive_path_str(&config.bitcoin_path)
        .with_context(|| format!("failed to derive {}", config.bitcoin_path))?;
    let public_key = key.public_key()?;

    Ok(AccountReport {
        path: config.bitcoin_path.clone(),
        private_key: hex::encode(key.private_key()),
        public_key: public_key.to_hex(),
        address: p2pkh_address(&public_key, config.network),
    })
}

fn format_ethereum(config: &CliConfig, public_key: &PublicKey) -> anyhow::Result<String> {
    let address = ethereum_address_from_public_key(public_key);
    if config.eip55 {
        Ok(to_checksum_address(&address)?)
    } else {
        Ok(address)
    }
}
