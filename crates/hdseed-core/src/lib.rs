//! hdseed Core - mnemonic, key tree and address derivation
//!
//! This crate turns random entropy into a BIP39 mnemonic, stretches the
//! mnemonic into a seed, derives a BIP32 key tree over secp256k1 and
//! encodes derived keys as Bitcoin P2PKH or Ethereum addresses.
//!
//! ```no_run
//! use hdseed_core::{address, Entropy, ExtendedKey, MnemonicCodec};
//!
//! # fn main() -> hdseed_core::Result<()> {
//! let codec = MnemonicCodec::english()?;
//! let mnemonic = codec.encode(&Entropy::generate(128)?)?;
//! let seed = mnemonic.to_seed("");
//!
//! let master = ExtendedKey::master(seed.as_bytes())?;
//! let account = master.derive_path_str("m/44'/60'/0'/0/0")?;
//! println!("{}", address::ethereum_address(account.private_key())?);
//! # Ok(())
//! # }
//! ```

pub mod address;
pub mod crypto;
pub mod entropy;
pub mod error;
pub mod hd;
pub mod mnemonic;
pub mod seed;
pub mod types;
pub mod wordlist;

pub use crypto::PublicKey;
pub use entropy::Entropy;
pub use error::{Error, Result};
pub use hd::{ChildIndex, DerivationPath, ExtendedKey, HARDENED_OFFSET};
pub use mnemonic::{Mnemonic, MnemonicCodec};
pub use seed::Seed;
pub use types::Network;
pub use wordlist::Wordlist;

/// Default Ethereum account path (BIP44, coin type 60)
pub const DEFAULT_ETHEREUM_PATH: &str = "m/44'/60'/0'/0/0";

/// Default Bitcoin account path (BIP44, coin type 0)
pub const DEFAULT_BITCOIN_PATH: &str = "m/44'/0'/0'/0/0";
