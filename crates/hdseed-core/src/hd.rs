//! Hierarchical Deterministic (HD) key derivation
//!
//! This module implements the BIP32 key tree over secp256k1: the master key
//! from a seed, one-step child derivation and derivation along a path.
//!
//! Normal (non-hardened) children are derived from the parent's
//! *uncompressed* 65-byte public key. Hardened children use
//! `0x00 || parent_key`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::{add_scalars, hash160, hmac_sha512, validate_private_key, PublicKey};
use crate::error::{Error, Result};
use crate::types::Network;

/// Indices at or above this value are hardened
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// BIP44 purpose field
pub const BIP44_PURPOSE: u32 = 44;

/// SLIP-44 coin type for Bitcoin
pub const COIN_BITCOIN: u32 = 0;

/// SLIP-44 coin type for Ethereum
pub const COIN_ETHEREUM: u32 = 60;

/// HMAC key for master key generation
const MASTER_HMAC_KEY: &[u8] = b"Bitcoin seed";

/// Size of a serialized extended key before Base58Check
const EXTENDED_KEY_SIZE: usize = 78;

/// HD derivation path component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChildIndex {
    /// Index value (below 2^31)
    index: u32,
    /// Whether this is a hardened derivation
    hardened: bool,
}

impl ChildIndex {
    /// Create a normal (non-hardened) component
    pub fn normal(index: u32) -> Result<Self> {
        check_index(index)?;
        Ok(Self {
            index,
            hardened: false,
        })
    }

    /// Create a hardened component
    pub fn hardened(index: u32) -> Result<Self> {
        check_index(index)?;
        Ok(Self {
            index,
            hardened: true,
        })
    }

    /// Get the value to use in derivation (adds 2^31 for hardened)
    pub fn value(&self) -> u32 {
        if self.hardened {
            self.index | HARDENED_OFFSET
        } else {
            self.index
        }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn is_hardened(&self) -> bool {
        self.hardened
    }
}

impl From<u32> for ChildIndex {
    fn from(value: u32) -> Self {
        Self {
            index: value & !HARDENED_OFFSET,
            hardened: value & HARDENED_OFFSET != 0,
        }
    }
}

impl fmt::Display for ChildIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hardened {
            write!(f, "{}'", self.index)
        } else {
            write!(f, "{}", self.index)
        }
    }
}

impl FromStr for ChildIndex {
    type Err = Error;

    /// Parse `digits`, optionally followed by `'`, `h` or `H` for hardened
    ///
    /// A bare numeral is a raw u32 index, so values at or above 2^31 are
    /// hardened as well.
    fn from_str(segment: &str) -> Result<Self> {
        let (digits, hardened) = match segment.strip_suffix(['\'', 'h', 'H']) {
            Some(digits) => (digits, true),
            None => (segment, false),
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::PathSyntax(format!("invalid segment '{}'", segment)));
        }

        let index: u32 = digits
            .parse()
            .map_err(|_| Error::PathSyntax(format!("index out of range in '{}'", segment)))?;

        if hardened {
            Self::hardened(index)
        } else {
            Ok(Self::from(index))
        }
    }
}

fn check_index(index: u32) -> Result<()> {
    if index >= HARDENED_OFFSET {
        return Err(Error::PathSyntax(format!(
            "index {} must be below 2^31",
            index
        )));
    }
    Ok(())
}

/// HD derivation path (e.g., m/44'/60'/0'/0/0)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DerivationPath {
    components: Vec<ChildIndex>,
}

impl DerivationPath {
    /// Create a new derivation path
    pub fn new(components: Vec<ChildIndex>) -> Self {
        Self { components }
    }

    /// The empty path `m`
    pub fn master() -> Self {
        Self::default()
    }

    /// Create a BIP44 path: m/44'/coin'/account'/change/index
    pub fn bip44(coin: u32, account: u32, change: u32, index: u32) -> Result<Self> {
        Ok(Self {
            components: vec![
                ChildIndex::hardened(BIP44_PURPOSE)?,
                ChildIndex::hardened(coin)?,
                ChildIndex::hardened(account)?,
                ChildIndex::normal(change)?,
                ChildIndex::normal(index)?,
            ],
        })
    }

    /// Extend this path by one component
    pub fn child(mut self, component: ChildIndex) -> Self {
        self.components.push(component);
        self
    }

    pub fn components(&self) -> &[ChildIndex] {
        &self.components
    }

    /// Raw 32-bit indices, hardened ones carrying the high bit
    pub fn values(&self) -> Vec<u32> {
        self.components.iter().map(ChildIndex::value).collect()
    }

    pub fn depth(&self) -> usize {
        self.components.len()
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for component in &self.components {
            write!(f, "/{}", component)?;
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut segments = s.trim().split('/');
        match segments.next() {
            Some("m") => {}
            _ => {
                return Err(Error::PathSyntax(format!(
                    "path '{}' must start with 'm'",
                    s
                )))
            }
        }

        let components = segments
            .map(ChildIndex::from_str)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { components })
    }
}

impl TryFrom<String> for DerivationPath {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<DerivationPath> for String {
    fn from(path: DerivationPath) -> Self {
        path.to_string()
    }
}

/// One node of the key tree: private key, chain code and its position
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ExtendedKey {
    /// Private key (32 bytes, big-endian scalar in [1, n-1])
    secret: [u8; 32],

    /// Chain code (32 bytes)
    chain_code: [u8; 32],

    #[zeroize(skip)]
    depth: u32,

    #[zeroize(skip)]
    parent_fingerprint: [u8; 4],

    #[zeroize(skip)]
    child_number: u32,
}

impl ExtendedKey {
    /// Create the master key from seed bytes
    ///
    /// `HMAC-SHA512(key = "Bitcoin seed", seed)`: the left half is the key,
    /// the right half the chain code.
    pub fn master(seed: &[u8]) -> Result<Self> {
        let mut output = hmac_sha512(MASTER_HMAC_KEY, &[seed])?;
        let (secret, chain_code) = split_halves(&output);
        output.zeroize();

        validate_private_key(&secret)?;
        debug!("Derived master key");

        Ok(Self {
            secret,
            chain_code,
            depth: 0,
            parent_fingerprint: [0u8; 4],
            child_number: 0,
        })
    }

    /// Derive one child key (CKDpriv)
    ///
    /// Indices at or above 2^31 are hardened.
    pub fn derive_child(&self, index: u32) -> Result<Self> {
        let index_bytes = index.to_be_bytes();
        let mut output = if index >= HARDENED_OFFSET {
            hmac_sha512(&self.chain_code, &[&[0u8], &self.secret, &index_bytes])?
        } else {
            let public_key = self.public_key()?;
            hmac_sha512(&self.chain_code, &[public_key.as_bytes(), &index_bytes])?
        };

        let (mut tweak, chain_code) = split_halves(&output);
        output.zeroize();

        let secret = add_scalars(&tweak, &self.secret);
        tweak.zeroize();

        Ok(Self {
            secret: secret?,
            chain_code,
            depth: self.depth.saturating_add(1),
            parent_fingerprint: self.fingerprint()?,
            child_number: index,
        })
    }

    /// Derive the descendant at `path`, folding [`derive_child`](Self::derive_child)
    /// over its components from left to right
    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self> {
        let mut current = self.clone();
        for component in path.components() {
            current = current.derive_child(component.value())?;
        }

        debug!(path = %path, depth = current.depth, "Derived key from path");
        Ok(current)
    }

    /// Parse `path` and derive the descendant it names
    pub fn derive_path_str(&self, path: &str) -> Result<Self> {
        self.derive_path(&path.parse()?)
    }

    /// Get the private key (use with caution!)
    pub fn private_key(&self) -> &[u8; 32] {
        &self.secret
    }

    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    /// Number of derivation steps from the master key
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn parent_fingerprint(&self) -> [u8; 4] {
        self.parent_fingerprint
    }

    /// Raw index this key was derived with (0 for the master)
    pub fn child_number(&self) -> u32 {
        self.child_number
    }

    /// Uncompressed public key for this node
    pub fn public_key(&self) -> Result<PublicKey> {
        PublicKey::from_private(&self.secret)
    }

    /// First 4 bytes of HASH160 of the compressed public key
    pub fn fingerprint(&self) -> Result<[u8; 4]> {
        let public_key = self.public_key()?;
        let hash = hash160(&public_key.to_compressed());
        Ok([hash[0], hash[1], hash[2], hash[3]])
    }

    /// Base58Check-encoded extended private key (xprv / tprv)
    ///
    /// Fails with [`Error::DepthExceeded`] past depth 255, which the
    /// one-byte depth field cannot represent.
    pub fn to_xprv(&self, network: Network) -> Result<String> {
        let mut key_data = [0u8; 33];
        key_data[1..].copy_from_slice(&self.secret);

        let payload = self.serialize(network.xprv_version(), &key_data);
        key_data.zeroize();

        let mut payload = payload?;
        let encoded = bs58::encode(&payload[..]).with_check().into_string();
        payload.zeroize();
        Ok(encoded)
    }

    /// Base58Check-encoded extended public key (xpub / tpub)
    pub fn to_xpub(&self, network: Network) -> Result<String> {
        let key_data = self.public_key()?.to_compressed();
        let payload = self.serialize(network.xpub_version(), &key_data)?;
        Ok(bs58::encode(&payload[..]).with_check().into_string())
    }

    fn serialize(&self, version: u32, key_data: &[u8; 33]) -> Result<[u8; EXTENDED_KEY_SIZE]> {
        let depth = u8::try_from(self.depth).map_err(|_| Error::DepthExceeded(self.depth))?;

        let mut payload = [0u8; EXTENDED_KEY_SIZE];
        payload[0..4].copy_from_slice(&version.to_be_bytes());
        payload[4] = depth;
        payload[5..9].copy_from_slice(&self.parent_fingerprint);
        payload[9..13].copy_from_slice(&self.child_number.to_be_bytes());
        payload[13..45].copy_from_slice(&self.chain_code);
        payload[45..78].copy_from_slice(key_data);
        Ok(payload)
    }
}

impl fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("depth", &self.depth)
            .field("parent_fingerprint", &hex::encode(self.parent_fingerprint))
            .field("child_number", &ChildIndex::from(self.child_number))
            .finish_non_exhaustive()
    }
}

fn split_halves(output: &[u8; 64]) -> ([u8; 32], [u8; 32]) {
    let mut left = [0u8; 32];
    let mut right = [0u8; 32];
    left.copy_from_slice(&output[..32]);
    right.copy_from_slice(&output[32..]);
    (left, right)
}
