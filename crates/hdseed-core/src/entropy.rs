//! Entropy generation
//!
//! Entropy is the root of every derived value. Its length is validated
//! once at construction so that nothing downstream has to re-check it.

use rand::{rngs::OsRng, CryptoRng, RngCore};
use std::fmt;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};

/// Entropy strengths accepted by BIP39, in bits
pub const SUPPORTED_STRENGTHS: [u32; 5] = [128, 160, 192, 224, 256];

/// Strength used when the caller has no preference
pub const DEFAULT_STRENGTH: u32 = 128;

/// Random entropy of a BIP39 strength (128 to 256 bits in steps of 32)
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Entropy(Vec<u8>);

impl Entropy {
    /// Generate `strength_bits` of entropy from the operating system RNG
    pub fn generate(strength_bits: u32) -> Result<Self> {
        Self::generate_with(&mut OsRng, strength_bits)
    }

    /// Generate entropy from a caller-supplied cryptographic RNG
    pub fn generate_with<R: RngCore + CryptoRng>(rng: &mut R, strength_bits: u32) -> Result<Self> {
        check_strength(strength_bits)?;

        let mut bytes = vec![0u8; (strength_bits / 8) as usize];
        rng.fill_bytes(&mut bytes);

        debug!(strength_bits, "Generated entropy");
        Ok(Self(bytes))
    }

    /// Wrap existing entropy bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bits = u32::try_from(bytes.len().saturating_mul(8)).unwrap_or(u32::MAX);
        check_strength(bits)?;
        Ok(Self(bytes.to_vec()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length in bits (ENT)
    pub fn bits(&self) -> usize {
        self.0.len() * 8
    }

    /// Checksum length in bits (ENT / 32)
    pub fn checksum_bits(&self) -> usize {
        self.bits() / 32
    }

    /// Number of mnemonic words this entropy encodes to
    pub fn word_count(&self) -> usize {
        (self.bits() + self.checksum_bits()) / 11
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl fmt::Debug for Entropy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entropy({} bits)", self.bits())
    }
}

fn check_strength(strength_bits: u32) -> Result<()> {
    if strength_bits % 32 != 0 || !SUPPORTED_STRENGTHS.contains(&strength_bits) {
        return Err(Error::InvalidStrength(strength_bits));
    }
    Ok(())
}
