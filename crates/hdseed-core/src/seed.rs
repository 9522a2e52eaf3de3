//! Mnemonic-to-seed stretching (PBKDF2-HMAC-SHA512)

use sha2::Sha512;
use std::fmt;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};

/// PBKDF2 iteration count fixed by BIP39
pub const PBKDF2_ROUNDS: u32 = 2048;

/// Seed size in bytes
pub const SEED_SIZE: usize = 64;

const SALT_PREFIX: &str = "mnemonic";

/// 64-byte BIP39 seed
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; SEED_SIZE]);

impl Seed {
    /// Derive the seed for a mnemonic phrase and optional passphrase
    ///
    /// The salt is `"mnemonic" || passphrase`. Both strings are used as
    /// their UTF-8 bytes, unnormalized.
    pub fn from_mnemonic(mnemonic: &str, passphrase: &str) -> Self {
        let mut salt = String::with_capacity(SALT_PREFIX.len() + passphrase.len());
        salt.push_str(SALT_PREFIX);
        salt.push_str(passphrase);

        let mut seed = [0u8; SEED_SIZE];
        pbkdf2::pbkdf2_hmac::<Sha512>(mnemonic.as_bytes(), salt.as_bytes(), PBKDF2_ROUNDS, &mut seed);
        salt.zeroize();

        debug!(rounds = PBKDF2_ROUNDS, "Derived seed from mnemonic");
        Self(seed)
    }

    /// Wrap raw seed bytes
    pub fn from_bytes(bytes: [u8; SEED_SIZE]) -> Self {
        Self(bytes)
    }

    /// Parse from a hex string
    pub fn from_hex(s: &str) -> Result<Self> {
        let mut bytes = [0u8; SEED_SIZE];
        hex::decode_to_slice(s, &mut bytes).map_err(|e| Error::InvalidSeed(e.to_string()))?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; SEED_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl AsRef<[u8]> for Seed {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABANDON_ABOUT: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_seed_without_passphrase() {
        let seed = Seed::from_mnemonic(ABANDON_ABOUT, "");
        assert_eq!(
            seed.to_hex(),
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc1\
             9a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
        );
    }

    #[test]
    fn test_seed_with_passphrase() {
        let seed = Seed::from_mnemonic(ABANDON_ABOUT, "TREZOR");
        assert_eq!(
            seed.to_hex(),
            "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e5349553\
             1f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04"
        );
    }

    #[test]
    fn test_seed_is_deterministic() {
        let a = Seed::from_mnemonic("any text at all", "pass");
        let b = Seed::from_mnemonic("any text at all", "pass");
        assert_eq!(a, b);
        assert_ne!(a, Seed::from_mnemonic("any text at all", "Pass"));
    }

    #[test]
    fn test_hex_roundtrip() {
        let seed = Seed::from_mnemonic(ABANDON_ABOUT, "");
        assert_eq!(Seed::from_hex(&seed.to_hex()).unwrap(), seed);
        assert!(matches!(Seed::from_hex("00ff"), Err(Error::InvalidSeed(_))));
        assert!(matches!(
            Seed::from_hex(&"zz".repeat(SEED_SIZE)),
            Err(Error::InvalidSeed(_))
        ));
    }
}
