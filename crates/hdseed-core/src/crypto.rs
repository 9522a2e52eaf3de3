//! Cryptographic primitives for hdseed
//!
//! Curve arithmetic is delegated to `k256`; this module only exposes the
//! narrow surface the derivation pipeline needs: base-point multiplication,
//! scalar addition modulo the group order, and the hash functions.

use hmac::{Hmac, Mac};
use k256::{
    elliptic_curve::{sec1::ToEncodedPoint, PrimeField},
    Scalar, SecretKey,
};
use ripemd::Ripemd160;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};
use sha3::Keccak256;
use std::fmt;

use crate::error::{Error, Result};

/// secp256k1 group order n (big-endian)
pub const CURVE_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// Size of an uncompressed SEC1 public key
pub const UNCOMPRESSED_PUBLIC_KEY_SIZE: usize = 65;

/// Size of a compressed SEC1 public key
pub const COMPRESSED_PUBLIC_KEY_SIZE: usize = 33;

/// Uncompressed secp256k1 public key (`0x04 || X || Y`, 65 bytes)
///
/// Serialized as a hex string. Deserialization goes through
/// [`PublicKey::from_hex`], so only points on the curve are accepted.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PublicKey([u8; 65]);

impl PublicKey {
    /// Compute the public key for a 32-byte private scalar
    ///
    /// Fails with [`Error::InvalidScalar`] when the scalar is zero or not
    /// below the curve order.
    pub fn from_private(private_key: &[u8; 32]) -> Result<Self> {
        let secret = SecretKey::from_bytes(&(*private_key).into())
            .map_err(|_| Error::InvalidScalar("private key is zero or exceeds curve order".to_string()))?;

        let encoded = secret.public_key().to_encoded_point(false);
        let bytes: [u8; 65] = encoded
            .as_bytes()
            .try_into()
            .map_err(|_| Error::Crypto("Failed to encode uncompressed public key".to_string()))?;

        Ok(Self(bytes))
    }

    /// Parse any SEC1 encoding (compressed or uncompressed) of a curve point
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != UNCOMPRESSED_PUBLIC_KEY_SIZE && bytes.len() != COMPRESSED_PUBLIC_KEY_SIZE {
            return Err(Error::InvalidPublicKey(format!(
                "expected 33 or 65 bytes, got {}",
                bytes.len()
            )));
        }

        let point = k256::PublicKey::from_sec1_bytes(bytes)
            .map_err(|e| Error::InvalidPublicKey(e.to_string()))?;
        let encoded = point.to_encoded_point(false);
        let bytes: [u8; 65] = encoded
            .as_bytes()
            .try_into()
            .map_err(|_| Error::Crypto("Failed to encode uncompressed public key".to_string()))?;

        Ok(Self(bytes))
    }

    /// Parse from a hex string
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|e| Error::InvalidPublicKey(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Get the uncompressed bytes
    pub fn as_bytes(&self) -> &[u8; 65] {
        &self.0
    }

    /// The 64-byte `X || Y` body without the `0x04` prefix
    pub fn coordinates(&self) -> &[u8] {
        &self.0[1..]
    }

    /// Compressed SEC1 form: parity prefix of Y followed by X
    pub fn to_compressed(&self) -> [u8; 33] {
        let mut compressed = [0u8; 33];
        compressed[0] = 0x02 | (self.0[64] & 0x01);
        compressed[1..].copy_from_slice(&self.0[1..33]);
        compressed
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<String> for PublicKey {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::from_hex(&s)
    }
}

impl From<PublicKey> for String {
    fn from(public_key: PublicKey) -> Self {
        public_key.to_hex()
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PublicKey").field(&self.to_hex()).finish()
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Check that 32 bytes encode a nonzero scalar below the curve order
pub fn validate_private_key(bytes: &[u8; 32]) -> Result<()> {
    let scalar = parse_scalar(bytes)?;
    if bool::from(scalar.is_zero()) {
        return Err(Error::InvalidScalar("key is zero".to_string()));
    }
    Ok(())
}

/// Compute `(tweak + key) mod n` as 32 big-endian bytes
///
/// Rejects a tweak that is not below the curve order and a zero result.
pub fn add_scalars(tweak: &[u8; 32], key: &[u8; 32]) -> Result<[u8; 32]> {
    let tweak = parse_scalar(tweak)?;
    let key = parse_scalar(key)?;

    let sum = tweak + key;
    if bool::from(sum.is_zero()) {
        return Err(Error::InvalidScalar("derived key is zero".to_string()));
    }

    Ok(sum.to_bytes().into())
}

fn parse_scalar(bytes: &[u8; 32]) -> Result<Scalar> {
    Option::<Scalar>::from(Scalar::from_repr((*bytes).into()))
        .ok_or_else(|| Error::InvalidScalar("value is not below the curve order".to_string()))
}

/// Hash data using SHA256
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// SHA256 applied twice
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// RIPEMD160(SHA256(data))
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    hasher.update(sha256(data));
    hasher.finalize().into()
}

/// Original Keccak-256 (pre-NIST padding), as used by Ethereum
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// HMAC-SHA512 over the concatenation of `parts`
pub fn hmac_sha512(key: &[u8], parts: &[&[u8]]) -> Result<[u8; 64]> {
    let mut mac = Hmac::<Sha512>::new_from_slice(key)
        .map_err(|e| Error::Crypto(format!("HMAC key setup failed: {}", e)))?;
    for part in parts {
        mac.update(part);
    }

    let mut out = [0u8; 64];
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one() -> [u8; 32] {
        let mut key = [0u8; 32];
        key[31] = 1;
        key
    }

    #[test]
    fn test_generator_point() {
        let public_key = PublicKey::from_private(&one()).unwrap();
        assert_eq!(
            public_key.to_hex(),
            "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798\
             483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"
        );
        assert_eq!(public_key.as_bytes()[0], 0x04);
        assert_eq!(public_key.coordinates().len(), 64);
    }

    #[test]
    fn test_compressed_roundtrip() {
        let public_key = PublicKey::from_private(&[0x11; 32]).unwrap();
        let compressed = public_key.to_compressed();
        assert!(compressed[0] == 0x02 || compressed[0] == 0x03);

        let reparsed = PublicKey::from_slice(&compressed).unwrap();
        assert_eq!(reparsed, public_key);
    }

    #[test]
    fn test_invalid_private_keys() {
        assert!(matches!(
            PublicKey::from_private(&[0u8; 32]),
            Err(Error::InvalidScalar(_))
        ));
        assert!(matches!(
            PublicKey::from_private(&CURVE_ORDER),
            Err(Error::InvalidScalar(_))
        ));
        assert!(PublicKey::from_private(&[0xFF; 32]).is_err());
    }

    #[test]
    fn test_from_slice_rejects_bad_length() {
        assert!(matches!(
            PublicKey::from_slice(&[0x04; 64]),
            Err(Error::InvalidPublicKey(_))
        ));
    }

    #[test]
    fn test_serde_rejects_off_curve_point() {
        let public_key = PublicKey::from_private(&one()).unwrap();
        let json = serde_json::to_string(&public_key).unwrap();
        assert_eq!(json, format!("\"{}\"", public_key.to_hex()));
        assert_eq!(serde_json::from_str::<PublicKey>(&json).unwrap(), public_key);

        let mut off_curve = *public_key.as_bytes();
        off_curve[64] ^= 0x01;
        let json = format!("\"{}\"", hex::encode(off_curve));
        assert!(serde_json::from_str::<PublicKey>(&json).is_err());
    }

    #[test]
    fn test_add_scalars_wraps_modulo_order() {
        // (n - 1) + 2 = 1 mod n
        let mut n_minus_one = CURVE_ORDER;
        n_minus_one[31] -= 1;
        let mut two = [0u8; 32];
        two[31] = 2;

        assert_eq!(add_scalars(&two, &n_minus_one).unwrap(), one());
    }

    #[test]
    fn test_add_scalars_rejects_zero_and_overflow() {
        let mut n_minus_one = CURVE_ORDER;
        n_minus_one[31] -= 1;

        assert!(matches!(
            add_scalars(&one(), &n_minus_one),
            Err(Error::InvalidScalar(_))
        ));
        assert!(matches!(
            add_scalars(&CURVE_ORDER, &one()),
            Err(Error::InvalidScalar(_))
        ));
    }

    #[test]
    fn test_hash_vectors() {
        assert_eq!(
            hex::encode(sha256(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        // Keccak-256 differs from NIST SHA3-256 on the empty input
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
        assert_eq!(hash160(b"abc").len(), 20);
        assert_eq!(double_sha256(b"abc"), sha256(&sha256(b"abc")));
    }

    #[test]
    fn test_hmac_parts_concatenate() {
        let joined = hmac_sha512(b"key", &[b"hello world"]).unwrap();
        let split = hmac_sha512(b"key", &[b"hello", b" ", b"world"]).unwrap();
        assert_eq!(joined, split);
    }
}
