//! Address encoders for Bitcoin P2PKH and Ethereum

use tracing::debug;

use crate::crypto::{double_sha256, hash160, keccak256, PublicKey};
use crate::error::{Error, Result};
use crate::types::Network;

/// Version byte + HASH160 + 4-byte checksum
const P2PKH_PAYLOAD_SIZE: usize = 25;

/// Encode a public key as a Base58Check P2PKH address
///
/// `Base58(version || RIPEMD160(SHA256(pubkey)) || checksum)` where the
/// checksum is the first 4 bytes of the double SHA256 of the versioned hash.
pub fn p2pkh_address(public_key: &PublicKey, network: Network) -> String {
    encode_p2pkh(public_key.as_bytes(), network.p2pkh_version())
}

/// Encode raw SEC1 public key bytes (33 or 65) as a P2PKH address
///
/// The bytes are hashed as given, so a compressed key yields a different
/// address from its uncompressed form.
pub fn p2pkh_address_from_slice(public_key: &[u8], network: Network) -> Result<String> {
    let valid_prefix = match public_key.len() {
        65 => public_key[0] == 0x04,
        33 => public_key[0] == 0x02 || public_key[0] == 0x03,
        _ => false,
    };
    if !valid_prefix {
        return Err(Error::InvalidPublicKey(format!(
            "expected a 33 or 65 byte SEC1 key, got {} bytes",
            public_key.len()
        )));
    }

    Ok(encode_p2pkh(public_key, network.p2pkh_version()))
}

fn encode_p2pkh(public_key: &[u8], version: u8) -> String {
    let mut payload = [0u8; P2PKH_PAYLOAD_SIZE];
    payload[0] = version;
    payload[1..21].copy_from_slice(&hash160(public_key));

    let checksum = double_sha256(&payload[..21]);
    payload[21..].copy_from_slice(&checksum[..4]);

    let address = bs58::encode(payload).into_string();
    debug!(version, "Encoded P2PKH address");
    address
}

/// Decode a P2PKH address into its version byte and public key hash
///
/// The Base58Check checksum is verified.
pub fn decode_p2pkh(address: &str) -> Result<(u8, [u8; 20])> {
    let payload = bs58::decode(address)
        .with_check(None)
        .into_vec()
        .map_err(|e| Error::InvalidAddress(e.to_string()))?;

    // with_check strips the checksum, leaving version || hash160
    if payload.len() != 21 {
        return Err(Error::InvalidAddress(format!(
            "expected 21-byte payload, got {}",
            payload.len()
        )));
    }

    let mut hash = [0u8; 20];
    hash.copy_from_slice(&payload[1..]);
    Ok((payload[0], hash))
}

/// Ethereum address for a private key: `0x` + last 20 bytes of
/// `Keccak256(X || Y)`, lowercase
pub fn ethereum_address(private_key: &[u8; 32]) -> Result<String> {
    let public_key = PublicKey::from_private(private_key)?;
    Ok(ethereum_address_from_public_key(&public_key))
}

/// Ethereum address for an uncompressed public key
pub fn ethereum_address_from_public_key(public_key: &PublicKey) -> String {
    let hash = keccak256(public_key.coordinates());
    format!("0x{}", hex::encode(&hash[12..]))
}

/// Apply EIP-55 mixed-case checksum encoding to an Ethereum address
///
/// Each hex letter is uppercased when the matching nibble of
/// `Keccak256(lowercase_hex)` is 8 or more.
pub fn to_checksum_address(address: &str) -> Result<String> {
    let hex_part = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .unwrap_or(address);

    if hex_part.len() != 40 || !hex_part.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::InvalidAddress(format!(
            "'{}' is not a 20-byte hex address",
            address
        )));
    }

    let lower = hex_part.to_ascii_lowercase();
    let hash = keccak256(lower.as_bytes());

    let mut checksummed = String::with_capacity(42);
    checksummed.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let nibble = (hash[i / 2] >> (if i % 2 == 0 { 4 } else { 0 })) & 0x0f;
        if c.is_ascii_alphabetic() && nibble >= 8 {
            checksummed.push(c.to_ascii_uppercase());
        } else {
            checksummed.push(c);
        }
    }

    Ok(checksummed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::sha256;

    fn key_one() -> [u8; 32] {
        let mut key = [0u8; 32];
        key[31] = 1;
        key
    }

    #[test]
    fn test_p2pkh_known_address() {
        let public_key = PublicKey::from_private(&key_one()).unwrap();
        assert_eq!(
            p2pkh_address(&public_key, Network::Mainnet),
            "1EHNa6Q4Jz2uvNExL497mE43ikXhwF6kZm"
        );
        assert_eq!(
            p2pkh_address_from_slice(&public_key.to_compressed(), Network::Mainnet).unwrap(),
            "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH"
        );
    }

    #[test]
    fn test_p2pkh_decodes_with_valid_checksum() {
        let public_key = PublicKey::from_private(&[0x42; 32]).unwrap();
        let address = p2pkh_address(&public_key, Network::Mainnet);
        assert!(address.starts_with('1'));

        let (version, hash) = decode_p2pkh(&address).unwrap();
        assert_eq!(version, 0x00);
        assert_eq!(hash, hash160(public_key.as_bytes()));

        let raw = bs58::decode(&address).into_vec().unwrap();
        assert_eq!(raw.len(), 25);
        assert_eq!(&raw[21..], &sha256(&sha256(&raw[..21]))[..4]);
    }

    #[test]
    fn test_p2pkh_testnet_version() {
        let public_key = PublicKey::from_private(&key_one()).unwrap();
        let address = p2pkh_address(&public_key, Network::Testnet);
        let (version, _) = decode_p2pkh(&address).unwrap();
        assert_eq!(version, 0x6f);
        assert!(address.starts_with('m') || address.starts_with('n'));
    }

    #[test]
    fn test_p2pkh_rejects_malformed_key() {
        assert!(matches!(
            p2pkh_address_from_slice(&[0x04; 64], Network::Mainnet),
            Err(Error::InvalidPublicKey(_))
        ));
        assert!(matches!(
            p2pkh_address_from_slice(&[0x05; 65], Network::Mainnet),
            Err(Error::InvalidPublicKey(_))
        ));
    }

    #[test]
    fn test_decode_rejects_corrupted_address() {
        let mut address = p2pkh_address(
            &PublicKey::from_private(&key_one()).unwrap(),
            Network::Mainnet,
        );
        address.pop();
        address.push('X');
        assert!(matches!(decode_p2pkh(&address), Err(Error::InvalidAddress(_))));
    }

    #[test]
    fn test_ethereum_known_address() {
        assert_eq!(
            ethereum_address(&key_one()).unwrap(),
            "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
        );
    }

    #[test]
    fn test_ethereum_address_format() {
        let address = ethereum_address(&[0x24; 32]).unwrap();
        assert_eq!(address.len(), 42);
        assert!(address.starts_with("0x"));
        assert!(address[2..]
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_ethereum_rejects_invalid_scalar() {
        assert!(matches!(
            ethereum_address(&[0u8; 32]),
            Err(Error::InvalidScalar(_))
        ));
    }

    #[test]
    fn test_eip55_vectors() {
        for expected in [
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
            "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
            "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
        ] {
            let lower = expected.to_ascii_lowercase();
            assert_eq!(to_checksum_address(&lower).unwrap(), expected);
        }
    }

    #[test]
    fn test_eip55_rejects_bad_input() {
        assert!(to_checksum_address("0x1234").is_err());
        assert!(to_checksum_address(&format!("0x{}", "g".repeat(40))).is_err());
    }
}
