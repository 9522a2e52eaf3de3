//! Network parameters shared across modules

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bitcoin-style network selector
///
/// Chooses the P2PKH version byte and the BIP32 extended key version prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    /// Version byte prepended to the HASH160 in a P2PKH address
    pub fn p2pkh_version(&self) -> u8 {
        match self {
            Network::Mainnet => 0x00,
            Network::Testnet => 0x6f,
        }
    }

    /// Version prefix of a serialized extended private key (xprv / tprv)
    pub fn xprv_version(&self) -> u32 {
        match self {
            Network::Mainnet => 0x0488_ADE4,
            Network::Testnet => 0x0435_8394,
        }
    }

    /// Version prefix of a serialized extended public key (xpub / tpub)
    pub fn xpub_version(&self) -> u32 {
        match self {
            Network::Mainnet => 0x0488_B21E,
            Network::Testnet => 0x0435_87CF,
        }
    }

    /// Look up the network a P2PKH version byte belongs to
    pub fn from_p2pkh_version(version: u8) -> Option<Self> {
        match version {
            0x00 => Some(Network::Mainnet),
            0x6f => Some(Network::Testnet),
            _ => None,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Testnet => write!(f, "testnet"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_p2pkh_version_lookup() {
        for network in [Network::Mainnet, Network::Testnet] {
            assert_eq!(
                Network::from_p2pkh_version(network.p2pkh_version()),
                Some(network)
            );
        }
        assert_eq!(Network::from_p2pkh_version(0x05), None);
    }

    #[test]
    fn test_network_display() {
        assert_eq!(Network::Mainnet.to_string(), "mainnet");
        assert_eq!(Network::Testnet.to_string(), "testnet");
        assert_eq!(Network::default(), Network::Mainnet);
    }
}
