//! Published BIP39 / BIP32 vectors and known addresses

use hdseed_core::{
    address::{decode_p2pkh, ethereum_address, p2pkh_address},
    crypto::PublicKey,
    Entropy, ExtendedKey, MnemonicCodec, Network, Seed, HARDENED_OFFSET,
};

/// (entropy, mnemonic) pairs from the BIP39 reference vectors
const BIP39_VECTORS: &[(&str, &str)] = &[
    (
        "00000000000000000000000000000000",
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
    ),
    (
        "7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f",
        "legal winner thank year wave sausage worth useful legal winner thank yellow",
    ),
    (
        "80808080808080808080808080808080",
        "letter advice cage absurd amount doctor acoustic avoid letter advice cage above",
    ),
    (
        "ffffffffffffffffffffffffffffffff",
        "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong",
    ),
    (
        "0000000000000000000000000000000000000000000000000000000000000000",
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon \
         abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon art",
    ),
    (
        "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo vote",
    ),
];

#[test]
fn test_bip39_encode_and_decode_vectors() {
    let codec = MnemonicCodec::english().unwrap();

    for (entropy_hex, phrase) in BIP39_VECTORS {
        let entropy = Entropy::from_bytes(&hex::decode(entropy_hex).unwrap()).unwrap();
        let mnemonic = codec.encode(&entropy).unwrap();
        assert_eq!(&mnemonic.phrase(), phrase, "entropy {}", entropy_hex);
        assert_eq!(codec.decode(phrase).unwrap(), entropy);
    }
}

#[test]
fn test_bip39_seed_with_trezor_passphrase() {
    let codec = MnemonicCodec::english().unwrap();
    let mnemonic = codec.parse(BIP39_VECTORS[0].1).unwrap();

    assert_eq!(
        mnemonic.to_seed("TREZOR").to_hex(),
        "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e53495531f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04"
    );
}

#[test]
fn test_bip32_vector1_hardened_chain() {
    let master = ExtendedKey::master(&hex::decode("000102030405060708090a0b0c0d0e0f").unwrap()).unwrap();
    assert_eq!(
        hex::encode(master.private_key()),
        "e8f32e723decf4051aefac8e2c93c9c5b214313817cdb01a1494b917c8436b35"
    );
    assert_eq!(
        hex::encode(master.chain_code()),
        "873dff81c02f525623fd1fe5167eac3a55a049de3d314bb42ee227ffed37d508"
    );

    let child = master.derive_path_str("m/0'").unwrap();
    assert_eq!(child, master.derive_child(HARDENED_OFFSET).unwrap());
    assert_eq!(
        child.to_xprv(Network::Mainnet).unwrap(),
        "xprv9uHRZZhk6KAJC1avXpDAp4MDc3sQKNxDiPvvkX8Br5ngLNv1TxvUxt4cV1rGL5hj6KCesnDYUhd7oWgT11eZG7XnxHrnYeSvkzY7d2bhkJ7"
    );
}

#[test]
fn test_master_from_mnemonic_seed() {
    let seed = Seed::from_mnemonic(BIP39_VECTORS[0].1, "");
    let master = ExtendedKey::master(seed.as_bytes()).unwrap();
    // Root xprv of the BIP39 "abandon ... about" seed
    assert_eq!(
        master.to_xprv(Network::Mainnet).unwrap(),
        "xprv9s21ZrQH143K3GJpoapnV8SFfukcVBSfeCficPSGfubmSFDxo1kuHnLisriDvSnRRuL2Qrg5ggqHKNVpxR86QEC8w35uxmGoggxtQTPvfUu"
    );
}

#[test]
fn test_known_addresses_for_generator_key() {
    let mut key = [0u8; 32];
    key[31] = 1;

    assert_eq!(
        ethereum_address(&key).unwrap(),
        "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
    );

    let public_key = PublicKey::from_private(&key).unwrap();
    let address = p2pkh_address(&public_key, Network::Mainnet);
    assert_eq!(address, "1EHNa6Q4Jz2uvNExL497mE43ikXhwF6kZm");
    assert_eq!(decode_p2pkh(&address).unwrap().0, 0x00);
}
