#![no_main]

use arbitrary::Arbitrary;
use hdseed_core::{Entropy, MnemonicCodec};
use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;

#[derive(Debug, Arbitrary)]
struct Input {
    /// Raw phrase text
    phrase: String,
    /// Word indices assembled into a phrase of dictionary words
    indices: Vec<u16>,
    /// Entropy bytes for an encode/decode round-trip
    entropy: Vec<u8>,
}

fn codec() -> &'static MnemonicCodec {
    static CODEC: OnceLock<MnemonicCodec> = OnceLock::new();
    CODEC.get_or_init(|| MnemonicCodec::english().unwrap())
}

fuzz_target!(|input: Input| {
    let codec = codec();

    // Arbitrary text is rejected or accepted, never panics
    if let Ok(entropy) = codec.decode(&input.phrase) {
        assert_eq!(codec.encode(&entropy).unwrap().word_count(), entropy.word_count());
    }

    // Dictionary words with an arbitrary checksum
    let phrase: Vec<&str> = input
        .indices
        .iter()
        .take(24)
        .filter_map(|i| codec.wordlist().word(i % 2048))
        .collect();
    if let Ok(entropy) = codec.decode(&phrase.join(" ")) {
        assert_eq!(codec.encode(&entropy).unwrap().phrase(), phrase.join(" "));
    }

    if let Ok(entropy) = Entropy::from_bytes(&input.entropy) {
        let mnemonic = codec.encode(&entropy).unwrap();
        assert_eq!(codec.decode(&mnemonic.phrase()).unwrap(), entropy);
    }
});
