//! BIP39 mnemonic encoding and decoding
//!
//! Entropy bits followed by the leading `ENT / 32` bits of `SHA256(entropy)`
//! are split into 11-bit groups, each naming one dictionary word. Decoding
//! runs the same bit layout in reverse and re-checks the checksum.

use std::fmt;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::sha256;
use crate::entropy::Entropy;
use crate::error::{Error, Result};
use crate::seed::Seed;
use crate::wordlist::Wordlist;

/// Bits encoded by one mnemonic word
pub const BITS_PER_WORD: usize = 11;

/// Word counts produced by the supported entropy strengths
pub const VALID_WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

/// Ordered mnemonic words
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Mnemonic {
    words: Vec<String>,
}

impl Mnemonic {
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Words joined with single spaces
    pub fn phrase(&self) -> String {
        self.words.join(" ")
    }

    /// Stretch this mnemonic into a 64-byte seed
    pub fn to_seed(&self, passphrase: &str) -> Seed {
        Seed::from_mnemonic(&self.phrase(), passphrase)
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.phrase())
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mnemonic({} words)", self.words.len())
    }
}

/// Converts between entropy and mnemonic words using an injected dictionary
#[derive(Debug, Clone)]
pub struct MnemonicCodec {
    wordlist: Wordlist,
}

impl MnemonicCodec {
    pub fn new(wordlist: Wordlist) -> Self {
        Self { wordlist }
    }

    /// Codec over the bundled English wordlist
    pub fn english() -> Result<Self> {
        Ok(Self::new(Wordlist::english()?))
    }

    pub fn wordlist(&self) -> &Wordlist {
        &self.wordlist
    }

    /// Encode entropy as a checksum-protected word sequence
    pub fn encode(&self, entropy: &Entropy) -> Result<Mnemonic> {
        let total_bits = entropy.bits() + entropy.checksum_bits();

        // The checksum is the leading bits of the hash, so appending the
        // whole digest and reading `total_bits` yields entropy || checksum.
        let mut buffer = entropy.as_bytes().to_vec();
        buffer.extend_from_slice(&sha256(entropy.as_bytes()));

        let words = (0..total_bits / BITS_PER_WORD)
            .map(|i| {
                let index = read_bits(&buffer, i * BITS_PER_WORD, BITS_PER_WORD);
                self.wordlist
                    .word(index)
                    .map(str::to_string)
                    .ok_or_else(|| {
                        Error::DictionaryUnavailable(format!("no word at index {}", index))
                    })
            })
            .collect::<Result<Vec<_>>>();
        buffer.zeroize();

        let words = words?;
        debug!(words = words.len(), "Encoded mnemonic");
        Ok(Mnemonic { words })
    }

    /// Recover the entropy behind a mnemonic phrase, verifying its checksum
    pub fn decode(&self, phrase: &str) -> Result<Entropy> {
        let words: Vec<&str> = phrase.split_whitespace().collect();
        if !VALID_WORD_COUNTS.contains(&words.len()) {
            return Err(Error::InvalidWordCount(words.len()));
        }

        let total_bits = words.len() * BITS_PER_WORD;
        let checksum_bits = total_bits / 33;
        let entropy_bits = total_bits - checksum_bits;

        let mut buffer = vec![0u8; (total_bits + 7) / 8];
        for (i, word) in words.iter().enumerate() {
            let index = self
                .wordlist
                .index_of(word)
                .ok_or_else(|| Error::UnknownWord(word.to_string()))?;
            write_bits(&mut buffer, i * BITS_PER_WORD, BITS_PER_WORD, index);
        }

        let entropy_bytes = &buffer[..entropy_bits / 8];
        let provided = read_bits(&buffer, entropy_bits, checksum_bits);
        let expected = read_bits(&sha256(entropy_bytes), 0, checksum_bits);

        let result = if provided == expected {
            Entropy::from_bytes(entropy_bytes)
        } else {
            Err(Error::InvalidChecksum)
        };
        buffer.zeroize();
        result
    }

    /// Check words and checksum without keeping the entropy
    pub fn validate(&self, phrase: &str) -> Result<()> {
        self.decode(phrase).map(|_| ())
    }

    /// Parse and validate a phrase, normalizing whitespace between words
    pub fn parse(&self, phrase: &str) -> Result<Mnemonic> {
        self.validate(phrase)?;
        Ok(Mnemonic {
            words: phrase.split_whitespace().map(str::to_string).collect(),
        })
    }
}

/// Read `len` (at most 16) bits starting at bit `offset`, most significant first
fn read_bits(data: &[u8], offset: usize, len: usize) -> u16 {
    (offset..offset + len).fold(0u16, |acc, bit| {
        let value = (data[bit / 8] >> (7 - bit % 8)) & 1;
        (acc << 1) | u16::from(value)
    })
}

/// Write the low `len` bits of `value` starting at bit `offset`
fn write_bits(data: &mut [u8], offset: usize, len: usize, value: u16) {
    for i in 0..len {
        if (value >> (len - 1 - i)) & 1 == 1 {
            let bit = offset + i;
            data[bit / 8] |= 0x80 >> (bit % 8);
        }
    }
}
