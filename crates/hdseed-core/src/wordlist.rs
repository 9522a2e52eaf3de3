//! Mnemonic dictionary
//!
//! A [`Wordlist`] is an immutable, index-addressable list of exactly 2048
//! distinct words. It is constructed explicitly and handed to the
//! [`MnemonicCodec`](crate::mnemonic::MnemonicCodec); there is no process-wide
//! dictionary.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};

/// Number of words in a BIP39 dictionary (one per 11-bit index)
pub const WORDLIST_SIZE: usize = 2048;

const ENGLISH: &str = include_str!("../wordlists/english.txt");

/// Fixed 2048-word mnemonic dictionary
#[derive(Debug, Clone)]
pub struct Wordlist {
    words: Vec<String>,
    index: HashMap<String, u16>,
}

impl Wordlist {
    /// The BIP39 English wordlist bundled with this crate
    pub fn english() -> Result<Self> {
        Self::from_reader(ENGLISH.as_bytes())
    }

    /// Build a dictionary from an ordered word sequence
    ///
    /// Fails with [`Error::DictionaryUnavailable`] unless the input holds
    /// exactly 2048 distinct, non-empty words.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        if words.len() != WORDLIST_SIZE {
            return Err(Error::DictionaryUnavailable(format!(
                "expected {} words, found {}",
                WORDLIST_SIZE,
                words.len()
            )));
        }

        let mut index = HashMap::with_capacity(WORDLIST_SIZE);
        for (i, word) in words.iter().enumerate() {
            if word.is_empty() || word.chars().any(char::is_whitespace) {
                return Err(Error::DictionaryUnavailable(format!(
                    "malformed word at index {}",
                    i
                )));
            }
            if index.insert(word.clone(), i as u16).is_some() {
                return Err(Error::DictionaryUnavailable(format!(
                    "duplicate word '{}' at index {}",
                    word, i
                )));
            }
        }

        Ok(Self { words, index })
    }

    /// Read one word per line, ignoring blank lines and surrounding whitespace
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut words = Vec::with_capacity(WORDLIST_SIZE);
        for (number, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                Error::DictionaryUnavailable(format!("read failed at line {}: {}", number + 1, e))
            })?;
            let word = line.trim();
            if !word.is_empty() {
                words.push(word.to_string());
            }
        }
        Self::from_words(words)
    }

    /// Load a dictionary file (one word per line)
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            Error::DictionaryUnavailable(format!("{}: {}", path.display(), e))
        })?;
        let wordlist = Self::from_reader(BufReader::new(file))?;
        debug!(path = %path.display(), "Loaded wordlist");
        Ok(wordlist)
    }

    /// Word at an 11-bit index
    pub fn word(&self, index: u16) -> Option<&str> {
        self.words.get(index as usize).map(String::as_str)
    }

    /// Index of a word, if it is in the dictionary
    pub fn index_of(&self, word: &str) -> Option<u16> {
        self.index.get(word).copied()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}
