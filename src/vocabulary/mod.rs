//! Ordered word lists.
//!
//! A [`Vocabulary`] is the digit alphabet of the codec: the word on line `n`
//! (counting from zero) stands for the base-`N` digit `n`. Reordering or editing
//! a deployed vocabulary changes every name issued with it.

pub mod assemble;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::VocabularyError;

/// The vocabulary compiled into the binary.
const BUNDLED_VOCABULARY: &str = include_str!("../../data/vocabulary.txt");

/// Where a vocabulary comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VocabularySource {
    /// The word list bundled into the binary via `include_str!`.
    #[default]
    Bundled,
    /// A newline-delimited UTF-8 file on disk.
    File(PathBuf),
    /// An in-memory list, in value order.
    Words(Vec<String>),
}

impl std::fmt::Display for VocabularySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VocabularySource::Bundled => write!(f, "bundled"),
            VocabularySource::File(path) => write!(f, "{}", path.display()),
            VocabularySource::Words(words) => write!(f, "inline ({} words)", words.len()),
        }
    }
}

/// An immutable, duplicate-free word list with reverse lookup.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    words: Vec<String>,
    positions: HashMap<String, u32>,
}

impl Vocabulary {
    /// Load and validate a vocabulary.
    ///
    /// Files are read completely up front; nothing is streamed or re-read later.
    /// `separator` is the character names are joined with, which no word may contain.
    pub fn load(source: &VocabularySource, separator: char) -> Result<Self, VocabularyError> {
        match source {
            VocabularySource::Bundled => Self::from_text(BUNDLED_VOCABULARY, separator),
            VocabularySource::File(path) => Self::from_file(path, separator),
            VocabularySource::Words(words) => {
                Self::from_words(words.iter().map(String::as_str), separator)
            }
        }
    }

    fn from_file(path: &Path, separator: char) -> Result<Self, VocabularyError> {
        let text = std::fs::read_to_string(path).map_err(|source| VocabularyError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_text(&text, separator)
    }

    /// Parse newline-delimited text, one word per line.
    pub fn from_text(text: &str, separator: char) -> Result<Self, VocabularyError> {
        Self::from_words(text.lines(), separator)
    }

    /// Build from words in value order.
    pub fn from_words<'a>(
        words: impl IntoIterator<Item = &'a str>,
        separator: char,
    ) -> Result<Self, VocabularyError> {
        let mut list = Vec::new();
        let mut positions = HashMap::new();

        for (i, word) in words.into_iter().enumerate() {
            let line = i + 1;
            if word.is_empty() {
                return Err(VocabularyError::EmptyWord { line });
            }
            if word.contains(separator) {
                return Err(VocabularyError::SeparatorInWord {
                    word: word.to_string(),
                    line,
                    separator,
                });
            }
            if let Some(&first) = positions.get(word) {
                return Err(VocabularyError::Duplicate {
                    word: word.to_string(),
                    first: first as usize + 1,
                    line,
                });
            }
            positions.insert(word.to_string(), i as u32);
            list.push(word.to_string());
        }

        if list.is_empty() {
            return Err(VocabularyError::Empty);
        }

        Ok(Self {
            words: list,
            positions,
        })
    }

    /// Number of words `N`.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Word for a digit value, if in range.
    pub fn word(&self, digit: u32) -> Option<&str> {
        self.words.get(digit as usize).map(String::as_str)
    }

    /// Digit value of a word, if present.
    pub fn position(&self, word: &str) -> Option<u32> {
        self.positions.get(word).copied()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}
