//! Offline vocabulary assembly.
//!
//! Merges word sources into a sorted, deduplicated list ready to be written as
//! a vocabulary file. This is a data-preparation step: the codec never calls it.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::VocabularyError;

/// One input to the assembler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordSource {
    /// Diceware list: `#` comment lines, otherwise `<dice>\t<word>`.
    DiceList(PathBuf),
    /// One word per line.
    Plain(PathBuf),
}

impl WordSource {
    fn path(&self) -> &Path {
        match self {
            WordSource::DiceList(p) | WordSource::Plain(p) => p,
        }
    }
}

/// Summary of an assembly run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyReport {
    /// Words read across all sources, before deduplication.
    pub words_read: usize,
    /// Malformed lines skipped.
    pub lines_skipped: usize,
    /// Unique words in the result.
    pub unique_words: usize,
}

/// Extract words from diceware-formatted text.
///
/// The word is the second tab-separated field. Spaces are removed and hyphens
/// become spaces, as in the published EFF lists.
pub fn parse_dice_list(text: &str) -> (Vec<String>, usize) {
    let mut words = Vec::new();
    let mut skipped = 0;
    for line in text.lines() {
        if line.contains('#') {
            continue;
        }
        match line.split('\t').nth(1) {
            Some(field) => words.push(field.replace(' ', "").replace('-', " ")),
            None => {
                tracing::warn!(line, "skipping malformed dice-list line");
                skipped += 1;
            }
        }
    }
    (words, skipped)
}

/// Extract words from one-word-per-line text, ignoring blank lines.
pub fn parse_plain(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read every source and return the sorted union of their words.
pub fn assemble(sources: &[WordSource]) -> Result<(Vec<String>, AssemblyReport), VocabularyError> {
    let mut unique = BTreeSet::new();
    let mut report = AssemblyReport::default();

    for source in sources {
        let path = source.path();
        let text = std::fs::read_to_string(path).map_err(|e| VocabularyError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let words = match source {
            WordSource::DiceList(_) => {
                tracing::debug!(path = %path.display(), "loading dice list");
                let (words, skipped) = parse_dice_list(&text);
                report.lines_skipped += skipped;
                words
            }
            WordSource::Plain(_) => {
                tracing::debug!(path = %path.display(), "loading plain word list");
                parse_plain(&text)
            }
        };
        report.words_read += words.len();
        unique.extend(words);
    }

    report.unique_words = unique.len();
    Ok((unique.into_iter().collect(), report))
}

/// Write words newline-delimited, one per line.
pub fn write_vocabulary(path: &Path, words: &[String]) -> Result<(), VocabularyError> {
    let mut text = words.join("\n");
    text.push('\n');
    std::fs::write(path, text).map_err(|source| VocabularyError::Io {
        path: path.display().to_string(),
        source,
    })
}
