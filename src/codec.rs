//! The word codec: cell indices to word sequences and back.
//!
//! Encoding pads the cell index to `W` decimal digits, passes it through the
//! numeral transform, splits the result into `k` base-`N` digits and looks each
//! digit up in the vocabulary. Decoding runs the same steps in reverse.
//!
//! Every `W`-digit numeral the transform can emit must be expressible in `k`
//! words, so construction requires `N^k >= 10^W` (which implies `N^k >= P`).
//! Encoding is then total and injective over the valid cells.

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, CodecResult, StarhashResult, TransformError};
use crate::grid::{DEFAULT_NSIDE, GridIndex, Healpix};
use crate::transform::{Ff3, NumeralTransform};
use crate::vocabulary::{Vocabulary, VocabularySource};

/// Default transform key. Public: it scrambles locality, it does not hide anything.
pub const DEFAULT_KEY: &[u8] = b"starhash!";

/// Default transform tweak.
pub const DEFAULT_TWEAK: &[u8] = b"opensource";

/// Default number of words per name.
pub const DEFAULT_WORDS: u32 = 3;

/// Separator between the words of a name.
pub const WORD_SEPARATOR: char = '-';

/// Codec over the HEALPix grid with the FF3 transform.
pub type StarHash = WordCodec<Healpix, Ff3>;

/// Which base-`N` digit the first word of a name carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DigitOrder {
    /// First word is the least significant digit. Matches previously issued names.
    #[default]
    LeastSignificantFirst,
    /// First word is the most significant digit.
    MostSignificantFirst,
}

impl std::fmt::Display for DigitOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DigitOrder::LeastSignificantFirst => write!(f, "least-significant-first"),
            DigitOrder::MostSignificantFirst => write!(f, "most-significant-first"),
        }
    }
}

/// Construction parameters for a [`WordCodec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Transform key; zero-padded on the right to the transform's key length.
    pub key: Vec<u8>,
    /// Transform tweak; truncated to the transform's tweak length.
    pub tweak: Vec<u8>,
    /// Words per name `k`.
    pub words: u32,
    pub digit_order: DigitOrder,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            key: DEFAULT_KEY.to_vec(),
            tweak: DEFAULT_TWEAK.to_vec(),
            words: DEFAULT_WORDS,
            digit_order: DigitOrder::default(),
        }
    }
}

/// Derived properties of a codec instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodecStats {
    /// Cell count `P`.
    pub cells: u64,
    /// Padding width `W`.
    pub width: usize,
    /// Cell angular resolution in arcminutes.
    pub resolution_arcmin: f64,
    /// Vocabulary size `N`.
    pub vocabulary_size: usize,
    /// Words per name `k`.
    pub words: u32,
    /// `N^k / P`.
    pub coverage: f64,
    pub digit_order: DigitOrder,
}

/// Bijective codec between grid cells and fixed-length word sequences.
///
/// Immutable after construction; share it freely across threads.
#[derive(Debug)]
pub struct WordCodec<G, T> {
    grid: G,
    transform: T,
    vocabulary: Vocabulary,
    words: u32,
    digit_order: DigitOrder,
    width: usize,
}

impl<G: GridIndex, T: NumeralTransform> WordCodec<G, T> {
    /// Build a codec, validating coverage and the transform domain.
    ///
    /// No partially usable codec is ever returned: any failure aborts construction.
    pub fn new(grid: G, vocabulary: &VocabularySource, config: &CodecConfig) -> CodecResult<Self> {
        let vocabulary = Vocabulary::load(vocabulary, WORD_SEPARATOR)?;
        Self::with_vocabulary(grid, vocabulary, config)
    }

    /// Build a codec around an already loaded vocabulary.
    pub fn with_vocabulary(
        grid: G,
        vocabulary: Vocabulary,
        config: &CodecConfig,
    ) -> CodecResult<Self> {
        let key = normalize_key(&config.key, T::KEY_LEN);
        let tweak = &config.tweak[..config.tweak.len().min(T::TWEAK_LEN)];

        let cells = grid.cell_count();
        let width = decimal_width(cells.saturating_sub(1));

        let n = vocabulary.len() as u128;
        let capacity = n.saturating_pow(config.words);
        let coverage = capacity as f64 / cells as f64;

        tracing::debug!(
            cells,
            resolution_arcsec = grid.resolution_arcmin() * 60.0,
            width,
            "grid properties"
        );
        tracing::debug!(
            vocabulary_size = vocabulary.len(),
            words = config.words,
            coverage,
            "vocabulary coverage"
        );

        let coverage_error = |required| CodecError::IncompleteCoverage {
            vocabulary_size: vocabulary.len(),
            words: config.words,
            capacity,
            required,
        };
        if config.words == 0 || capacity < u128::from(cells) {
            return Err(coverage_error(u128::from(cells)));
        }
        let numeral_space = 10u128.pow(width as u32);
        if capacity < numeral_space {
            return Err(coverage_error(numeral_space));
        }

        let transform = T::with_domain(&key, tweak, 10, width).map_err(|source| match source {
            TransformError::DomainTooSmall { .. } | TransformError::DomainTooLarge { .. } => {
                CodecError::TransformDomain { width, source }
            }
            other => CodecError::Transform(other),
        })?;

        Ok(Self {
            grid,
            transform,
            vocabulary,
            words: config.words,
            digit_order: config.digit_order,
            width,
        })
    }

    /// Name for the cell containing a coordinate (degrees).
    pub fn encode(&self, lon: f64, lat: f64) -> CodecResult<String> {
        let index = self.grid.coordinate_to_cell(lon, lat)?;
        self.encode_index(index)
    }

    /// Centre of the cell a name refers to (degrees).
    pub fn decode(&self, name: &str) -> CodecResult<(f64, f64)> {
        let index = self.decode_index(name)?;
        Ok(self.grid.cell_to_coordinate(index)?)
    }

    /// Name for a cell index.
    pub fn encode_index(&self, index: u64) -> CodecResult<String> {
        let cells = self.grid.cell_count();
        if index >= cells {
            return Err(CodecError::InvalidIndex { index, cells });
        }

        let padded = format!("{index:0width$}", width = self.width);
        let encrypted = self.transform.encrypt(&padded)?;
        let mut value: u128 = encrypted
            .parse()
            .map_err(|_| TransformError::InvalidNumeral {
                numeral: encrypted.clone(),
            })?;

        // Unreachable once construction has checked N^k >= 10^W.
        let base = self.vocabulary.len() as u128;
        let uncovered = || CodecError::IncompleteCoverage {
            vocabulary_size: self.vocabulary.len(),
            words: self.words,
            capacity: base.saturating_pow(self.words),
            required: 10u128.pow(self.width as u32),
        };

        let mut digits = Vec::with_capacity(self.words as usize);
        for _ in 0..self.words {
            digits.push((value % base) as u32);
            value /= base;
        }
        if value != 0 {
            return Err(uncovered());
        }
        if self.digit_order == DigitOrder::MostSignificantFirst {
            digits.reverse();
        }

        let words = digits
            .iter()
            .map(|&d| self.vocabulary.word(d).ok_or_else(uncovered))
            .collect::<CodecResult<Vec<&str>>>()?;
        tracing::trace!(index, %encrypted, "encoded cell");
        Ok(words.join(&WORD_SEPARATOR.to_string()))
    }

    /// Cell index a name refers to.
    pub fn decode_index(&self, name: &str) -> CodecResult<u64> {
        let parts: Vec<&str> = name.trim().split(WORD_SEPARATOR).collect();
        if parts.len() != self.words as usize {
            return Err(CodecError::WordCount {
                expected: self.words as usize,
                found: parts.len(),
            });
        }

        let mut digits = parts
            .iter()
            .enumerate()
            .map(|(position, &word)| {
                self.vocabulary
                    .position(word)
                    .ok_or_else(|| CodecError::UnknownWord {
                        word: word.to_string(),
                        position,
                    })
            })
            .collect::<CodecResult<Vec<u32>>>()?;
        if self.digit_order == DigitOrder::MostSignificantFirst {
            digits.reverse();
        }

        // N^k >= 10^W and 10^W <= 10^19, so anything past u128 is malformed anyway.
        let base = self.vocabulary.len() as u128;
        let value = digits.iter().rev().try_fold(0u128, |acc, &d| {
            acc.checked_mul(base)?.checked_add(u128::from(d))
        });
        let limit = 10u128.pow(self.width as u32);
        let value = match value {
            Some(v) if v < limit => v,
            Some(v) => {
                return Err(CodecError::MalformedIdentifier {
                    value: v,
                    width: self.width,
                });
            }
            None => {
                return Err(CodecError::MalformedIdentifier {
                    value: u128::MAX,
                    width: self.width,
                });
            }
        };

        let padded = format!("{value:0width$}", width = self.width);
        let decrypted = self.transform.decrypt(&padded)?;
        let index: u64 = decrypted
            .parse()
            .map_err(|_| TransformError::InvalidNumeral {
                numeral: decrypted.clone(),
            })?;

        let cells = self.grid.cell_count();
        if index >= cells {
            return Err(CodecError::InvalidIndex { index, cells });
        }
        Ok(index)
    }

    pub fn stats(&self) -> CodecStats {
        let cells = self.grid.cell_count();
        let capacity = (self.vocabulary.len() as u128).saturating_pow(self.words);
        CodecStats {
            cells,
            width: self.width,
            resolution_arcmin: self.grid.resolution_arcmin(),
            vocabulary_size: self.vocabulary.len(),
            words: self.words,
            coverage: capacity as f64 / cells as f64,
            digit_order: self.digit_order,
        }
    }

    pub fn grid(&self) -> &G {
        &self.grid
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Padding width `W`.
    pub fn width(&self) -> usize {
        self.width
    }
}

impl StarHash {
    /// Codec with the default grid, bundled vocabulary and default key/tweak.
    pub fn with_defaults() -> StarhashResult<Self> {
        let grid = Healpix::new(DEFAULT_NSIDE)?;
        Ok(Self::new(
            grid,
            &VocabularySource::Bundled,
            &CodecConfig::default(),
        )?)
    }
}

/// Zero-pad (right) a key to `len` bytes. Longer keys are passed through for
/// the transform to reject. This is a format adapter, not key derivation.
fn normalize_key(key: &[u8], len: usize) -> Vec<u8> {
    let mut key = key.to_vec();
    if key.len() < len {
        key.resize(len, 0);
    }
    key
}

/// Number of decimal digits needed to write `value`.
fn decimal_width(value: u64) -> usize {
    let mut width = 1;
    let mut v = value / 10;
    while v > 0 {
        width += 1;
        v /= 10;
    }
    width
}
