//! Rich diagnostic error types for starhash.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes, help text, and source chains so callers can tell exactly
//! which stage of the coordinate/word pipeline failed and why.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for starhash.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text, sources) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum StarhashError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Vocabulary(#[from] VocabularyError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Codec errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum CodecError {
    #[error(
        "incomplete coverage: {vocabulary_size} words x {words} per name address \
         {capacity} values, {required} required"
    )]
    #[diagnostic(
        code(starhash::codec::incomplete_coverage),
        help(
            "The vocabulary size raised to the number of words per name must reach \
             both the grid cell count and the padded numeral space. Use a larger \
             vocabulary, more words per name, or a coarser grid."
        )
    )]
    IncompleteCoverage {
        vocabulary_size: usize,
        words: u32,
        capacity: u128,
        required: u128,
    },

    #[error("numeral transform rejects padding width {width}")]
    #[diagnostic(
        code(starhash::codec::transform_domain),
        help(
            "The grid is too small (or too large) for the numeral transform's \
             domain. Choose a grid resolution whose largest cell index has a \
             digit count the transform supports."
        )
    )]
    TransformDomain {
        width: usize,
        #[source]
        source: TransformError,
    },

    #[error("unknown word \"{word}\" at position {position}")]
    #[diagnostic(
        code(starhash::codec::unknown_word),
        help("Every word of a name must come from the vocabulary. Check the spelling.")
    )]
    UnknownWord { word: String, position: usize },

    #[error("expected {expected} words, found {found}")]
    #[diagnostic(
        code(starhash::codec::word_count),
        help("Names are a fixed number of words joined by '-'.")
    )]
    WordCount { expected: usize, found: usize },

    #[error("malformed name: value {value} does not fit in {width} digits")]
    #[diagnostic(
        code(starhash::codec::malformed),
        help(
            "The words recompose to a number no valid name can produce. \
             The name is corrupted or was issued by a different deployment."
        )
    )]
    MalformedIdentifier { value: u128, width: usize },

    #[error("name decodes to cell index {index}, outside the grid of {cells} cells")]
    #[diagnostic(
        code(starhash::codec::invalid_index),
        help(
            "The name is corrupted, or it was issued with a different key, tweak, \
             vocabulary or grid resolution."
        )
    )]
    InvalidIndex { index: u64, cells: u64 },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Vocabulary(#[from] VocabularyError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Transform(#[from] TransformError),
}

// ---------------------------------------------------------------------------
// Vocabulary errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum VocabularyError {
    #[error("failed to read vocabulary: {path}")]
    #[diagnostic(
        code(starhash::vocabulary::io),
        help("Ensure the vocabulary file exists, is readable and is UTF-8 text.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("vocabulary is empty")]
    #[diagnostic(
        code(starhash::vocabulary::empty),
        help("A vocabulary file holds one word per line; this one has none.")
    )]
    Empty,

    #[error("empty word on line {line}")]
    #[diagnostic(
        code(starhash::vocabulary::empty_word),
        help("Remove blank lines from the vocabulary file.")
    )]
    EmptyWord { line: usize },

    #[error("word \"{word}\" on line {line} contains the separator '{separator}'")]
    #[diagnostic(
        code(starhash::vocabulary::separator),
        help("Words must not contain the separator, or names could not be split back.")
    )]
    SeparatorInWord {
        word: String,
        line: usize,
        separator: char,
    },

    #[error("duplicate word \"{word}\" on lines {first} and {line}")]
    #[diagnostic(
        code(starhash::vocabulary::duplicate),
        help(
            "Each word's line number is its numeral value, so a repeated word would \
             make two values decode to one. Deduplicate the vocabulary."
        )
    )]
    Duplicate {
        word: String,
        first: usize,
        line: usize,
    },
}

// ---------------------------------------------------------------------------
// Grid errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum GridError {
    #[error("invalid grid resolution: nside {nside}")]
    #[diagnostic(
        code(starhash::grid::resolution),
        help("HEALPix nside must be between 1 and 2^29.")
    )]
    Resolution { nside: u32 },

    #[error("coordinate out of range: ra {lon}, dec {lat}")]
    #[diagnostic(
        code(starhash::grid::coordinate_range),
        help("Right ascension must lie in [0, 360] and declination in [-90, 90] degrees.")
    )]
    CoordinateOutOfRange { lon: f64, lat: f64 },

    #[error("cell index {index} out of range for a grid of {cells} cells")]
    #[diagnostic(
        code(starhash::grid::cell_range),
        help("Cell indices run from 0 to the cell count minus one.")
    )]
    CellOutOfRange { index: u64, cells: u64 },
}

// ---------------------------------------------------------------------------
// Numeral transform errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum TransformError {
    #[error("invalid key length: {len} bytes")]
    #[diagnostic(
        code(starhash::transform::key_length),
        help("FF3 takes an AES key of 16, 24 or 32 bytes.")
    )]
    KeyLength { len: usize },

    #[error("invalid tweak length: {len} bytes, expected {expected}")]
    #[diagnostic(
        code(starhash::transform::tweak_length),
        help("Provide a tweak of at least {expected} bytes; extra bytes are dropped.")
    )]
    TweakLength { len: usize, expected: usize },

    #[error("unsupported radix {radix}")]
    #[diagnostic(
        code(starhash::transform::radix),
        help("The numeral alphabet supports radix 2 to 36.")
    )]
    Radix { radix: u32 },

    #[error("numeral width {width} below minimum {min}")]
    #[diagnostic(
        code(starhash::transform::domain_too_small),
        help("FF3 needs a domain of at least one million values.")
    )]
    DomainTooSmall { width: usize, min: usize },

    #[error("numeral width {width} above maximum {max}")]
    #[diagnostic(
        code(starhash::transform::domain_too_large),
        help("FF3 halves must fit in 96 bits.")
    )]
    DomainTooLarge { width: usize, max: usize },

    #[error("numeral \"{numeral}\" has length {len}, expected {expected}")]
    #[diagnostic(code(starhash::transform::numeral_length))]
    NumeralLength {
        numeral: String,
        len: usize,
        expected: usize,
    },

    #[error("numeral \"{numeral}\" contains characters outside the alphabet")]
    #[diagnostic(code(starhash::transform::invalid_numeral))]
    InvalidNumeral { numeral: String },
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("cannot determine home directory")]
    #[diagnostic(
        code(starhash::config::no_home),
        help("Set the HOME environment variable or pass --config explicitly.")
    )]
    NoHome,

    #[error("failed to read config: {path}")]
    #[diagnostic(
        code(starhash::config::read),
        help("Ensure the config file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {path}: {message}")]
    #[diagnostic(
        code(starhash::config::parse),
        help("Check the TOML syntax and field types in the config file.")
    )]
    Parse { path: String, message: String },
}

/// Convenience alias for functions returning starhash results.
pub type StarhashResult<T> = std::result::Result<T, StarhashError>;

/// Result alias for codec operations.
pub type CodecResult<T> = std::result::Result<T, CodecError>;
