//! Keyed numeral transforms (format-preserving encryption).
//!
//! A [`NumeralTransform`] is a bijection over fixed-width numeral strings in a
//! given radix. The codec uses it to scramble the locality of cell indices so
//! that neighbouring cells get unrelated names. It is not a secrecy mechanism:
//! the default key and tweak are public.

pub mod ff3;

pub use ff3::Ff3;

use crate::error::TransformError;

/// Digits used for numerals, in value order. A radix-`r` alphabet is the first `r`.
pub const ALPHABET: &str = "0123456789abcdefghijklmnopqrstuvwxyz";

/// A keyed, length-preserving bijection over `width`-digit numerals.
pub trait NumeralTransform: Sized {
    /// Key length in bytes the transform expects after normalization.
    const KEY_LEN: usize;
    /// Tweak length in bytes.
    const TWEAK_LEN: usize;

    /// Build a transform over numerals of exactly `width` digits.
    ///
    /// Fails when `width` lies outside the transform's supported domain.
    fn with_domain(
        key: &[u8],
        tweak: &[u8],
        radix: u32,
        width: usize,
    ) -> Result<Self, TransformError>;

    /// Encrypt a `width`-digit numeral into another `width`-digit numeral.
    fn encrypt(&self, numeral: &str) -> Result<String, TransformError>;

    /// Exact inverse of [`encrypt`](Self::encrypt).
    fn decrypt(&self, numeral: &str) -> Result<String, TransformError>;
}

/// Parse a numeral into digit values, checking length and alphabet.
pub(crate) fn parse_numeral(
    numeral: &str,
    radix: u32,
    width: usize,
) -> Result<Vec<u32>, TransformError> {
    let len = numeral.chars().count();
    if len != width {
        return Err(TransformError::NumeralLength {
            numeral: numeral.to_string(),
            len,
            expected: width,
        });
    }
    numeral
        .chars()
        .map(|c| {
            if c.is_ascii_uppercase() {
                return None;
            }
            c.to_digit(radix)
        })
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| TransformError::InvalidNumeral {
            numeral: numeral.to_string(),
        })
}

/// Render digit values back into a numeral string.
pub(crate) fn render_numeral(digits: &[u32]) -> String {
    digits
        .iter()
        .map(|&d| ALPHABET.as_bytes()[d as usize] as char)
        .collect()
}
