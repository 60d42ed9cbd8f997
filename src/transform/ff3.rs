//! FF3 format-preserving encryption (NIST SP 800-38G).
//!
//! An 8-round Feistel network over numeral strings whose round function is
//! AES under the byte-reversed key. The tweak is 64 bits, split into left
//! and right halves that alternate between rounds.

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockEncrypt, KeyInit};
use aes::{Aes128, Aes192, Aes256};

use super::{NumeralTransform, parse_numeral, render_numeral};
use crate::error::TransformError;

const ROUNDS: u8 = 8;
/// Smallest domain size (`radix^width`) FF3 accepts.
const DOMAIN_MIN: u128 = 1_000_000;
/// Each Feistel half must fit in the 96 bits of the round input.
const HALF_BITS: u32 = 96;

enum BlockCipher {
    Aes128(Aes128),
    Aes192(Aes192),
    Aes256(Aes256),
}

impl BlockCipher {
    fn new(key: &[u8]) -> Result<Self, TransformError> {
        let len = key.len();
        let err = |_| TransformError::KeyLength { len };
        Ok(match len {
            16 => Self::Aes128(Aes128::new_from_slice(key).map_err(err)?),
            24 => Self::Aes192(Aes192::new_from_slice(key).map_err(err)?),
            32 => Self::Aes256(Aes256::new_from_slice(key).map_err(err)?),
            _ => return Err(TransformError::KeyLength { len }),
        })
    }

    fn encrypt(&self, block: &mut [u8; 16]) {
        let mut b = GenericArray::from(*block);
        match self {
            Self::Aes128(c) => c.encrypt_block(&mut b),
            Self::Aes192(c) => c.encrypt_block(&mut b),
            Self::Aes256(c) => c.encrypt_block(&mut b),
        }
        block.copy_from_slice(&b);
    }
}

/// FF3 cipher bound to a key, tweak, radix and numeral width.
pub struct Ff3 {
    cipher: BlockCipher,
    tweak: [u8; 8],
    radix: u32,
    width: usize,
}

impl std::fmt::Debug for Ff3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ff3")
            .field("radix", &self.radix)
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}

impl Ff3 {
    /// Smallest numeral width FF3 accepts for `radix`.
    pub fn min_width(radix: u32) -> usize {
        let mut width = 1;
        let mut size = u128::from(radix);
        while size < DOMAIN_MIN {
            size *= u128::from(radix);
            width += 1;
        }
        width
    }

    /// Largest numeral width FF3 accepts for `radix`.
    pub fn max_width(radix: u32) -> usize {
        let limit = 1u128 << HALF_BITS;
        let mut half = 0;
        let mut size = 1u128;
        while size * u128::from(radix) <= limit {
            size *= u128::from(radix);
            half += 1;
        }
        2 * half
    }

    fn halves(&self) -> (usize, usize) {
        let u = self.width.div_ceil(2);
        (u, self.width - u)
    }

    /// AES output for round `i`, keyed by the half-tweak `w` and the digits of `half`.
    fn round_output(&self, round: u8, w: &[u8], half: &[u32]) -> u128 {
        let mut p = [0u8; 16];
        p[..4].copy_from_slice(w);
        p[3] ^= round;
        let value = digits_value(half, self.radix);
        p[4..].copy_from_slice(&value.to_be_bytes()[4..]);

        p.reverse();
        self.cipher.encrypt(&mut p);
        p.reverse();
        u128::from_be_bytes(p)
    }
}

impl NumeralTransform for Ff3 {
    const KEY_LEN: usize = 32;
    const TWEAK_LEN: usize = 8;

    fn with_domain(
        key: &[u8],
        tweak: &[u8],
        radix: u32,
        width: usize,
    ) -> Result<Self, TransformError> {
        if !(2..=36).contains(&radix) {
            return Err(TransformError::Radix { radix });
        }
        let tweak: [u8; 8] = tweak
            .try_into()
            .map_err(|_| TransformError::TweakLength {
                len: tweak.len(),
                expected: Self::TWEAK_LEN,
            })?;

        let min = Self::min_width(radix);
        if width < min {
            return Err(TransformError::DomainTooSmall { width, min });
        }
        let max = Self::max_width(radix);
        if width > max {
            return Err(TransformError::DomainTooLarge { width, max });
        }

        // FF3 keys the block cipher with REVB(K).
        let mut reversed = key.to_vec();
        reversed.reverse();

        Ok(Self {
            cipher: BlockCipher::new(&reversed)?,
            tweak,
            radix,
            width,
        })
    }

    fn encrypt(&self, numeral: &str) -> Result<String, TransformError> {
        let digits = parse_numeral(numeral, self.radix, self.width)?;
        let (u, v) = self.halves();
        let (tl, tr) = self.tweak.split_at(4);
        let mut a = digits[..u].to_vec();
        let mut b = digits[u..].to_vec();

        for i in 0..ROUNDS {
            let (m, w) = if i % 2 == 0 { (u, tr) } else { (v, tl) };
            let modulus = pow(self.radix, m);
            let y = self.round_output(i, w, &b) % modulus;
            let c = (digits_value(&a, self.radix) + y) % modulus;
            a = std::mem::replace(&mut b, value_digits(c, self.radix, m));
        }

        a.extend_from_slice(&b);
        Ok(render_numeral(&a))
    }

    fn decrypt(&self, numeral: &str) -> Result<String, TransformError> {
        let digits = parse_numeral(numeral, self.radix, self.width)?;
        let (u, v) = self.halves();
        let (tl, tr) = self.tweak.split_at(4);
        let mut a = digits[..u].to_vec();
        let mut b = digits[u..].to_vec();

        for i in (0..ROUNDS).rev() {
            let (m, w) = if i % 2 == 0 { (u, tr) } else { (v, tl) };
            let modulus = pow(self.radix, m);
            let y = self.round_output(i, w, &a) % modulus;
            let c = (digits_value(&b, self.radix) + modulus - y) % modulus;
            b = std::mem::replace(&mut a, value_digits(c, self.radix, m));
        }

        a.extend_from_slice(&b);
        Ok(render_numeral(&a))
    }
}

fn pow(radix: u32, exp: usize) -> u128 {
    u128::from(radix).pow(exp as u32)
}

/// FF3 reads numeral halves least-significant digit first.
fn digits_value(digits: &[u32], radix: u32) -> u128 {
    digits
        .iter()
        .rev()
        .fold(0u128, |acc, &d| acc * u128::from(radix) + u128::from(d))
}

fn value_digits(mut value: u128, radix: u32, len: usize) -> Vec<u32> {
    let mut out = Vec::with_capacity(len);
    for _ in 0..len {
        out.push((value % u128::from(radix)) as u32);
        value /= u128::from(radix);
    }
    out
}
