// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # starhash
//!
//! Short, memorable, reversible names for points on the sky.
//!
//! A coordinate is binned into a HEALPix cell, the cell index is scrambled by
//! a keyed format-preserving transform (FF3), and the result is written as a
//! fixed number of words from an ordered vocabulary. Decoding inverts each
//! step and returns the cell centre, so names recover positions to within one
//! cell (about 3.2 arcseconds at the default resolution).
//!
//! ## Architecture
//!
//! - **Grid** (`grid`): `GridIndex` contract, HEALPix RING implementation
//! - **Transform** (`transform`): `NumeralTransform` contract, FF3 implementation
//! - **Vocabulary** (`vocabulary`): ordered word lists and offline assembly
//! - **Codec** (`codec`): composes the three; owns the coverage invariants
//! - **Config** (`config`, `paths`): TOML deployment settings under XDG paths
//!
//! ## Library usage
//!
//! ```no_run
//! use starhash::codec::StarHash;
//!
//! let codec = StarHash::with_defaults().unwrap();
//! let name = codec.encode(83.82, -5.39).unwrap();
//! let (ra, dec) = codec.decode(&name).unwrap();
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod grid;
pub mod paths;
pub mod transform;
pub mod vocabulary;
