//! Spherical grid indexing: continuous coordinates to discrete cells and back.
//!
//! The codec only depends on the [`GridIndex`] contract. [`Healpix`] provides
//! the HEALPix equal-area tessellation in RING ordering, with cells numbered
//! ring by ring from the north pole.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::GridError;

/// Largest supported HEALPix `nside` (2^29), the limit at which
/// `12 * nside^2` still fits comfortably in a `u64`.
pub const MAX_NSIDE: u32 = 1 << 29;

/// Default grid resolution.
pub const DEFAULT_NSIDE: u32 = 65_536;

/// Maps longitude/latitude (degrees) to a cell index and back.
///
/// Implementations must be deterministic and satisfy
/// `coordinate_to_cell(cell_to_coordinate(i)) == i` for every `i < cell_count()`.
pub trait GridIndex {
    /// Total number of addressable cells `P`.
    fn cell_count(&self) -> u64;

    /// Cell containing the given point.
    fn coordinate_to_cell(&self, lon_deg: f64, lat_deg: f64) -> Result<u64, GridError>;

    /// Representative point (the centre) of a cell, in degrees.
    fn cell_to_coordinate(&self, index: u64) -> Result<(f64, f64), GridError>;

    /// Typical angular size of a cell, in arcminutes.
    fn resolution_arcmin(&self) -> f64;
}

/// HEALPix grid in RING ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Healpix {
    nside: u64,
    npix: u64,
    /// Number of cells in the north polar cap.
    ncap: u64,
}

impl Healpix {
    /// Create a grid with the given `nside`.
    pub fn new(nside: u32) -> Result<Self, GridError> {
        if nside == 0 || nside > MAX_NSIDE {
            return Err(GridError::Resolution { nside });
        }
        let n = u64::from(nside);
        Ok(Self {
            nside: n,
            npix: 12 * n * n,
            ncap: 2 * n * (n - 1),
        })
    }

    /// Ring-scheme pixel for colatitude `theta` and longitude `phi` (radians).
    fn ang2pix(&self, theta: f64, phi: f64) -> u64 {
        let nside = self.nside as f64;
        let z = theta.cos();
        let za = z.abs();
        let tt = fmodulo(phi / FRAC_PI_2, 4.0);

        if za <= 2.0 / 3.0 {
            // Equatorial belt.
            let nl4 = 4 * self.nside as i64;
            let temp1 = nside * (0.5 + tt);
            let temp2 = nside * z * 0.75;
            let jp = (temp1 - temp2) as i64;
            let jm = (temp1 + temp2) as i64;

            let ir = self.nside as i64 + 1 + jp - jm;
            let kshift = 1 - (ir & 1);
            let t1 = jp + jm - self.nside as i64 + kshift + 1 + 2 * nl4;
            let ip = (t1 >> 1) % nl4;

            self.ncap + ((ir - 1) * nl4 + ip) as u64
        } else {
            // Polar caps. Near the poles use sin(theta) to avoid cancellation in 1 - |z|.
            let tp = tt - tt.floor();
            let tmp = if theta < 0.01 || theta > PI - 0.01 {
                nside * theta.sin() / ((1.0 + za) / 3.0).sqrt()
            } else {
                nside * (3.0 * (1.0 - za)).sqrt()
            };

            let jp = (tp * tmp) as u64;
            let jm = ((1.0 - tp) * tmp) as u64;

            let ir = (jp + jm + 1).min(self.nside);
            let ip = ((tt * ir as f64) as u64).min(4 * ir - 1);

            if z > 0.0 {
                2 * ir * (ir - 1) + ip
            } else {
                self.npix - 2 * ir * (ir + 1) + ip
            }
        }
    }

    /// Colatitude and longitude (radians) of a ring-scheme pixel centre.
    fn pix2ang(&self, pix: u64) -> (f64, f64) {
        let fact2 = 4.0 / self.npix as f64;

        if pix < self.ncap {
            let iring = (1 + isqrt(1 + 2 * pix)) >> 1;
            let iphi = (pix + 1) - 2 * iring * (iring - 1);
            let z = 1.0 - (iring * iring) as f64 * fact2;
            let phi = (iphi as f64 - 0.5) * FRAC_PI_2 / iring as f64;
            (z.acos(), phi)
        } else if pix < self.npix - self.ncap {
            let nl4 = 4 * self.nside;
            let ip = pix - self.ncap;
            let tmp = ip / nl4;
            let iring = tmp + self.nside;
            let iphi = ip - nl4 * tmp + 1;
            let fodd = if (iring + self.nside) & 1 == 1 { 1.0 } else { 0.5 };
            let fact1 = (2 * self.nside) as f64 * fact2;
            let z = (2 * self.nside) as f64 - iring as f64;
            let z = z * fact1;
            let phi = (iphi as f64 - fodd) * PI * 0.75 * fact1;
            (z.acos(), phi)
        } else {
            let ip = self.npix - pix;
            let iring = (1 + isqrt(2 * ip - 1)) >> 1;
            let iphi = 4 * iring + 1 - (ip - 2 * iring * (iring - 1));
            let z = (iring * iring) as f64 * fact2 - 1.0;
            let phi = (iphi as f64 - 0.5) * FRAC_PI_2 / iring as f64;
            (z.acos(), phi)
        }
    }
}

impl GridIndex for Healpix {
    fn cell_count(&self) -> u64 {
        self.npix
    }

    fn coordinate_to_cell(&self, lon_deg: f64, lat_deg: f64) -> Result<u64, GridError> {
        if !(0.0..=360.0).contains(&lon_deg) || !(-90.0..=90.0).contains(&lat_deg) {
            return Err(GridError::CoordinateOutOfRange {
                lon: lon_deg,
                lat: lat_deg,
            });
        }
        let theta = (90.0 - lat_deg).to_radians();
        Ok(self.ang2pix(theta, lon_deg.to_radians()))
    }

    fn cell_to_coordinate(&self, index: u64) -> Result<(f64, f64), GridError> {
        if index >= self.npix {
            return Err(GridError::CellOutOfRange {
                index,
                cells: self.npix,
            });
        }
        let (theta, phi) = self.pix2ang(index);
        let lon = phi.to_degrees().rem_euclid(360.0);
        Ok((lon, 90.0 - theta.to_degrees()))
    }

    fn resolution_arcmin(&self) -> f64 {
        (4.0 * PI / self.npix as f64).sqrt().to_degrees() * 60.0
    }
}

/// Non-negative remainder of `v1 / v2`, in `[0, v2)`.
fn fmodulo(v1: f64, v2: f64) -> f64 {
    if v1 >= 0.0 {
        if v1 < v2 { v1 } else { v1 % v2 }
    } else {
        let tmp = v1 % v2 + v2;
        if tmp == v2 { 0.0 } else { tmp }
    }
}

/// Integer square root (floor).
fn isqrt(v: u64) -> u64 {
    let mut r = (v as f64).sqrt() as u64;
    while r * r > v {
        r -= 1;
    }
    while (r + 1) * (r + 1) <= v {
        r += 1;
    }
    r
}
