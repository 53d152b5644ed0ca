// SPDX-License-Identifier: MIT

//! Degree-2 [BCH] code checksum.
//!
//! The bech32 checksum treats the HRP and data as the coefficients of a polynomial over GF(32)
//! and reduces it modulo a fixed generator, packed into the 30 bits of a `u32`.
//!
//! [BCH]: <https://en.wikipedia.org/wiki/BCH_code>

use alloc::vec::Vec;

use crate::primitives::gf32::Fe32;
use crate::primitives::hrp::Hrp;

/// The number of characters in the checksum.
pub const CHECKSUM_LENGTH: usize = 6;

/// The residue, modulo the generator polynomial, that a valid codeword will have.
pub const TARGET_RESIDUE: u32 = 1;

// Bech32 generator coefficients, copied from Bitcoin Core src/bech32.cpp
const GEN: [u32; 5] = [0x3b6a_57b2, 0x2650_8e6d, 0x1ea1_19fa, 0x3d42_33dd, 0x2a14_62b3];

/// A checksum engine, which can be used to compute or verify a checksum.
///
/// Use this to verify a checksum, feed it the data to be checksummed using
/// the `Self::input_*` methods, then check [`Self::residue`] against
/// [`TARGET_RESIDUE`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Engine {
    residue: u32,
}

impl Default for Engine {
    fn default() -> Self { Self::new() }
}

impl Engine {
    /// Constructs a new checksum engine with no data input.
    #[inline]
    pub fn new() -> Self { Engine { residue: 1 } }

    /// Feeds `hrp` into the checksum engine.
    ///
    /// Uses the bytes exactly as they appear in `hrp`, case included.
    pub fn input_hrp(&mut self, hrp: &Hrp) {
        for b in hrp.as_bytes() {
            self.input_fe(Fe32::from_low_5_bits(b >> 5));
        }
        self.input_fe(Fe32::Q);
        for b in hrp.as_bytes() {
            self.input_fe(Fe32::from_low_5_bits(*b));
        }
    }

    /// Adds a single gf32 element to the checksum engine.
    ///
    /// This is where the actual checksum computation magic happens.
    #[inline]
    pub fn input_fe(&mut self, e: Fe32) {
        let b = (self.residue >> 25) as u8;
        self.residue = (self.residue & 0x1ff_ffff) << 5 ^ u32::from(e.to_u8());
        for (i, gen) in GEN.iter().enumerate() {
            if (b >> i) & 1 == 1 {
                self.residue ^= gen;
            }
        }
    }

    /// Inputs the target residue of the checksum.
    ///
    /// Checksums are generated by appending the target residue to the input
    /// string, then computing the actual residue, and then replacing the
    /// target with the actual. This method lets us compute the actual residue
    /// without doing any string concatenations.
    pub fn input_target_residue(&mut self) {
        for _ in 0..CHECKSUM_LENGTH {
            self.input_fe(Fe32::Q);
        }
    }

    /// Returns the current residue of the checksum engine.
    #[inline]
    pub fn residue(&self) -> u32 { self.residue }

    /// Returns the checksum characters, most significant first.
    ///
    /// Only meaningful after the data and [`Self::input_target_residue`] have been fed in.
    pub fn checksum(&self) -> [Fe32; CHECKSUM_LENGTH] {
        let plm = self.residue ^ TARGET_RESIDUE;
        let mut checksum = [Fe32::Q; CHECKSUM_LENGTH];
        for (i, fe) in checksum.iter_mut().enumerate() {
            *fe = Fe32::from_low_5_bits((plm >> (5 * (5 - i))) as u8);
        }
        checksum
    }
}

/// Computes the bech32 polynomial modulus of `values`.
pub fn polymod(values: &[Fe32]) -> u32 {
    let mut engine = Engine::new();
    for v in values {
        engine.input_fe(*v);
    }
    engine.residue()
}

/// Expands the human-readable part into the values fed to the checksum.
///
/// The high 3 bits of each character, a zero, then the low 5 bits of each character.
pub fn hrp_expand(hrp: &Hrp) -> Vec<Fe32> {
    let bytes = hrp.as_bytes();
    let mut v = Vec::with_capacity(bytes.len() * 2 + 1);
    v.extend(bytes.iter().map(|b| Fe32::from_low_5_bits(b >> 5)));
    v.push(Fe32::Q);
    v.extend(bytes.iter().map(|b| Fe32::from_low_5_bits(*b)));
    v
}

/// Creates the checksum for `data` (checksum not yet appended) under `hrp`.
pub fn create_checksum(hrp: &Hrp, data: &[Fe32]) -> [Fe32; CHECKSUM_LENGTH] {
    let mut engine = Engine::new();
    engine.input_hrp(hrp);
    for fe in data {
        engine.input_fe(*fe);
    }
    engine.input_target_residue();
    engine.checksum()
}

/// Returns true if `data` (checksum included) carries a valid checksum for `hrp`.
pub fn verify_checksum(hrp: &Hrp, data: &[Fe32]) -> bool {
    let mut engine = Engine::new();
    engine.input_hrp(hrp);
    for fe in data {
        engine.input_fe(*fe);
    }
    engine.residue() == TARGET_RESIDUE
}
