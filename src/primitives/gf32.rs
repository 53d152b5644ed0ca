// Written by Clark Moody and the rust-bitcoin developers.
// SPDX-License-Identifier: MIT

//! GF32 - Galois Field over 32 elements.
//!
//! Every bech32 data character is one element of this field, i.e. an integer in the range `0..32`.
//! The bech32 alphabet maps each element to a single printable character and back.

use core::convert::TryFrom;
use core::fmt;

/// The bech32 alphabet, the position of each character is its numeric value.
const CHARS_LOWER: [char; 32] = [
    'q', 'p', 'z', 'r', 'y', '9', 'x', '8', //  +0
    'g', 'f', '2', 't', 'v', 'd', 'w', '0', //  +8
    's', '3', 'j', 'n', '5', '4', 'k', 'h', // +16
    'c', 'e', '6', 'm', 'u', 'a', '7', 'l', // +24
];

/// Mapping from ASCII byte to field element, `-1` for bytes outside the alphabet.
///
/// Only the lowercase alphabet is accepted.
const CHARS_INV: [i8; 128] = [
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, //
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, //
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, //
    15, -1, 10, 17, 21, 20, 26, 30, 7, 5, -1, -1, -1, -1, -1, -1, //
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, //
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, //
    -1, 29, -1, 24, 13, 25, 9, 8, 23, -1, 18, 22, 31, 27, 19, -1, //
    1, 0, 3, 16, 11, 28, 12, 14, 6, 4, 2, -1, -1, -1, -1, -1, //
];

/// An element in GF(32), the finite field containing elements `[0,31]` inclusive.
// Maintains the invariant that inner is never greater than 31.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fe32(u8);

impl Fe32 {
    /// Numeric value 0, bech32 character 'q'.
    pub const Q: Fe32 = Fe32(0);
    /// Numeric value 1, bech32 character 'p'.
    pub const P: Fe32 = Fe32(1);
    /// Numeric value 16, bech32 character 's'.
    pub const S: Fe32 = Fe32(16);
    /// Numeric value 31, bech32 character 'l'.
    pub const L: Fe32 = Fe32(31);

    /// Iterator over all field elements, in alphabetical order.
    pub fn iter_alpha() -> impl Iterator<Item = Fe32> { (0..32).map(Fe32) }

    /// Creates a field element from a single bech32 character.
    ///
    /// # Errors
    ///
    /// If the input char is not part of the lowercase bech32 alphabet.
    pub fn from_char(c: char) -> Result<Fe32, Error> {
        // i8::try_from gets a value in the range 0..=127 since char is unsigned.
        let byte = i8::try_from(u32::from(c)).map_err(|_| Error::InvalidChar(c))?;
        // Now we have a valid ASCII value cast is safe.
        let ascii = byte as usize;
        // We use -1 for any array element that is an invalid char to trigger error from u8::try_from
        let u5 = u8::try_from(CHARS_INV[ascii]).map_err(|_| Error::InvalidChar(c))?;
        Ok(Fe32(u5))
    }

    /// Converts the field element to a lowercase bech32 character.
    #[inline]
    pub fn to_char(self) -> char { CHARS_LOWER[usize::from(self.0)] }

    /// Creates a field element from the low 5 bits of `byte`, discarding the rest.
    #[inline]
    pub fn from_low_5_bits(byte: u8) -> Fe32 { Fe32(byte & 0x1f) }

    /// Converts the field element to a 5-bit u8, with the high bits set to 0.
    #[inline]
    pub fn to_u8(self) -> u8 { self.0 }
}

impl fmt::Debug for Fe32 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Fe32({})", self.0)
    }
}

impl fmt::Display for Fe32 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { fmt::Display::fmt(&self.to_char(), f) }
}

impl From<Fe32> for u8 {
    #[inline]
    fn from(v: Fe32) -> u8 { v.0 }
}

impl AsRef<u8> for Fe32 {
    fn as_ref(&self) -> &u8 { &self.0 }
}

impl TryFrom<u8> for Fe32 {
    type Error = Error;

    /// Tries to create an [`Fe32`] type from a number.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is outside of the range of an `Fe32`.
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > 31 {
            return Err(Error::InvalidByte(value));
        }
        Ok(Fe32(value))
    }
}

/// Error converting to a field element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Tried to interpret an integer as a GF32 element but it could not be converted to an u8.
    InvalidByte(u8),
    /// Tried to interpret a character as a GF32 element but it is not part of the bech32 character set.
    InvalidChar(char),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Error::*;

        match *self {
            InvalidByte(b) => write!(f, "invalid field element value {}, must be < 32", b),
            InvalidChar(c) => write!(f, "invalid char {:?} (not part of the bech32 alphabet)", c),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use Error::*;

        match *self {
            InvalidByte(_) | InvalidChar(_) => None,
        }
    }
}
