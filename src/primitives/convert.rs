// SPDX-License-Identifier: MIT

//! Conversion between bit widths.
//!
//! Treats the input as one big-endian bitstream and regroups it, used 8 to 5 to turn bytes into
//! bech32 data characters and 5 to 8 to turn them back.

use alloc::vec::Vec;
use core::fmt;

use crate::primitives::gf32::Fe32;

/// Parse/convert base32 slice to `Self`. It is the reciprocal of
/// `ToBase32`.
pub trait FromBase32: Sized {
    /// The associated error which can be returned from parsing (e.g. because of bad padding).
    type Err;

    /// Convert a base32 slice to `Self`.
    fn from_base32(b32: &[Fe32]) -> Result<Self, Self::Err>;
}

/// A trait for converting a value to a type `T` that represents a `Fe32` slice.
pub trait ToBase32 {
    /// Convert `Self` to base32 vector.
    fn to_base32(&self) -> Vec<Fe32> {
        let mut buff = Vec::new();
        self.write_base32(&mut buff);
        buff
    }

    /// Convert `Self` to base32 and append the result to a supplied, mutable buffer.
    fn write_base32(&self, buffer: &mut Vec<Fe32>);
}

impl FromBase32 for Vec<u8> {
    type Err = Error;

    /// Convert base32 to base256, removes null-padding if present, returns
    /// `Err(Error::InvalidPadding)` if padding bits are unequal `0`
    fn from_base32(b32: &[Fe32]) -> Result<Self, Self::Err> { convert_bits(b32, 5, 8, false) }
}

impl<T: AsRef<[u8]>> ToBase32 for T {
    fn write_base32(&self, buffer: &mut Vec<Fe32>) {
        let mut acc: u16 = 0;
        let mut bits: u32 = 0;
        for b in self.as_ref() {
            acc = (acc << 8) | u16::from(*b);
            bits += 8;
            while bits >= 5 {
                bits -= 5;
                buffer.push(Fe32::from_low_5_bits((acc >> bits) as u8));
            }
            // Only the unemitted low bits are needed from here on.
            acc &= (1_u16 << bits) - 1;
        }
        if bits > 0 {
            buffer.push(Fe32::from_low_5_bits((acc << (5 - bits)) as u8));
        }
    }
}

/// Convert between bit sizes.
///
/// # Errors
///
/// * `Error::InvalidData` if any element of `data` is out of range
/// * `Error::InvalidPadding` if `pad == false` and either too many bits are left over or the
///   left over padding bits are not `0`
///
/// # Panics
///
/// Function will panic if attempting to convert `from` or `to` a bit size that
/// is 0 or larger than 8 bits.
///
/// # Examples
///
/// ```rust
/// use segwit_addr::primitives::convert::convert_bits;
/// let base5 = convert_bits(&[0xff_u8], 8, 5, true);
/// assert_eq!(base5.unwrap(), vec![0x1f, 0x1c]);
/// ```
pub fn convert_bits<T>(data: &[T], from: u32, to: u32, pad: bool) -> Result<Vec<u8>, Error>
where
    T: Into<u8> + Copy,
{
    if from > 8 || to > 8 || from == 0 || to == 0 {
        panic!("convert_bits `from` and `to` parameters 0 or greater than 8");
    }
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut ret: Vec<u8> = Vec::with_capacity(data.len() * from as usize / to as usize + 1);
    let maxv: u32 = (1 << to) - 1;
    for value in data {
        let v: u32 = u32::from(Into::<u8>::into(*value));
        if (v >> from) != 0 {
            // Input value exceeds `from` bit size
            return Err(Error::InvalidData(v as u8));
        }
        acc = (acc << from) | v;
        bits += from;
        while bits >= to {
            bits -= to;
            ret.push(((acc >> bits) & maxv) as u8);
        }
        // Keep the accumulator from overflowing on long inputs.
        acc &= (1_u32 << bits) - 1;
    }
    if pad {
        if bits > 0 {
            ret.push(((acc << (to - bits)) & maxv) as u8);
        }
    } else if bits >= from || ((acc << (to - bits)) & maxv) != 0 {
        return Err(Error::InvalidPadding);
    }
    Ok(ret)
}

/// Error converting between bit widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Some part of the data has a value wider than the source bit width.
    InvalidData(u8),
    /// The bit conversion failed due to a padding issue.
    InvalidPadding,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Error::*;

        match *self {
            InvalidData(n) => write!(f, "invalid data point ({})", n),
            InvalidPadding => write!(f, "invalid padding"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use Error::*;

        match *self {
            InvalidData(_) | InvalidPadding => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use core::convert::TryFrom;

    use super::*;

    #[test]
    fn valid_conversion() {
        // Set of [data, from_bits, to_bits, pad, result]
        let tests: Vec<(Vec<u8>, u32, u32, bool, Vec<u8>)> = vec![
            (vec![0x01], 1, 1, true, vec![0x01]),
            (vec![0x01, 0x01], 1, 1, true, vec![0x01, 0x01]),
            (vec![0x01], 8, 8, true, vec![0x01]),
            (vec![0x01], 8, 4, true, vec![0x00, 0x01]),
            (vec![0x01], 8, 2, true, vec![0x00, 0x00, 0x00, 0x01]),
            (vec![0x01], 8, 1, true, vec![0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01]),
            (vec![0xff], 8, 5, true, vec![0x1f, 0x1c]),
            (vec![0x1f, 0x1c], 5, 8, false, vec![0xff]),
            (vec![], 8, 5, true, vec![]),
            (vec![], 5, 8, false, vec![]),
        ];
        for (data, from_bits, to_bits, pad, expected_result) in tests {
            let result = convert_bits(&data, from_bits, to_bits, pad);
            assert_eq!(result, Ok(expected_result));
        }
    }

    #[test]
    fn invalid_conversion() {
        // Set of [data, from_bits, to_bits, pad, expected error]
        let tests: Vec<(Vec<u8>, u32, u32, bool, Error)> = vec![
            // Non-zero padding bits.
            (vec![0xff], 8, 5, false, Error::InvalidPadding),
            (vec![0x1f, 0x1f], 5, 8, false, Error::InvalidPadding),
            // A whole input group left over.
            (vec![0x00, 0x00, 0x00], 5, 8, false, Error::InvalidPadding),
            (vec![0x02], 1, 1, true, Error::InvalidData(0x02)),
            (vec![0x20], 5, 8, true, Error::InvalidData(0x20)),
        ];
        for (data, from_bits, to_bits, pad, expected_error) in tests {
            let result = convert_bits(&data, from_bits, to_bits, pad);
            assert_eq!(result, Err(expected_error));
        }
    }

    #[test]
    fn convert_bits_invalid_bit_size() {
        use std::panic::{catch_unwind, set_hook, take_hook};

        let invalid = &[(0, 8), (5, 0), (9, 5), (8, 10), (0, 16)];

        for &(from, to) in invalid {
            set_hook(Box::new(|_| {}));
            let result = catch_unwind(|| {
                let _ = convert_bits(&[0_u8], from, to, true);
            });
            let _ = take_hook();
            assert!(result.is_err());
        }
    }

    #[test]
    fn bytes_roundtrip_through_base32() {
        for len in 0..64_usize {
            let bytes = (0..len).map(|i| (i * 37 + 11) as u8).collect::<Vec<u8>>();
            let b32 = convert_bits(&bytes, 8, 5, true).unwrap();
            assert_eq!(convert_bits(&b32, 5, 8, false), Ok(bytes));
        }
    }

    #[test]
    fn from_base32() {
        let fes = |v: &[u8]| v.iter().map(|&b| Fe32::try_from(b).unwrap()).collect::<Vec<_>>();
        assert_eq!(Vec::from_base32(&fes(&[0x1f, 0x1c])), Ok(vec![0xff]));
        assert_eq!(Vec::from_base32(&fes(&[0x1f, 0x1f])), Err(Error::InvalidPadding));
    }

    #[test]
    fn to_base32_agrees_with_convert_bits() {
        for len in 0..48_usize {
            let bytes = (0..len).map(|i| (i * 7 + 200) as u8).collect::<Vec<u8>>();
            let expected = convert_bits(&bytes, 8, 5, true).unwrap();
            let got = bytes.to_base32().into_iter().map(u8::from).collect::<Vec<u8>>();
            assert_eq!(got, expected);
        }
        assert_eq!([0xff_u8].to_base32(), vec![Fe32::L, Fe32::try_from(0x1c).unwrap()]);
    }
}
