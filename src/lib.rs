// Written by Clark Moody and the rust-bitcoin developers.
// SPDX-License-Identifier: MIT

//! Encoding and decoding of the Bech32 format and of segwit addresses.
//!
//! Bech32 is a 5-bit (base-32) encoding scheme that produces strings that comprise
//! a human-readable part, a separator, a data part, and a checksum. The encoding
//! implements a BCH code that guarantees error detection of up to four characters
//! with less than 1 in 1 billion chance of failing to detect more errors.
//!
//! The Bech32 encoding was originally formulated in [BIP-173].
//!
//! # Examples
//!
//! ```
//! use segwit_addr::{Fe32, Hrp, ToBase32};
//!
//! let hrp = Hrp::parse("bech32").expect("valid hrp");
//! // Converts base256 data to base32 and adds padding if needed.
//! let data: Vec<Fe32> = [0xb4, 0xff, 0xa5].to_base32();
//!
//! let encoded = segwit_addr::encode(&hrp, &data);
//! assert_eq!(encoded, "bech321knl623tk6v7");
//!
//! let (decoded_hrp, decoded_data) = segwit_addr::decode(&encoded).expect("valid bech32 string");
//! assert_eq!(decoded_hrp, hrp);
//! assert_eq!(decoded_data, data);
//! ```
//!
//! Segwit addresses live in the [`segwit`] module:
//!
//! ```
//! use segwit_addr::segwit::{self, Network};
//!
//! let addr = "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4";
//! let (version, program) = segwit::decode(Network::Main, addr).expect("valid address");
//! assert_eq!(version, 0);
//! assert_eq!(segwit::encode(Network::Main, version, &program), addr);
//! ```
//!
//! [BIP-173]: <https://github.com/bitcoin/bips/blob/master/bip-0173.mediawiki>

#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]
// Experimental features we need.
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
// Coding conventions
#![deny(missing_docs)]
#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]

extern crate alloc;

pub mod primitives;
pub mod segwit;

use alloc::string::String;
use alloc::vec::Vec;
use core::convert::TryFrom;
use core::fmt;
use core::str::FromStr;

use internals::write_err;
use log::trace;

use crate::primitives::checksum::{create_checksum, verify_checksum, CHECKSUM_LENGTH};
use crate::primitives::hrp;
#[rustfmt::skip]                // Keep public re-exports separate.
#[doc(inline)]
pub use {
    crate::primitives::convert::{convert_bits, FromBase32, ToBase32},
    crate::primitives::gf32::Fe32,
    crate::primitives::hrp::Hrp,
};

/// Human-readable part and data part separator.
const SEP: char = '1';

/// The maximum length of a bech32 string accepted by [`decode`], as defined by BIP-173.
pub const MAX_STRING_LENGTH: usize = 90;

/// Encodes `data` as a bech32 string under `hrp`, appending the checksum.
///
/// The HRP is used exactly as given, callers wanting the canonical form should pass a lowercase
/// HRP. No length limit is enforced, see [`MAX_STRING_LENGTH`].
pub fn encode(hrp: &Hrp, data: &[Fe32]) -> String {
    let checksum = create_checksum(hrp, data);

    let mut s = String::with_capacity(hrp.len() + 1 + data.len() + CHECKSUM_LENGTH);
    s.push_str(hrp.as_str());
    s.push(SEP);
    s.extend(data.iter().chain(checksum.iter()).map(|fe| fe.to_char()));
    s
}

/// Decodes a bech32 string, returning the HRP and the data with the checksum removed.
///
/// Characters after the separator must be in the lowercase bech32 alphabet, callers holding an
/// uppercase string should lowercase it first.
///
/// # Errors
///
/// If the string is malformed, too long, or has an invalid checksum.
pub fn decode(s: &str) -> Result<(Hrp, Vec<Fe32>), Error> {
    decode_checked(s).map_err(|e| {
        trace!("rejected bech32 string {:?}: {}", s, e);
        e
    })
}

fn decode_checked(s: &str) -> Result<(Hrp, Vec<Fe32>), Error> {
    if let Some(c) = s.chars().find(|c| !(33..=126).contains(&u32::from(*c))) {
        return Err(Error::InvalidChar(c));
    }

    // Only printable ASCII from here on, byte and char positions coincide.
    let sep_pos = s.rfind(SEP).ok_or(Error::MissingSeparator)?;
    if sep_pos == 0 {
        return Err(Error::InvalidHrp(hrp::Error::Empty));
    }
    if sep_pos + 1 + CHECKSUM_LENGTH > s.len() {
        return Err(Error::InvalidChecksumLength);
    }
    if s.len() > MAX_STRING_LENGTH {
        return Err(Error::TooLong(s.len()));
    }

    let (raw_hrp, raw_data) = (&s[..sep_pos], &s[sep_pos + 1..]);
    let mut data = raw_data
        .chars()
        .map(|c| Fe32::from_char(c).map_err(|_| Error::InvalidBech32Char(c)))
        .collect::<Result<Vec<Fe32>, Error>>()?;
    let hrp = Hrp::parse(raw_hrp)?;

    if !verify_checksum(&hrp, &data) {
        return Err(Error::InvalidChecksum);
    }

    data.truncate(data.len() - CHECKSUM_LENGTH);
    Ok((hrp, data))
}

/// Grouping structure for the human-readable part and the data part
/// of decoded Bech32 string.
#[derive(PartialEq, Eq, Debug, Clone, PartialOrd, Ord, Hash)]
pub struct Bech32 {
    /// Human-readable part
    hrp: Hrp,
    /// Data payload, without checksum
    data: Vec<Fe32>,
}

impl Bech32 {
    /// Constructs a `Bech32` struct from an already validated HRP and data.
    pub fn new(hrp: Hrp, data: Vec<Fe32>) -> Bech32 { Bech32 { hrp, data } }

    /// Constructs a `Bech32` struct from a raw HRP and data that is not range checked yet.
    ///
    /// # Errors
    ///
    /// If `hrp` is not a valid HRP or any element of `data` is greater than 31.
    pub fn new_check_data(hrp: &str, data: &[u8]) -> Result<Bech32, Error> {
        let hrp = Hrp::parse(hrp)?;
        let data = data
            .iter()
            .map(|&b| Fe32::try_from(b).map_err(|_| Error::InvalidData(b)))
            .collect::<Result<Vec<Fe32>, Error>>()?;
        Ok(Bech32 { hrp, data })
    }

    /// Returns the human readable part.
    pub fn hrp(&self) -> &Hrp { &self.hrp }

    /// Returns the data part.
    pub fn data(&self) -> &[Fe32] { &self.data }

    /// Destructures the `Bech32` struct into its parts.
    pub fn into_parts(self) -> (Hrp, Vec<Fe32>) { (self.hrp, self.data) }
}

impl fmt::Display for Bech32 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&encode(&self.hrp, &self.data))
    }
}

impl FromStr for Bech32 {
    type Err = Error;

    fn from_str(s: &str) -> Result<Bech32, Error> {
        let (hrp, data) = decode(s)?;
        Ok(Bech32 { hrp, data })
    }
}

/// Error types for Bech32 encoding / decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A character is outside the printable US-ASCII range [33-126].
    InvalidChar(char),
    /// String does not contain the separator character.
    MissingSeparator,
    /// Human-readable part is invalid.
    InvalidHrp(hrp::Error),
    /// Too few characters after the separator to hold a checksum.
    InvalidChecksumLength,
    /// The string is longer than 90 characters.
    TooLong(usize),
    /// Some part of the string contains a character that is not a valid bech32 character.
    InvalidBech32Char(char),
    /// The checksum does not match the rest of the data.
    InvalidChecksum,
    /// Some part of the data has an invalid value.
    InvalidData(u8),
}

impl From<hrp::Error> for Error {
    fn from(e: hrp::Error) -> Self { Error::InvalidHrp(e) }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Error::*;

        match *self {
            InvalidChar(c) => write!(f, "invalid character (code={})", u32::from(c)),
            MissingSeparator => write!(f, "missing human-readable separator, \"{}\"", SEP),
            InvalidHrp(ref e) => write_err!(f, "invalid human-readable part"; e),
            InvalidChecksumLength => write!(f, "the checksum is not a valid length"),
            TooLong(len) => write!(
                f,
                "string is too long, found {} characters, must be <= {}",
                len, MAX_STRING_LENGTH
            ),
            InvalidBech32Char(c) => write!(f, "invalid bech32 character {:?}", c),
            InvalidChecksum => write!(f, "invalid checksum"),
            InvalidData(n) => write!(f, "invalid data point ({})", n),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use Error::*;

        match *self {
            InvalidHrp(ref e) => Some(e),
            InvalidChar(_)
            | MissingSeparator
            | InvalidChecksumLength
            | TooLong(_)
            | InvalidBech32Char(_)
            | InvalidChecksum
            | InvalidData(_) => None,
        }
    }
}
