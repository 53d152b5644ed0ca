// Written by Clark Moody and the rust-bitcoin developers.
// SPDX-License-Identifier: MIT

//! Provides an `Hrp` type that represents the human-readable part of a bech32 encoded string.
//!
//! > The human-readable part, which is intended to convey the type of data, or anything else that
//! > is relevant to the reader. This part MUST contain 1 to 83 US-ASCII characters, with each
//! > character having a value in the range [33-126]. HRP validity may be further restricted by
//! > specific applications.
//!
//! ref: [BIP-173](https://github.com/bitcoin/bips/blob/master/bip-0173.mediawiki#user-content-Bech32)

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

/// Maximum length of the human-readable part, as defined by BIP-173.
pub const MAX_HRP_LEN: usize = 83;

/// The human-readable part (human readable prefix before the '1' separator).
///
/// Always 1 to 83 characters long, each in the range [33-126], and never mixed case.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hrp {
    buf: String,
}

impl Hrp {
    /// Parses the human-readable part checking it is valid as defined by [BIP-173].
    ///
    /// This does _not_ check that the `hrp` is an in-use HRP within Bitcoin (eg, "bc"), rather it
    /// checks that the HRP string is valid as per the specification in [BIP-173]. The HRP is kept
    /// exactly as given, case included.
    ///
    /// [BIP-173]: <https://github.com/bitcoin/bips/blob/master/bip-0173.mediawiki>
    pub fn parse(hrp: &str) -> Result<Self, Error> {
        use Error::*;

        if hrp.is_empty() {
            return Err(Empty);
        }
        if hrp.len() > MAX_HRP_LEN {
            return Err(TooLong(hrp.len()));
        }

        let mut has_lower: bool = false;
        let mut has_upper: bool = false;
        for c in hrp.chars() {
            if !c.is_ascii() {
                return Err(NonAsciiChar(c));
            }
            let b = c as u8;
            // Valid subset of ASCII
            if !(33..=126).contains(&b) {
                return Err(InvalidAsciiByte(b));
            }

            if b.is_ascii_lowercase() {
                has_lower = true;
            } else if b.is_ascii_uppercase() {
                has_upper = true;
            };

            if has_lower && has_upper {
                return Err(MixedCase);
            }
        }

        Ok(Hrp { buf: hrp.to_string() })
    }

    /// Creates an HRP from a string literal already known to be valid, without checking it.
    pub(crate) fn parse_unchecked(hrp: &str) -> Self {
        debug_assert!(Hrp::parse(hrp).is_ok(), "invalid hrp literal {:?}", hrp);
        Hrp { buf: hrp.to_string() }
    }

    /// Returns a reference to the inner human-readable part.
    pub fn as_str(&self) -> &str { &self.buf }

    /// Returns the ASCII bytes of the human-readable part.
    pub fn as_bytes(&self) -> &[u8] { self.buf.as_bytes() }

    /// Returns the length (number of characters) of the human-readable part.
    ///
    /// Guaranteed to be between 1 and 83 inclusive.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.buf.len() }

    /// Returns a lowercase copy of this human-readable part.
    pub fn to_lowercase(&self) -> Hrp { Hrp { buf: self.buf.to_ascii_lowercase() } }
}

impl fmt::Display for Hrp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.write_str(&self.buf) }
}

impl fmt::Debug for Hrp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "Hrp({:?})", self.buf) }
}

impl FromStr for Hrp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Self::parse(s) }
}

impl AsRef<str> for Hrp {
    fn as_ref(&self) -> &str { &self.buf }
}

impl PartialEq<str> for Hrp {
    fn eq(&self, other: &str) -> bool { self.buf == other }
}

impl PartialEq<&str> for Hrp {
    fn eq(&self, other: &&str) -> bool { self.buf == *other }
}

/// Errors encountered while checking the human-readable part as defined by [BIP-173].
///
/// [BIP-173]: <https://github.com/bitcoin/bips/blob/master/bip-0173.mediawiki#user-content-Bech32>
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The human-readable part is too long.
    TooLong(usize),
    /// The human-readable part is empty.
    Empty,
    /// Found a non-ASCII character.
    NonAsciiChar(char),
    /// Byte value not within acceptable US-ASCII range.
    InvalidAsciiByte(u8),
    /// The human-readable part cannot mix upper and lower case.
    MixedCase,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Error::*;

        match *self {
            TooLong(len) =>
                write!(f, "hrp is too long, found {} characters, must be <= {}", len, MAX_HRP_LEN),
            Empty => write!(f, "hrp is empty, must have at least 1 character"),
            NonAsciiChar(c) => write!(f, "found non-ASCII character: {}", c),
            InvalidAsciiByte(b) => write!(f, "byte value is not valid US-ASCII: \'{:x}\'", b),
            MixedCase => write!(f, "hrp cannot mix upper and lower case"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use Error::*;

        match *self {
            TooLong(_) | Empty | NonAsciiChar(_) | InvalidAsciiByte(_) | MixedCase => None,
        }
    }
}
