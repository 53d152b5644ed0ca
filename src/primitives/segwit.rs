// SPDX-License-Identifier: MIT

//! Segregated Witness functionality - useful for enforcing parts of [`BIP-173`] and [`BIP-141`].
//!
//! [BIP-173]: <https://github.com/bitcoin/bips/blob/master/bip-0173.mediawiki>
//! [BIP-141]: <https://github.com/bitcoin/bips/blob/master/bip-0141.mediawiki#user-content-Witness_program>

use core::fmt;

/// The highest valid witness version.
pub const MAX_WITNESS_VERSION: u8 = 16;

/// The minimum length of a witness program, in bytes.
pub const MIN_WITNESS_PROGRAM_LEN: usize = 2;

/// The maximum length of a witness program, in bytes.
pub const MAX_WITNESS_PROGRAM_LEN: usize = 40;

/// Returns true if given number represents a valid segwit version.
pub fn is_valid_witness_version(witness_version: u8) -> bool {
    validate_witness_version(witness_version).is_ok()
}

/// Returns true if `length` represents a valid witness program length for `witness_version`.
pub fn is_valid_witness_program_length(length: usize, witness_version: u8) -> bool {
    validate_witness_program_length(length, witness_version).is_ok()
}

/// Checks that the given number represents a valid segwit witness version.
pub fn validate_witness_version(witness_version: u8) -> Result<(), InvalidWitnessVersionError> {
    if witness_version > MAX_WITNESS_VERSION {
        Err(InvalidWitnessVersionError(witness_version))
    } else {
        Ok(())
    }
}

/// Validates the segwit witness program `length` rules for witness `version`.
///
/// Version 0 programs (p2wpkh and p2wsh) must be exactly 20 or 32 bytes, all others 2 to 40.
pub fn validate_witness_program_length(
    length: usize,
    version: u8,
) -> Result<(), WitnessLengthError> {
    use WitnessLengthError::*;

    if length < MIN_WITNESS_PROGRAM_LEN {
        return Err(TooShort);
    }
    if length > MAX_WITNESS_PROGRAM_LEN {
        return Err(TooLong);
    }
    if version == 0 && length != 20 && length != 32 {
        return Err(InvalidSegwitV0);
    }
    Ok(())
}

/// Number does not represent a valid witness version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidWitnessVersionError(pub u8);

impl fmt::Display for InvalidWitnessVersionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid witness version {}, must be <= {}", self.0, MAX_WITNESS_VERSION)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidWitnessVersionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> { None }
}

/// Witness program invalid because of incorrect length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum WitnessLengthError {
    /// The witness data is too short.
    TooShort,
    /// The witness data is too long.
    TooLong,
    /// The segwit v0 witness is not 20 or 32 bytes long.
    InvalidSegwitV0,
}

impl fmt::Display for WitnessLengthError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use WitnessLengthError::*;

        match *self {
            TooShort => write!(f, "witness program is less than 2 bytes long"),
            TooLong => write!(f, "witness program is more than 40 bytes long"),
            InvalidSegwitV0 => write!(f, "the segwit v0 witness is not 20 or 32 bytes long"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for WitnessLengthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use WitnessLengthError::*;

        match *self {
            TooShort | TooLong | InvalidSegwitV0 => None,
        }
    }
}
