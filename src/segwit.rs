// Written by the rust-bitcoin developers.
// SPDX-License-Identifier: MIT

//! Encoding and decoding of addresses for segregated witness outputs.
//!
//! A segwit address is a restricted form of bech32 defined in [BIP-173]: the first data character
//! is the witness version and the rest is the witness program, regrouped from bytes into 5-bit
//! characters. The HRP names the network, "bc" for mainnet and "tb" for testnet.
//!
//! # Examples
//!
//! ```
//! use segwit_addr::segwit::{self, Network, WitnessProgram};
//!
//! let addr = "BC1SW50QA3JX3S";
//! let program = WitnessProgram::from_address(Network::Main, addr).expect("valid address");
//! assert_eq!(program.version(), 16);
//! assert_eq!(program.program(), &[0x75, 0x1e]);
//! assert_eq!(program.script_pubkey(), vec![0x90, 0x02, 0x75, 0x1e]);
//!
//! // Addresses are always encoded in lowercase.
//! assert_eq!(program.to_address(Network::Main), addr.to_lowercase());
//!
//! // Decoding never falls back to another network.
//! assert!(segwit::decode(Network::Test, addr).is_err());
//! ```
//!
//! [BIP-173]: <https://github.com/bitcoin/bips/blob/master/bip-0173.mediawiki>

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use internals::write_err;
use log::debug;

use crate::primitives::convert::{self, FromBase32, ToBase32};
use crate::primitives::gf32::Fe32;
use crate::primitives::hrp::Hrp;
use crate::primitives::segwit::{
    validate_witness_program_length, validate_witness_version, InvalidWitnessVersionError,
    WitnessLengthError, MAX_WITNESS_PROGRAM_LEN, MAX_WITNESS_VERSION,
};

/// The network an address belongs to, selects the human-readable part.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Network {
    /// Mainnet Bitcoin - "bc".
    Main,
    /// Bitcoin's testnet network - "tb".
    Test,
}

impl Network {
    /// Returns the lowercase human-readable part used by this network.
    pub fn hrp_str(self) -> &'static str {
        match self {
            Network::Main => "bc",
            Network::Test => "tb",
        }
    }

    /// Returns the human-readable part used by this network.
    pub fn hrp(self) -> Hrp { Hrp::parse_unchecked(self.hrp_str()) }

    /// Returns the network using `hrp`, in either case.
    pub fn from_hrp(hrp: &str) -> Result<Network, ParseNetworkError> {
        match hrp {
            "bc" | "BC" => Ok(Network::Main),
            "tb" | "TB" => Ok(Network::Test),
            _ => Err(ParseNetworkError { input: hrp.to_string() }),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Network::Main => f.write_str("main"),
            Network::Test => f.write_str("test"),
        }
    }
}

/// Parses a [`Network`] from its name or its human-readable part.
///
/// # Examples
///
/// ```
/// # use segwit_addr::segwit::Network;
/// assert_eq!("main".parse::<Network>().unwrap(), Network::Main);
/// assert_eq!("testnet".parse::<Network>().unwrap(), Network::Test);
/// assert_eq!("TB".parse::<Network>().unwrap(), Network::Test);
/// assert!("regtest".parse::<Network>().is_err());
/// ```
impl FromStr for Network {
    type Err = ParseNetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "main" | "mainnet" => Ok(Network::Main),
            "test" | "testnet" => Ok(Network::Test),
            _ => Network::from_hrp(s),
        }
    }
}

/// Encodes a segwit address, always in lowercase.
///
/// This is the inverse function of [`decode`]. The program length is not checked, use
/// [`WitnessProgram::new`] first if it comes from an untrusted source.
///
/// # Panics
///
/// If `witness_version` is greater than 16.
pub fn encode(network: Network, witness_version: u8, program: &[u8]) -> String {
    assert!(
        witness_version <= MAX_WITNESS_VERSION,
        "witness version {} out of range, must be <= {}",
        witness_version,
        MAX_WITNESS_VERSION
    );

    let mut data = Vec::with_capacity(1 + (program.len() * 8 + 4) / 5);
    data.push(Fe32::from_low_5_bits(witness_version));
    program.write_base32(&mut data);

    crate::encode(&network.hrp(), &data)
}

/// Decodes a segwit address for `network`, returning the witness version and witness program.
///
/// The address may be all lowercase or all uppercase. An address for a different network is
/// rejected, callers that don't know the network should try each one in turn.
///
/// # Errors
///
/// If the address is not a valid bech32 string, belongs to another network, or its witness
/// version or program breaks the rules of BIP-141.
pub fn decode(network: Network, address: &str) -> Result<(u8, Vec<u8>), Error> {
    decode_checked(network, address).map_err(|e| {
        debug!("rejected {} network segwit address {:?}: {}", network, address, e);
        e
    })
}

fn decode_checked(network: Network, address: &str) -> Result<(u8, Vec<u8>), Error> {
    if let Some(c) = address.chars().find(|c| !(33..=126).contains(&u32::from(*c))) {
        return Err(Error::InvalidChar(c));
    }
    let has_lower = address.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = address.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(Error::MixedCase);
    }

    let (hrp, data) = crate::decode(&address.to_ascii_lowercase())?;
    if hrp != network.hrp_str() {
        return Err(Error::UnexpectedHrp { expected: network, found: hrp });
    }

    let (version, program) = match data.split_first() {
        Some((version, program)) => (version.to_u8(), Vec::<u8>::from_base32(program)?),
        None => return Err(Error::InvalidProgramLength(WitnessLengthError::TooShort)),
    };
    // Range of the length first, so a bad version only shows once the length is plausible.
    validate_witness_program_length(program.len(), version)?;
    validate_witness_version(version)?;

    Ok((version, program))
}

/// Verifies that `address` is a valid segwit address for `network`.
///
/// # Errors
///
/// Same as [`decode`].
pub fn verify(network: Network, address: &str) -> Result<(), Error> {
    decode(network, address).map(|_| ())
}

/// Builds the output script paying to a witness program.
///
/// The layout is `[version_byte, program_length] ++ program` where `version_byte` is 0 for
/// version 0 and `0x80 + version` otherwise.
///
/// # Panics
///
/// If `witness_version` is greater than 16 or `program` is longer than 40 bytes.
pub fn output_script(witness_version: u8, program: &[u8]) -> Vec<u8> {
    assert!(
        witness_version <= MAX_WITNESS_VERSION,
        "witness version {} out of range, must be <= {}",
        witness_version,
        MAX_WITNESS_VERSION
    );
    assert!(
        program.len() <= MAX_WITNESS_PROGRAM_LEN,
        "witness program is {} bytes, must be <= {}",
        program.len(),
        MAX_WITNESS_PROGRAM_LEN
    );

    let mut script = Vec::with_capacity(2 + program.len());
    script.push(if witness_version == 0 { 0 } else { 0x80 + witness_version });
    script.push(program.len() as u8);
    script.extend_from_slice(program);
    script
}

/// A witness version together with a witness program that obeys the BIP-141 rules.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct WitnessProgram {
    version: u8,
    program: Vec<u8>,
}

impl WitnessProgram {
    /// Creates a witness program, checking the version and the program length.
    pub fn new(version: u8, program: Vec<u8>) -> Result<WitnessProgram, Error> {
        validate_witness_program_length(program.len(), version)?;
        validate_witness_version(version)?;
        Ok(WitnessProgram { version, program })
    }

    /// Decodes a witness program from a segwit address, see [`decode`].
    pub fn from_address(network: Network, address: &str) -> Result<WitnessProgram, Error> {
        let (version, program) = decode(network, address)?;
        Ok(WitnessProgram { version, program })
    }

    /// Parses the output script built by [`output_script`] back into a witness program.
    pub fn from_script_pubkey(script: &[u8]) -> Result<WitnessProgram, ScriptPubkeyError> {
        use ScriptPubkeyError::*;

        let (&version_byte, rest) = script.split_first().ok_or(TooShort)?;
        let (&declared, program) = rest.split_first().ok_or(TooShort)?;
        if usize::from(declared) != program.len() {
            return Err(LengthMismatch { declared, actual: program.len() });
        }

        let version = match version_byte {
            0 => 0,
            0x81..=0x90 => version_byte - 0x80,
            other => return Err(InvalidVersionByte(other)),
        };
        validate_witness_program_length(program.len(), version)?;

        Ok(WitnessProgram { version, program: program.to_vec() })
    }

    /// Returns the witness version.
    pub fn version(&self) -> u8 { self.version }

    /// Returns the witness program.
    pub fn program(&self) -> &[u8] { &self.program }

    /// Encodes this witness program as a lowercase address for `network`.
    pub fn to_address(&self, network: Network) -> String {
        encode(network, self.version, &self.program)
    }

    /// Returns the output script paying to this witness program.
    pub fn script_pubkey(&self) -> Vec<u8> { output_script(self.version, &self.program) }

    /// Destructures into the witness version and witness program.
    pub fn into_parts(self) -> (u8, Vec<u8>) { (self.version, self.program) }
}

/// Error decoding a segwit address.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A character is outside the printable US-ASCII range [33-126].
    InvalidChar(char),
    /// The address mixes lowercase and uppercase characters.
    MixedCase,
    /// The address is not a valid bech32 string.
    Bech32(crate::Error),
    /// The human-readable part does not belong to the requested network.
    UnexpectedHrp {
        /// The network the caller asked for.
        expected: Network,
        /// The human-readable part found in the address.
        found: Hrp,
    },
    /// The witness program does not regroup into whole bytes.
    Padding(convert::Error),
    /// Witness version is out of the range [0, 16] inclusive.
    InvalidWitnessVersion(InvalidWitnessVersionError),
    /// Invalid witness program length.
    InvalidProgramLength(WitnessLengthError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Error::*;

        match *self {
            InvalidChar(c) => write!(f, "invalid character (code={})", u32::from(c)),
            MixedCase => write!(f, "mixed-case strings not allowed"),
            Bech32(ref e) => write_err!(f, "invalid bech32 string"; e),
            UnexpectedHrp { expected, ref found } => write!(
                f,
                "human-readable part {} does not match {} network, expected {}",
                found,
                expected,
                expected.hrp_str()
            ),
            Padding(ref e) => write_err!(f, "invalid witness program padding"; e),
            InvalidWitnessVersion(ref e) => write_err!(f, "witness version error"; e),
            InvalidProgramLength(ref e) => write_err!(f, "witness program length error"; e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use Error::*;

        match *self {
            Bech32(ref e) => Some(e),
            Padding(ref e) => Some(e),
            InvalidWitnessVersion(ref e) => Some(e),
            InvalidProgramLength(ref e) => Some(e),
            InvalidChar(_) | MixedCase | UnexpectedHrp { .. } => None,
        }
    }
}

impl From<crate::Error> for Error {
    fn from(e: crate::Error) -> Self { Error::Bech32(e) }
}

impl From<convert::Error> for Error {
    fn from(e: convert::Error) -> Self { Error::Padding(e) }
}

impl From<InvalidWitnessVersionError> for Error {
    fn from(e: InvalidWitnessVersionError) -> Self { Error::InvalidWitnessVersion(e) }
}

impl From<WitnessLengthError> for Error {
    fn from(e: WitnessLengthError) -> Self { Error::InvalidProgramLength(e) }
}

/// Error parsing an output script as a witness program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScriptPubkeyError {
    /// The script is missing the version or the length byte.
    TooShort,
    /// The length byte does not match the number of program bytes.
    LengthMismatch {
        /// Program length stated by the script.
        declared: u8,
        /// Number of bytes following the length byte.
        actual: usize,
    },
    /// The first byte does not encode a witness version.
    InvalidVersionByte(u8),
    /// Invalid witness program length.
    InvalidProgramLength(WitnessLengthError),
}

impl fmt::Display for ScriptPubkeyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ScriptPubkeyError::*;

        match *self {
            TooShort => write!(f, "script is too short to hold a witness program"),
            LengthMismatch { declared, actual } => write!(
                f,
                "script declares a {} byte witness program but holds {} bytes",
                declared, actual
            ),
            InvalidVersionByte(b) => write!(f, "invalid witness version byte {:#04x}", b),
            InvalidProgramLength(ref e) => write_err!(f, "witness program length error"; e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ScriptPubkeyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use ScriptPubkeyError::*;

        match *self {
            InvalidProgramLength(ref e) => Some(e),
            TooShort | LengthMismatch { .. } | InvalidVersionByte(_) => None,
        }
    }
}

impl From<WitnessLengthError> for ScriptPubkeyError {
    fn from(e: WitnessLengthError) -> Self { ScriptPubkeyError::InvalidProgramLength(e) }
}

/// Error parsing a [`Network`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNetworkError {
    input: String,
}

impl fmt::Display for ParseNetworkError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} is not a known segwit network or hrp", self.input)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseNetworkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P2WPKH: [u8; 20] = [
        0x75, 0x1e, 0x76, 0xe8, 0x19, 0x91, 0x96, 0xd4, 0x54, 0x94, 0x1c, 0x45, 0xd1, 0xb3, 0xa3,
        0x23, 0xf1, 0x43, 0x3b, 0xd6,
    ];

    #[test]
    fn decode_p2wpkh_uppercase() {
        let (version, program) =
            decode(Network::Main, "BC1QW508D6QEJXTDG4Y5R3ZARVARY0C5XW7KV8F3T4").unwrap();
        assert_eq!(version, 0);
        assert_eq!(program, P2WPKH.to_vec());
        assert_eq!(
            output_script(version, &program),
            [&[0x00, 0x14][..], &P2WPKH[..]].concat()
        );
    }

    #[test]
    fn encode_p2wpkh() {
        assert_eq!(encode(Network::Main, 0, &P2WPKH), "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4");
    }

    #[test]
    fn wrong_network() {
        let err = decode(Network::Main, "tb1qw508d6qejxtdg4y5r3zarvary0c5xw7kxpjzsx").unwrap_err();
        assert_eq!(
            err,
            Error::UnexpectedHrp { expected: Network::Main, found: Hrp::parse("tb").unwrap() }
        );
        assert!(decode(Network::Test, "tb1qw508d6qejxtdg4y5r3zarvary0c5xw7kxpjzsx").is_ok());
    }

    #[test]
    fn unknown_hrp() {
        let err = decode(Network::Main, "tc1qw508d6qejxtdg4y5r3zarvary0c5xw7kg3g4ty").unwrap_err();
        assert!(matches!(err, Error::UnexpectedHrp { expected: Network::Main, .. }));
    }

    #[test]
    fn bad_checksum() {
        let err = decode(Network::Main, "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t5").unwrap_err();
        assert_eq!(err, Error::Bech32(crate::Error::InvalidChecksum));
    }

    #[test]
    fn mixed_case() {
        let err = decode(Network::Main, "bc1qW508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4").unwrap_err();
        assert_eq!(err, Error::MixedCase);
    }

    #[test]
    fn invalid_char_before_case_check() {
        let err = decode(Network::Main, "bc1 qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4").unwrap_err();
        assert_eq!(err, Error::InvalidChar(' '));
    }

    #[test]
    fn version_16() {
        let (version, program) = decode(Network::Main, "BC1SW50QA3JX3S").unwrap();
        assert_eq!(version, 16);
        assert_eq!(program, vec![0x75, 0x1e]);
        assert_eq!(output_script(version, &program), vec![0x90, 0x02, 0x75, 0x1e]);
    }

    #[test]
    fn empty_data_is_too_short() {
        let addr = crate::encode(&Hrp::parse("bc").unwrap(), &[]);
        let err = decode(Network::Main, &addr).unwrap_err();
        assert_eq!(err, Error::InvalidProgramLength(WitnessLengthError::TooShort));
    }

    #[test]
    fn version_out_of_range_is_rejected() {
        // Witness version 17 with an otherwise fine 20 byte program.
        let mut data = vec![Fe32::from_low_5_bits(17)];
        P2WPKH.write_base32(&mut data);
        let addr = crate::encode(&Hrp::parse("bc").unwrap(), &data);
        let err = decode(Network::Main, &addr).unwrap_err();
        assert_eq!(err, Error::InvalidWitnessVersion(InvalidWitnessVersionError(17)));
    }

    #[test]
    fn roundtrip_all_versions_and_lengths() {
        for version in 0..=MAX_WITNESS_VERSION {
            for len in 2..=MAX_WITNESS_PROGRAM_LEN {
                let program = (0..len).map(|i| (i as u8).wrapping_mul(29) ^ version).collect::<Vec<u8>>();
                let addr = encode(Network::Test, version, &program);
                let decoded = decode(Network::Test, &addr);
                if version == 0 && len != 20 && len != 32 {
                    assert_eq!(
                        decoded,
                        Err(Error::InvalidProgramLength(WitnessLengthError::InvalidSegwitV0))
                    );
                } else {
                    assert_eq!(decoded, Ok((version, program.clone())));
                    assert_eq!(decode(Network::Test, &addr.to_uppercase()), Ok((version, program)));
                }
            }
        }
    }

    #[test]
    #[should_panic]
    fn encode_version_17_panics() { let _ = encode(Network::Main, 17, &P2WPKH); }

    #[test]
    #[should_panic]
    fn output_script_version_17_panics() { let _ = output_script(17, &P2WPKH); }

    #[test]
    #[should_panic]
    fn output_script_long_program_panics() { let _ = output_script(1, &[0; 41]); }

    #[test]
    fn witness_program_new() {
        assert!(WitnessProgram::new(0, P2WPKH.to_vec()).is_ok());
        assert_eq!(
            WitnessProgram::new(0, vec![0; 21]),
            Err(Error::InvalidProgramLength(WitnessLengthError::InvalidSegwitV0))
        );
        assert_eq!(
            WitnessProgram::new(17, vec![0; 20]),
            Err(Error::InvalidWitnessVersion(InvalidWitnessVersionError(17)))
        );
        assert_eq!(
            WitnessProgram::new(1, vec![0]),
            Err(Error::InvalidProgramLength(WitnessLengthError::TooShort))
        );
    }

    #[test]
    fn script_pubkey_roundtrip() {
        let wp = WitnessProgram::new(1, vec![0xab; 32]).unwrap();
        let script = wp.script_pubkey();
        assert_eq!(&script[..2], &[0x81, 0x20]);
        assert_eq!(WitnessProgram::from_script_pubkey(&script), Ok(wp));
    }

    #[test]
    fn invalid_script_pubkeys() {
        use ScriptPubkeyError::*;

        assert_eq!(WitnessProgram::from_script_pubkey(&[]), Err(TooShort));
        assert_eq!(WitnessProgram::from_script_pubkey(&[0x00]), Err(TooShort));
        assert_eq!(
            WitnessProgram::from_script_pubkey(&[0x00, 0x14, 0x01]),
            Err(LengthMismatch { declared: 0x14, actual: 1 })
        );
        assert_eq!(
            WitnessProgram::from_script_pubkey(&[0x51, 0x02, 0x75, 0x1e]),
            Err(InvalidVersionByte(0x51))
        );
        assert_eq!(
            WitnessProgram::from_script_pubkey(&[0x80, 0x02, 0x75, 0x1e]),
            Err(InvalidVersionByte(0x80))
        );
        assert_eq!(
            WitnessProgram::from_script_pubkey(&[0x00, 0x02, 0x75, 0x1e]),
            Err(InvalidProgramLength(WitnessLengthError::InvalidSegwitV0))
        );
    }

    #[test]
    fn network_names() {
        assert_eq!(Network::Main.to_string(), "main");
        assert_eq!(Network::Test.to_string(), "test");
        assert_eq!(Network::from_hrp("BC"), Ok(Network::Main));
        assert_eq!(
            Network::from_hrp("bcrt").unwrap_err().to_string(),
            "bcrt is not a known segwit network or hrp"
        );
        assert_eq!(Network::Test.hrp(), Hrp::parse("tb").unwrap());
    }
}
