// SPDX-License-Identifier: MIT

//! Provides the internal nuts and bolts that enable bech32 encoding/decoding.

pub mod checksum;
pub mod convert;
pub mod gf32;
pub mod hrp;
pub mod segwit;
