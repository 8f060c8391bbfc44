// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bech32 account addresses (`erd1...`).

use std::{fmt, str::FromStr};

use bech32::{primitives::decode::CheckedHrpstring, Bech32, Hrp};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::client::ElrondClientError;

/// Human-readable part of every Elrond address.
pub const ADDRESS_HRP: Hrp = Hrp::parse_unchecked("erd");

/// Length of an account public key in bytes.
pub const PUBKEY_LENGTH: usize = 32;

/// An Elrond account address (ed25519 public key).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; PUBKEY_LENGTH]);

impl Address {
    /// Wrap raw public key bytes.
    pub const fn from_bytes(bytes: [u8; PUBKEY_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Build an address from a hex-encoded public key, as found in payload
    /// arguments.
    pub fn from_hex(hex_pubkey: &str) -> Result<Self, ElrondClientError> {
        let bytes = alloy::hex::decode(hex_pubkey)
            .map_err(|e| ElrondClientError::InvalidAddress(format!("Invalid hex: {}", e)))?;
        Self::from_slice(&bytes)
    }

    fn from_slice(bytes: &[u8]) -> Result<Self, ElrondClientError> {
        let key: [u8; PUBKEY_LENGTH] = bytes.try_into().map_err(|_| {
            ElrondClientError::InvalidAddress(format!(
                "Expected {} bytes, got {}",
                PUBKEY_LENGTH,
                bytes.len()
            ))
        })?;
        Ok(Self(key))
    }

    /// Raw public key bytes.
    pub fn as_bytes(&self) -> &[u8; PUBKEY_LENGTH] {
        &self.0
    }

    /// Bech32 representation (`erd1...`).
    pub fn to_bech32(&self) -> String {
        self.to_string()
    }
}

impl FromStr for Address {
    type Err = ElrondClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Bech32 checksum only; Bech32m strings are not account addresses.
        let checked = CheckedHrpstring::new::<Bech32>(s.trim())
            .map_err(|e| ElrondClientError::InvalidAddress(e.to_string()))?;

        let hrp = checked.hrp();
        if hrp != ADDRESS_HRP {
            return Err(ElrondClientError::InvalidAddress(format!(
                "Unexpected prefix `{}`, expected `{}`",
                hrp, ADDRESS_HRP
            )));
        }

        let data: Vec<u8> = checked.byte_iter().collect();
        Self::from_slice(&data)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = bech32::encode::<Bech32>(ADDRESS_HRP, &self.0).map_err(|_| fmt::Error)?;
        f.write_str(&encoded)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
