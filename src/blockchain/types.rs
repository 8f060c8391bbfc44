// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain types and constants.

use std::{fmt, str::FromStr};

use alloy::primitives::U256;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::address::Address;
use super::client::ElrondClientError;

/// Ticker of the native coin.
pub const EGLD_SYMBOL: &str = "EGLD";

/// Decimals of the native coin.
pub const EGLD_DECIMALS: u8 = 18;

/// Logical network selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Main,
    Testnet,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Main => "main",
            Network::Testnet => "testnet",
        }
    }

    /// Lenient resolution used by every facade operation.
    ///
    /// Only `main` selects mainnet. Anything else, including no value at all,
    /// resolves to testnet; a non-empty unknown name is logged at warn level
    /// since it usually means a typo on the caller side.
    pub fn resolve(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("main") => Network::Main,
            Some("testnet") | Some("") | None => Network::Testnet,
            Some(other) => {
                tracing::warn!(
                    blockchain = "elrond",
                    requested = other,
                    "Unknown network name, falling back to testnet"
                );
                Network::Testnet
            }
        }
    }
}

impl FromStr for Network {
    type Err = ElrondClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "main" => Ok(Network::Main),
            "testnet" => Ok(Network::Testnet),
            other => Err(ElrondClientError::UnknownNetwork(other.to_string())),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Endpoint and explorer configuration for one network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkProfile {
    pub network: Network,
    /// Gateway/API base URL
    pub endpoint_url: String,
    /// Explorer URL with a `{hash}` placeholder
    pub transaction_link_template: String,
    /// Explorer URL with an `{address}` placeholder
    pub wallet_link_template: String,
}

impl NetworkProfile {
    /// Network name as reported in receipts.
    pub fn name(&self) -> &'static str {
        self.network.as_str()
    }

    pub fn transaction_link(&self, hash: &str) -> String {
        self.transaction_link_template.replace("{hash}", hash)
    }

    pub fn wallet_link(&self, address: &str) -> String {
        self.wallet_link_template.replace("{address}", address)
    }

    /// Elrond mainnet defaults.
    pub fn mainnet() -> Self {
        Self {
            network: Network::Main,
            endpoint_url: "https://api.elrond.com".to_string(),
            transaction_link_template: "https://explorer.elrond.com/transactions/{hash}".to_string(),
            wallet_link_template: "https://explorer.elrond.com/address/{address}".to_string(),
        }
    }

    /// Elrond testnet defaults.
    pub fn testnet() -> Self {
        Self {
            network: Network::Testnet,
            endpoint_url: "https://api-testnet.elrond.com".to_string(),
            transaction_link_template: "https://testnet-explorer.elrond.com/transactions/{hash}"
                .to_string(),
            wallet_link_template: "https://testnet-explorer.elrond.com/address/{address}"
                .to_string(),
        }
    }
}

/// The fixed set of network profiles, loaded once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkRegistry {
    main: NetworkProfile,
    testnet: NetworkProfile,
}

impl NetworkRegistry {
    pub fn new(main: NetworkProfile, testnet: NetworkProfile) -> Self {
        Self { main, testnet }
    }

    pub fn profile(&self, network: Network) -> &NetworkProfile {
        match network {
            Network::Main => &self.main,
            Network::Testnet => &self.testnet,
        }
    }

    /// Resolve a caller-supplied network name, see [`Network::resolve`].
    pub fn resolve(&self, raw: Option<&str>) -> &NetworkProfile {
        self.profile(Network::resolve(raw))
    }
}

impl Default for NetworkRegistry {
    fn default() -> Self {
        Self::new(NetworkProfile::mainnet(), NetworkProfile::testnet())
    }
}

/// Token balance information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
    /// Token symbol ("EGLD" or the ESDT identifier)
    pub symbol: String,
    /// Balance in smallest unit
    pub balance_raw: String,
    /// Balance formatted with decimals
    pub balance_formatted: String,
    /// Number of decimals
    pub decimals: u8,
    /// ESDT identifier (None for native EGLD)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

/// Account state as seen by the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountOnNetwork {
    pub address: Address,
    pub balance: U256,
    pub nonce: u64,
}

/// Fungible ESDT balance of an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FungibleTokenBalance {
    pub identifier: String,
    pub balance: U256,
}

/// Network parameters needed to build transactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub chain_id: String,
    pub min_gas_price: u64,
    pub min_gas_limit: u64,
    pub gas_per_data_byte: u64,
}

/// Processing status reported by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionStatus(String);

impl TransactionStatus {
    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.0.as_str(), "received" | "pending" | "partially-executed")
    }

    pub fn is_successful(&self) -> bool {
        matches!(self.0.as_str(), "executed" | "success" | "successful")
    }

    pub fn is_invalid(&self) -> bool {
        self.0 == "invalid"
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.0.as_str(), "fail" | "failed" | "unsuccessful") || self.is_invalid()
    }

    pub fn is_executed(&self) -> bool {
        self.is_successful() || self.is_failed() || self.is_invalid()
    }
}

/// A transaction as fetched from (or just submitted to) the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub hash: String,
    pub nonce: u64,
    /// Native value in minor units
    #[serde(with = "u256_string")]
    #[schema(value_type = String)]
    pub value: U256,
    #[schema(value_type = String)]
    pub sender: Address,
    #[schema(value_type = String)]
    pub receiver: Address,
    pub gas_price: u64,
    pub gas_limit: u64,
    /// Payload, base64 on the wire
    #[serde(with = "base64_bytes")]
    #[schema(value_type = String)]
    pub data: Vec<u8>,
    #[serde(rename = "chainID")]
    pub chain_id: String,
    pub version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub status: Option<TransactionStatus>,
}

/// Serde adapter writing `U256` as a decimal string.
pub(crate) mod u256_string {
    use alloy::primitives::U256;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(U256::ZERO);
        }
        U256::from_str_radix(raw, 10).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter writing bytes as standard base64.
pub(crate) mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            Some(encoded) if !encoded.is_empty() => {
                STANDARD.decode(encoded).map_err(serde::de::Error::custom)
            }
            _ => Ok(Vec::new()),
        }
    }
}
