// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! once at startup and is immutable afterwards.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//! | `ELROND_MAINNET_API_URL` | Mainnet gateway URL | `https://api.elrond.com` |
//! | `ELROND_TESTNET_API_URL` | Testnet gateway URL | `https://api-testnet.elrond.com` |
//! | `ELROND_REQUEST_TIMEOUT_SECS` | Per-request timeout | `20` |
//! | `ELROND_NATIVE_TRANSFER_GAS` | Gas limit of a plain EGLD transfer | `70000` |
//! | `ELROND_ESDT_BASE_GAS` | Intrinsic gas of an ESDT transfer | `50000` |
//! | `ELROND_GAS_PER_DATA_BYTE` | Gas per payload byte | `1500` |
//! | `ELROND_ESDT_TRANSFER_GAS` | ESDT transfer surcharge | `300000` |

use std::time::Duration;

use crate::blockchain::{NetworkProfile, NetworkRegistry};

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

pub const MAINNET_API_URL_ENV: &str = "ELROND_MAINNET_API_URL";
pub const TESTNET_API_URL_ENV: &str = "ELROND_TESTNET_API_URL";
pub const REQUEST_TIMEOUT_ENV: &str = "ELROND_REQUEST_TIMEOUT_SECS";
pub const NATIVE_TRANSFER_GAS_ENV: &str = "ELROND_NATIVE_TRANSFER_GAS";
pub const ESDT_BASE_GAS_ENV: &str = "ELROND_ESDT_BASE_GAS";
pub const GAS_PER_DATA_BYTE_ENV: &str = "ELROND_GAS_PER_DATA_BYTE";
pub const ESDT_TRANSFER_GAS_ENV: &str = "ELROND_ESDT_TRANSFER_GAS";

/// Hard deadline for a single gateway round trip.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Gas constants of the chain fee schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasSchedule {
    /// Gas limit of a plain EGLD transfer without payload
    pub native_transfer_gas_limit: u64,
    /// Intrinsic cost of any transaction carrying an ESDT transfer
    pub esdt_base_gas: u64,
    /// Cost per byte of payload
    pub gas_per_data_byte: u64,
    /// Extra cost of moving an ESDT balance
    pub esdt_transfer_gas: u64,
}

impl Default for GasSchedule {
    fn default() -> Self {
        Self {
            native_transfer_gas_limit: 70_000,
            esdt_base_gas: 50_000,
            gas_per_data_byte: 1_500,
            esdt_transfer_gas: 300_000,
        }
    }
}

/// Everything the client facade needs besides its collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub networks: NetworkRegistry,
    pub gas: GasSchedule,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            networks: NetworkRegistry::default(),
            gas: GasSchedule::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Unparseable numeric values are logged and replaced by their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut main = NetworkProfile::mainnet();
        if let Some(url) = lookup(MAINNET_API_URL_ENV) {
            main.endpoint_url = url;
        }

        let mut testnet = NetworkProfile::testnet();
        if let Some(url) = lookup(TESTNET_API_URL_ENV) {
            testnet.endpoint_url = url;
        }

        let defaults = GasSchedule::default();
        let gas = GasSchedule {
            native_transfer_gas_limit: parse_or(
                &lookup,
                NATIVE_TRANSFER_GAS_ENV,
                defaults.native_transfer_gas_limit,
            ),
            esdt_base_gas: parse_or(&lookup, ESDT_BASE_GAS_ENV, defaults.esdt_base_gas),
            gas_per_data_byte: parse_or(&lookup, GAS_PER_DATA_BYTE_ENV, defaults.gas_per_data_byte),
            esdt_transfer_gas: parse_or(&lookup, ESDT_TRANSFER_GAS_ENV, defaults.esdt_transfer_gas),
        };

        let default_timeout = DEFAULT_REQUEST_TIMEOUT.as_secs();
        let timeout_secs = match parse_or(&lookup, REQUEST_TIMEOUT_ENV, default_timeout) {
            0 => {
                tracing::warn!(
                    key = REQUEST_TIMEOUT_ENV,
                    default = default_timeout,
                    "Zero request timeout, using default"
                );
                default_timeout
            }
            secs => secs,
        };

        Self {
            networks: NetworkRegistry::new(main, testnet),
            gas,
            request_timeout: Duration::from_secs(timeout_secs),
        }
    }
}

fn parse_or(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> u64 {
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, default, "Invalid numeric setting, using default");
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::blockchain::Network;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = ClientConfig::from_lookup(|_| None);
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.request_timeout, Duration::from_secs(20));
        assert_eq!(config.gas.native_transfer_gas_limit, 70_000);
    }

    #[test]
    fn overrides_are_applied() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (MAINNET_API_URL_ENV, "http://localhost:7950"),
            (REQUEST_TIMEOUT_ENV, "5"),
            (GAS_PER_DATA_BYTE_ENV, "2000"),
        ]));

        assert_eq!(
            config.networks.profile(Network::Main).endpoint_url,
            "http://localhost:7950"
        );
        assert_eq!(
            config.networks.profile(Network::Testnet).endpoint_url,
            "https://api-testnet.elrond.com"
        );
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.gas.gas_per_data_byte, 2_000);
        assert_eq!(config.gas.esdt_transfer_gas, 300_000);
    }

    #[test]
    fn malformed_numbers_fall_back_to_defaults() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (ESDT_BASE_GAS_ENV, "lots"),
            (REQUEST_TIMEOUT_ENV, "-1"),
        ]));
        assert_eq!(config.gas.esdt_base_gas, 50_000);
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn zero_timeout_falls_back_to_default() {
        let config = ClientConfig::from_lookup(lookup_from(&[(REQUEST_TIMEOUT_ENV, "0")]));
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);

        let config = ClientConfig::from_lookup(lookup_from(&[(REQUEST_TIMEOUT_ENV, "1")]));
        assert_eq!(config.request_timeout, Duration::from_secs(1));
    }
}
