// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Chain provider seam.
//!
//! The facade only talks to the network through [`ChainProvider`]. Each
//! operation asks a [`ProviderFactory`] for a fresh handle bound to the
//! resolved network, so no connection state is shared between calls.

use std::time::Duration;

use async_trait::async_trait;

use super::address::Address;
use super::transactions::Transaction;
use super::types::{
    AccountOnNetwork, FungibleTokenBalance, NetworkConfig, NetworkProfile, TransactionRecord,
};

/// Errors raised by a chain provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Node error ({code}): {message}")]
    Node { code: String, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Read and broadcast capabilities of an Elrond node or gateway.
#[async_trait]
pub trait ChainProvider: Send + Sync {
    async fn get_account(&self, address: &Address) -> Result<AccountOnNetwork, ProviderError>;

    async fn get_fungible_token_balance(
        &self,
        address: &Address,
        identifier: &str,
    ) -> Result<FungibleTokenBalance, ProviderError>;

    async fn get_transaction(&self, hash: &str) -> Result<TransactionRecord, ProviderError>;

    /// Broadcast a signed transaction and return its hash.
    async fn send_transaction(&self, transaction: &Transaction) -> Result<String, ProviderError>;

    async fn get_network_config(&self) -> Result<NetworkConfig, ProviderError>;
}

/// Builds provider handles for a network profile.
pub trait ProviderFactory: Send + Sync {
    fn connect(
        &self,
        profile: &NetworkProfile,
        timeout: Duration,
    ) -> Result<Box<dyn ChainProvider>, ProviderError>;
}
