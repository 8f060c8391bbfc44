// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain integration module for Elrond.
//!
//! This module provides functionality for:
//! - Resolving networks and explorer links
//! - Querying native EGLD and ESDT token balances
//! - Building, signing and broadcasting EGLD/ESDT transfers
//! - Decoding transaction payloads into normalized receipts

pub mod address;
pub mod amount;
pub mod client;
pub mod decoder;
pub mod esdt;
pub mod provider;
pub mod proxy;
pub mod receipt;
pub mod signing;
pub mod transactions;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use address::Address;
pub use client::{
    BalanceOptions, ElrondClient, ElrondClientError, GasCost, GasCostRequest, SendOutcome,
    SendTransactionRequest, TransactionLookup,
};
pub use provider::{ChainProvider, ProviderError, ProviderFactory};
pub use receipt::Receipt;
pub use types::*;
