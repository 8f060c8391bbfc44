// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transaction model for Elrond transfers.
//!
//! This module provides the transaction built by the facade, its canonical
//! signing bytes and the wire representation sent to the gateway.

use alloy::primitives::U256;
use serde::Serialize;

use super::address::Address;
use super::client::ElrondClientError;
use super::types::{base64_bytes, u256_string, TransactionRecord};

/// Transaction version produced by this client.
pub const TRANSACTION_VERSION: u32 = 1;

/// An Elrond transaction, signed or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub nonce: u64,
    /// Native value in minor units
    pub value: U256,
    pub receiver: Address,
    pub sender: Address,
    pub gas_price: u64,
    pub gas_limit: u64,
    pub data: Vec<u8>,
    pub chain_id: String,
    pub version: u32,
    /// ed25519 signature over [`Transaction::signing_bytes`]
    pub signature: Option<Vec<u8>>,
}

/// Field order and naming of this struct define the signed message.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignableTransaction<'a> {
    nonce: u64,
    #[serde(with = "u256_string")]
    value: &'a U256,
    receiver: &'a Address,
    sender: &'a Address,
    gas_price: u64,
    gas_limit: u64,
    #[serde(with = "base64_bytes", skip_serializing_if = "is_empty")]
    data: &'a [u8],
    #[serde(rename = "chainID")]
    chain_id: &'a str,
    version: u32,
}

/// JSON body accepted by `transaction/send`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTransaction<'a> {
    nonce: u64,
    #[serde(with = "u256_string")]
    value: &'a U256,
    receiver: &'a Address,
    sender: &'a Address,
    gas_price: u64,
    gas_limit: u64,
    #[serde(with = "base64_bytes", skip_serializing_if = "is_empty")]
    data: &'a [u8],
    #[serde(rename = "chainID")]
    chain_id: &'a str,
    version: u32,
    signature: String,
}

fn is_empty(data: &&[u8]) -> bool {
    data.is_empty()
}

impl Transaction {
    /// Canonical bytes covered by the signature.
    pub fn signing_bytes(&self) -> Result<Vec<u8>, ElrondClientError> {
        let signable = SignableTransaction {
            nonce: self.nonce,
            value: &self.value,
            receiver: &self.receiver,
            sender: &self.sender,
            gas_price: self.gas_price,
            gas_limit: self.gas_limit,
            data: &self.data,
            chain_id: &self.chain_id,
            version: self.version,
        };

        serde_json::to_vec(&signable)
            .map_err(|e| ElrondClientError::Validation(format!("Unserializable transaction: {}", e)))
    }

    /// Wire representation; fails if the transaction has not been signed.
    pub fn to_wire(&self) -> Result<WireTransaction<'_>, ElrondClientError> {
        let signature = self.signature.as_ref().ok_or_else(|| {
            ElrondClientError::Validation("Transaction must be signed before broadcast".to_string())
        })?;

        Ok(WireTransaction {
            nonce: self.nonce,
            value: &self.value,
            receiver: &self.receiver,
            sender: &self.sender,
            gas_price: self.gas_price,
            gas_limit: self.gas_limit,
            data: &self.data,
            chain_id: &self.chain_id,
            version: self.version,
            signature: alloy::hex::encode(signature),
        })
    }

    /// Record view of this transaction once the network assigned `hash`.
    ///
    /// Status is unknown at submission time and left empty.
    pub fn to_record(&self, hash: &str) -> TransactionRecord {
        TransactionRecord {
            hash: hash.to_string(),
            nonce: self.nonce,
            value: self.value,
            sender: self.sender,
            receiver: self.receiver,
            gas_price: self.gas_price,
            gas_limit: self.gas_limit,
            data: self.data.clone(),
            chain_id: self.chain_id.clone(),
            version: self.version,
            signature: self.signature.as_ref().map(alloy::hex::encode),
            status: None,
        }
    }
}
