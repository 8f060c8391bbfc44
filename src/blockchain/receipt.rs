// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Normalized transaction receipts returned to callers.

use alloy::primitives::U256;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::amount::format_amount;
use super::decoder::DecodedTransfer;
use super::types::{NetworkProfile, TransactionRecord, TransactionStatus, EGLD_DECIMALS, EGLD_SYMBOL};

/// Stable summary of a transaction's economic and status fields.
///
/// Optional fields are only present for fetched transactions; a receipt built
/// right after broadcast carries no status because the chain has not executed
/// the transaction yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// Local wall-clock time at which the receipt was built
    pub date: DateTime<Utc>,
    pub transaction_hash: String,
    pub transaction_link: String,
    /// Network name (`main` or `testnet`)
    pub network: String,
    pub gas_price: u64,
    pub gas_limit: u64,
    /// `gas_price * gas_limit` in EGLD
    pub gas_cost_in_crypto: String,
    pub gas_cost_crypto_currency: String,
    /// Transferred amount scaled by the requested decimals
    pub amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_executed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_successful: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_failed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_invalid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_pending: Option<bool>,
    pub from: String,
    pub to: String,
    pub nonce: u64,
}

/// Gas cost of `gas_price * gas_limit`, in EGLD.
pub fn gas_cost_in_egld(gas_price: u64, gas_limit: u64) -> String {
    let cost = U256::from(gas_price) * U256::from(gas_limit);
    format_amount(cost, EGLD_DECIMALS)
}

/// Receipt for a transaction fetched from the network, with status flags.
///
/// A record without status has not been processed yet and reports pending.
pub fn build_receipt(
    record: &TransactionRecord,
    profile: &NetworkProfile,
    decoded: &DecodedTransfer,
) -> Receipt {
    assemble(record, profile, decoded, Utc::now(), true)
}

/// Receipt for a transaction that was just broadcast.
pub fn build_submission_receipt(
    record: &TransactionRecord,
    profile: &NetworkProfile,
    decoded: &DecodedTransfer,
) -> Receipt {
    assemble(record, profile, decoded, Utc::now(), false)
}

fn assemble(
    record: &TransactionRecord,
    profile: &NetworkProfile,
    decoded: &DecodedTransfer,
    date: DateTime<Utc>,
    fetched: bool,
) -> Receipt {
    let mut receipt = Receipt {
        date,
        transaction_hash: record.hash.clone(),
        transaction_link: profile.transaction_link(&record.hash),
        network: profile.name().to_string(),
        gas_price: record.gas_price,
        gas_limit: record.gas_limit,
        gas_cost_in_crypto: gas_cost_in_egld(record.gas_price, record.gas_limit),
        gas_cost_crypto_currency: EGLD_SYMBOL.to_string(),
        amount: decoded.transferred_amount.clone(),
        token_identifier: None,
        is_executed: None,
        is_successful: None,
        is_failed: None,
        is_invalid: None,
        is_pending: None,
        from: record.sender.to_bech32(),
        to: record.receiver.to_bech32(),
        nonce: record.nonce,
    };

    if fetched {
        let pending = TransactionStatus::new("pending");
        let status = record.status.as_ref().unwrap_or(&pending);
        receipt.token_identifier = Some(decoded.token_identifier.clone());
        receipt.is_executed = Some(status.is_executed());
        receipt.is_successful = Some(status.is_successful());
        receipt.is_failed = Some(status.is_failed());
        receipt.is_invalid = Some(status.is_invalid());
        receipt.is_pending = Some(status.is_pending());
    }

    receipt
}
