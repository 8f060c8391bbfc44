// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Extraction of the effective transferred amount from a transaction.
//!
//! Payloads follow the `function@arg1@arg2...` convention with hex-encoded
//! arguments. Three built-in functions move tokens:
//!
//! - `ESDTTransfer@<identifier>@<value>[@<function>...]`
//! - `ESDTNFTTransfer@<collection>@<nonce>@<quantity>@<destination>`
//! - `MultiESDTNFTTransfer@<destination>@<count>@(<collection>@<nonce>@<quantity>)*`
//!
//! The NFT variants are only honoured when sender equals receiver, since the
//! real destination travels in the payload.

use alloy::primitives::U256;

use super::address::Address;
use super::amount::format_amount;
use super::client::ElrondClientError;
use super::types::{TransactionRecord, EGLD_SYMBOL};

/// One token movement found in a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenTransfer {
    pub identifier: Option<String>,
    pub value: U256,
}

/// Structured view of a transaction payload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransactionMetadata {
    pub function_name: Option<String>,
    pub function_args: Vec<String>,
    /// Effective receiver, which differs from the envelope for NFT transfers
    pub receiver: Option<Address>,
    pub transfers: Vec<TokenTransfer>,
}

/// Transferred amount as reported to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedTransfer {
    /// Decimal string scaled by the caller's decimals
    pub transferred_amount: String,
    /// ESDT identifier, or `EGLD` for native transfers
    pub token_identifier: String,
}

/// Decode the transferred amount and token of a transaction.
///
/// Only the first token transfer is reported; multi-transfers are not summed.
pub fn decode_transfer(
    record: &TransactionRecord,
    decimals: u8,
) -> Result<DecodedTransfer, ElrondClientError> {
    let metadata = decode_metadata(&record.sender, &record.receiver, &record.data)?;

    match metadata.transfers.into_iter().next() {
        Some(first) => Ok(DecodedTransfer {
            transferred_amount: format_amount(first.value, decimals),
            token_identifier: first.identifier.unwrap_or_default(),
        }),
        None => Ok(DecodedTransfer {
            transferred_amount: format_amount(record.value, decimals),
            token_identifier: EGLD_SYMBOL.to_string(),
        }),
    }
}

/// Parse a payload into function, arguments and token transfers.
///
/// Payloads that are not a recognized transfer yield no transfers; malformed
/// arguments of a recognized transfer are a decode error.
pub fn decode_metadata(
    sender: &Address,
    receiver: &Address,
    data: &[u8],
) -> Result<TransactionMetadata, ElrondClientError> {
    let Ok(text) = std::str::from_utf8(data) else {
        return Ok(TransactionMetadata::default());
    };
    if !text.contains('@') {
        return Ok(TransactionMetadata::default());
    }

    let mut parts = text.split('@');
    let function_name = parts.next().unwrap_or_default().to_string();
    let args: Vec<String> = parts.map(str::to_string).collect();

    let mut metadata = TransactionMetadata {
        function_name: Some(function_name.clone()),
        function_args: args.clone(),
        receiver: Some(*receiver),
        transfers: Vec::new(),
    };

    match function_name.as_str() {
        "ESDTTransfer" if args.len() >= 2 => {
            metadata.transfers.push(TokenTransfer {
                identifier: decode_identifier(&args[0])?,
                value: decode_biguint(&args[1])?,
            });
            metadata.function_name = args.get(2).map(|f| decode_utf8(f)).transpose()?;
            metadata.function_args = args.iter().skip(3).cloned().collect();
        }
        "ESDTNFTTransfer" if sender == receiver && args.len() >= 4 => {
            metadata.transfers.push(TokenTransfer {
                identifier: nft_identifier(&args[0], &args[1])?,
                value: decode_biguint(&args[2])?,
            });
            metadata.receiver = Some(Address::from_hex(&args[3]).map_err(decode_error)?);
            metadata.function_name = args.get(4).map(|f| decode_utf8(f)).transpose()?;
            metadata.function_args = args.iter().skip(5).cloned().collect();
        }
        "MultiESDTNFTTransfer" if sender == receiver && args.len() >= 2 => {
            metadata.receiver = Some(Address::from_hex(&args[0]).map_err(decode_error)?);
            let count = decode_biguint(&args[1])?;
            let count = u64::try_from(count)
                .ok()
                .and_then(|c| usize::try_from(c).ok())
                .ok_or_else(|| ElrondClientError::Decode("Transfer count overflow".to_string()))?;

            let triples = args.len().saturating_sub(2) / 3;
            if count > triples {
                return Err(ElrondClientError::Decode(format!(
                    "Payload announces {} transfers but carries {}",
                    count, triples
                )));
            }

            for i in 0..count {
                let base = 2 + i * 3;
                metadata.transfers.push(TokenTransfer {
                    identifier: nft_identifier(&args[base], &args[base + 1])?,
                    value: decode_biguint(&args[base + 2])?,
                });
            }

            let rest = 2 + count * 3;
            metadata.function_name = args.get(rest).map(|f| decode_utf8(f)).transpose()?;
            metadata.function_args = args.iter().skip(rest + 1).cloned().collect();
        }
        _ => {}
    }

    Ok(metadata)
}

fn decode_error(e: ElrondClientError) -> ElrondClientError {
    ElrondClientError::Decode(e.to_string())
}

fn decode_utf8(hex_arg: &str) -> Result<String, ElrondClientError> {
    let bytes = alloy::hex::decode(hex_arg)
        .map_err(|e| ElrondClientError::Decode(format!("Invalid hex argument `{}`: {}", hex_arg, e)))?;
    String::from_utf8(bytes)
        .map_err(|e| ElrondClientError::Decode(format!("Argument is not UTF-8: {}", e)))
}

fn decode_identifier(hex_arg: &str) -> Result<Option<String>, ElrondClientError> {
    let identifier = decode_utf8(hex_arg)?;
    Ok(Some(identifier).filter(|id| !id.is_empty()))
}

/// `collection-nonce` for NFT/SFT transfers, plain collection for nonce zero.
fn nft_identifier(collection_hex: &str, nonce_hex: &str) -> Result<Option<String>, ElrondClientError> {
    let Some(collection) = decode_identifier(collection_hex)? else {
        return Ok(None);
    };
    if decode_biguint(nonce_hex)?.is_zero() {
        Ok(Some(collection))
    } else {
        Ok(Some(format!("{}-{}", collection, nonce_hex.to_ascii_lowercase())))
    }
}

fn decode_biguint(hex_arg: &str) -> Result<U256, ElrondClientError> {
    if hex_arg.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(hex_arg, 16)
        .map_err(|e| ElrondClientError::Decode(format!("Invalid numeric argument `{}`: {}", hex_arg, e)))
}
