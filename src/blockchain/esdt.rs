// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transfer payload and gas limit construction for EGLD and ESDT transfers.

use alloy::primitives::U256;

use super::amount::parse_amount;
use super::client::ElrondClientError;
use super::types::EGLD_DECIMALS;
use crate::config::GasSchedule;

/// Built-in function moving a fungible ESDT balance.
pub const ESDT_TRANSFER_FUNCTION: &str = "ESDTTransfer";

/// What the caller wants to move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferIntent {
    /// ESDT identifier (e.g. `TOKEN-abc123`); `None` for native EGLD
    pub identifier: Option<String>,
    /// Human-readable amount (e.g. "1.5")
    pub amount: String,
    /// Token decimals, required with an identifier
    pub decimals: Option<u8>,
}

impl TransferIntent {
    pub fn native(amount: impl Into<String>) -> Self {
        Self {
            identifier: None,
            amount: amount.into(),
            decimals: None,
        }
    }

    pub fn token(identifier: impl Into<String>, amount: impl Into<String>, decimals: u8) -> Self {
        Self {
            identifier: Some(identifier.into()),
            amount: amount.into(),
            decimals: Some(decimals),
        }
    }
}

/// Payload, native value and gas limit derived from a [`TransferIntent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedTransfer {
    pub payload: Vec<u8>,
    /// Native value in minor units; `None` for token transfers
    pub native_value: Option<U256>,
    pub gas_limit: u64,
}

/// Build the payload and gas limit for a transfer.
///
/// Native transfers carry no payload and use the fixed plain-transfer gas
/// limit. Token transfers call `ESDTTransfer@<identifier>@<amount>` and pay
/// `base + per_byte * payload_len + surcharge`.
pub fn build_transfer(
    intent: &TransferIntent,
    schedule: &GasSchedule,
) -> Result<PreparedTransfer, ElrondClientError> {
    let identifier = intent
        .identifier
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty());

    let decimals = match identifier {
        Some(_) => intent.decimals.ok_or(ElrondClientError::MissingDecimals)?,
        None => EGLD_DECIMALS,
    };

    let amount = require_positive_amount(&intent.amount, decimals)?;

    match identifier {
        None => Ok(PreparedTransfer {
            payload: Vec::new(),
            native_value: Some(amount),
            gas_limit: schedule.native_transfer_gas_limit,
        }),
        Some(identifier) => {
            let payload = esdt_transfer_payload(identifier, amount);
            let gas_limit = schedule
                .esdt_base_gas
                .saturating_add(
                    schedule
                        .gas_per_data_byte
                        .saturating_mul(payload.len() as u64),
                )
                .saturating_add(schedule.esdt_transfer_gas);

            Ok(PreparedTransfer {
                payload,
                native_value: None,
                gas_limit,
            })
        }
    }
}

/// Parse `amount` and reject missing or zero values.
pub(crate) fn require_positive_amount(amount: &str, decimals: u8) -> Result<U256, ElrondClientError> {
    if amount.trim().is_empty() {
        return Err(ElrondClientError::Validation("amount is required".to_string()));
    }
    let scaled = parse_amount(amount, decimals)?;
    if scaled.is_zero() {
        return Err(ElrondClientError::Validation(
            "amount must be greater than zero".to_string(),
        ));
    }
    Ok(scaled)
}

/// `ESDTTransfer@<hex identifier>@<hex amount>`.
fn esdt_transfer_payload(identifier: &str, amount: U256) -> Vec<u8> {
    format!(
        "{}@{}@{}",
        ESDT_TRANSFER_FUNCTION,
        alloy::hex::encode(identifier.as_bytes()),
        encode_biguint(amount)
    )
    .into_bytes()
}

/// Minimal big-endian hex of an unsigned integer, padded to whole bytes.
fn encode_biguint(value: U256) -> String {
    if value.is_zero() {
        return String::new();
    }
    let hex = format!("{:x}", value);
    if hex.len() % 2 == 1 {
        format!("0{}", hex)
    } else {
        hex
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_transfer() {
        let prepared = build_transfer(&TransferIntent::native("0.001"), &GasSchedule::default()).unwrap();
        assert!(prepared.payload.is_empty());
        assert_eq!(
            prepared.native_value,
            Some(U256::from(1_000_000_000_000_000u64))
        );
        assert_eq!(prepared.gas_limit, 70_000);
    }

    #[test]
    fn test_native_gas_limit_independent_of_amount() {
        let schedule = GasSchedule::default();
        for amount in ["0.000000000000000001", "1", "123456.789"] {
            let prepared = build_transfer(&TransferIntent::native(amount), &schedule).unwrap();
            assert_eq!(prepared.gas_limit, schedule.native_transfer_gas_limit);
        }
    }

    #[test]
    fn test_token_transfer_payload_and_gas() {
        let intent = TransferIntent::token("TOKEN-abc123", "5", 6);
        let prepared = build_transfer(&intent, &GasSchedule::default()).unwrap();

        // 5 * 10^6 = 5_000_000 = 0x4c4b40
        assert_eq!(
            String::from_utf8(prepared.payload.clone()).unwrap(),
            "ESDTTransfer@544f4b454e2d616263313233@4c4b40"
        );
        assert!(prepared.native_value.is_none());
        assert_eq!(
            prepared.gas_limit,
            50_000 + 1_500 * prepared.payload.len() as u64 + 300_000
        );
    }

    #[test]
    fn test_token_amount_hex_is_byte_aligned() {
        // 1 * 10^0 = 0x1 -> "01"
        let prepared =
            build_transfer(&TransferIntent::token("A-1", "1", 0), &GasSchedule::default()).unwrap();
        assert!(String::from_utf8(prepared.payload).unwrap().ends_with("@01"));
    }

    #[test]
    fn test_gas_limit_non_decreasing_with_payload_length() {
        let schedule = GasSchedule::default();
        let mut previous = 0;
        for amount in ["1", "1000", "1000000", "1000000000000"] {
            let prepared =
                build_transfer(&TransferIntent::token("TOKEN-abc123", amount, 6), &schedule).unwrap();
            assert!(prepared.gas_limit >= previous);
            previous = prepared.gas_limit;
        }
    }

    #[test]
    fn test_gas_schedule_is_configurable() {
        let schedule = GasSchedule {
            native_transfer_gas_limit: 50_000,
            esdt_base_gas: 1,
            gas_per_data_byte: 0,
            esdt_transfer_gas: 2,
        };
        let native = build_transfer(&TransferIntent::native("1"), &schedule).unwrap();
        assert_eq!(native.gas_limit, 50_000);
        let token = build_transfer(&TransferIntent::token("A-1", "1", 0), &schedule).unwrap();
        assert_eq!(token.gas_limit, 3);
    }

    #[test]
    fn test_missing_decimals_with_identifier() {
        let intent = TransferIntent {
            identifier: Some("TOKEN-abc123".to_string()),
            amount: "5".to_string(),
            decimals: None,
        };
        let err = build_transfer(&intent, &GasSchedule::default()).unwrap_err();
        assert!(matches!(err, ElrondClientError::MissingDecimals));
    }

    #[test]
    fn test_amount_is_required() {
        let schedule = GasSchedule::default();
        for amount in ["", "0", "0.000"] {
            let err = build_transfer(&TransferIntent::native(amount), &schedule).unwrap_err();
            assert!(matches!(err, ElrondClientError::Validation(_)), "{:?}", amount);
        }
        let err = build_transfer(&TransferIntent::native("abc"), &schedule).unwrap_err();
        assert!(matches!(err, ElrondClientError::InvalidAmount(_)));
    }
}
