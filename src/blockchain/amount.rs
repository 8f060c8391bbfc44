// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Conversion between minor-unit integers and human-readable decimal amounts.
//!
//! All scaling is done on decimal digit strings, so results are exact for any
//! number of decimals and never pass through floating point.

use alloy::primitives::U256;

use super::client::ElrondClientError;

/// Scale a raw minor-unit integer (decimal string) down by `10^decimals`.
///
/// # Returns
/// * `Ok(String)` - Decimal string with trailing fractional zeros trimmed
/// * `Err(InvalidAmount)` - If `raw` is not a non-negative decimal integer
pub fn to_decimal(raw: &str, decimals: u8) -> Result<String, ElrondClientError> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ElrondClientError::InvalidAmount(format!(
            "`{}` is not a decimal integer",
            raw
        )));
    }
    Ok(scale_digits(raw, decimals))
}

/// Format wei (or token units) to a human-readable amount.
pub fn format_amount(amount: U256, decimals: u8) -> String {
    scale_digits(&amount.to_string(), decimals)
}

fn scale_digits(digits: &str, decimals: u8) -> String {
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return "0".to_string();
    }

    let decimals = decimals as usize;
    if decimals == 0 {
        return digits.to_string();
    }

    let padded = format!("{:0>width$}", digits, width = decimals + 1);
    let (whole, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, fraction)
    }
}

/// Parse a human-readable amount into minor units.
///
/// # Arguments
/// * `amount` - Amount as a string (e.g., "1.5")
/// * `decimals` - Number of decimals (18 for EGLD, token decimals for ESDT)
///
/// # Returns
/// * `Ok(U256)` - Amount in smallest unit
/// * `Err(InvalidAmount)` - If parsing fails, the amount has more fractional
///   digits than `decimals`, or it overflows 256 bits
pub fn parse_amount(amount: &str, decimals: u8) -> Result<U256, ElrondClientError> {
    let amount = amount.trim();
    let invalid = |reason: &str| ElrondClientError::InvalidAmount(format!("`{}`: {}", amount, reason));

    let (whole, fraction) = match amount.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (amount, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid("empty amount"));
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid("invalid number"));
    }
    if fraction.len() > decimals as usize {
        return Err(invalid(&format!("too many decimal places (max {})", decimals)));
    }

    // Pad with zeros to match decimals
    let digits = format!(
        "{}{:0<width$}",
        whole,
        fraction,
        width = decimals as usize
    );
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }

    U256::from_str_radix(digits, 10).map_err(|_| invalid("amount overflow"))
}
