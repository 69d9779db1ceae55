// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Conversion between human-readable amounts and on-chain base units.
//!
//! All conversions are exact integer arithmetic on `U256`; no floating
//! point is involved at any step.

use std::str::FromStr;

use alloy::primitives::U256;

use super::client::ClientError;
use super::types::NATIVE_DECIMALS;

/// Parse a human-readable amount into the smallest unit.
///
/// # Arguments
/// * `amount` - Amount as a string (e.g., "1.5")
/// * `decimals` - Number of decimals (18 for ETH, 6 for USDC)
///
/// # Returns
/// * `Ok(U256)` - Amount in smallest unit
/// * `Err(ClientError::InvalidAmount)` - If the string is malformed, has more
///   fractional digits than `decimals`, or overflows 256 bits
pub fn parse_units(amount: &str, decimals: u8) -> Result<U256, ClientError> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Err(ClientError::InvalidAmount("Amount is empty".to_string()));
    }

    let (whole, fraction) = match amount.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (amount, None),
    };

    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ClientError::InvalidAmount(format!(
            "Invalid whole number in `{amount}`"
        )));
    }

    let fraction = fraction.unwrap_or("");
    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ClientError::InvalidAmount(format!(
            "Invalid decimal part in `{amount}`"
        )));
    }
    if fraction.len() > decimals as usize {
        return Err(ClientError::InvalidAmount(format!(
            "Too many decimal places in `{amount}` (max {decimals})"
        )));
    }

    let overflow = || ClientError::InvalidAmount(format!("Amount `{amount}` overflows"));

    let multiplier = ten_pow(decimals).ok_or_else(overflow)?;
    let whole = U256::from_str(whole).map_err(|_| overflow())?;

    // Pad with zeros to match decimals
    let padded = format!("{:0<width$}", fraction, width = decimals as usize);
    let fraction = if padded.is_empty() {
        U256::ZERO
    } else {
        U256::from_str(&padded).map_err(|_| overflow())?
    };

    whole
        .checked_mul(multiplier)
        .and_then(|w| w.checked_add(fraction))
        .ok_or_else(overflow)
}

/// Format an amount in the smallest unit as a decimal string.
///
/// Keeps full precision and trims trailing fractional zeros, so
/// `parse_units(&format_units(x, d), d) == x` for every `x`.
pub fn format_units(amount: U256, decimals: u8) -> String {
    let digits = amount.to_string();
    if decimals == 0 {
        return digits;
    }

    let decimals = decimals as usize;
    let padded = format!("{:0>width$}", digits, width = decimals + 1);
    let (whole, fraction) = padded.split_at(padded.len() - decimals);
    let trimmed = fraction.trim_end_matches('0');

    if trimmed.is_empty() {
        whole.to_string()
    } else {
        format!("{whole}.{trimmed}")
    }
}

/// Convert an ETH amount to wei.
pub fn to_wei(amount: &str) -> Result<U256, ClientError> {
    parse_units(amount, NATIVE_DECIMALS)
}

/// Convert wei to an ETH amount.
pub fn from_wei(wei: U256) -> String {
    format_units(wei, NATIVE_DECIMALS)
}

fn ten_pow(decimals: u8) -> Option<U256> {
    U256::from(10u64).checked_pow(U256::from(decimals))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_units_whole() {
        let result = parse_units("1", 18).unwrap();
        assert_eq!(result, U256::from(1_000_000_000_000_000_000u64));
    }

    #[test]
    fn test_parse_units_decimal() {
        let result = parse_units("1.5", 18).unwrap();
        assert_eq!(result, U256::from(1_500_000_000_000_000_000u64));
    }

    #[test]
    fn test_parse_units_usdc() {
        // 1.5 USDC = 1_500_000 (6 decimals)
        let result = parse_units("1.5", 6).unwrap();
        assert_eq!(result, U256::from(1_500_000u64));
    }

    #[test]
    fn test_parse_units_small() {
        let result = to_wei("0.00001").unwrap();
        assert_eq!(result, U256::from(10_000_000_000_000u64));
    }

    #[test]
    fn test_parse_units_zero_decimals() {
        assert_eq!(parse_units("42", 0).unwrap(), U256::from(42u64));
        assert!(parse_units("4.2", 0).is_err());
    }

    #[test]
    fn test_parse_units_rejects_garbage() {
        for bad in ["", " ", "-1", "+1", "1.2.3", ".5", "1e18", "abc", "0x10", "1,5"] {
            assert!(
                matches!(parse_units(bad, 18), Err(ClientError::InvalidAmount(_))),
                "`{bad}` should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_units_excess_precision() {
        // 7 fractional digits for a 6-decimal token
        assert!(matches!(
            parse_units("0.0000001", 6),
            Err(ClientError::InvalidAmount(_))
        ));
        assert_eq!(parse_units("0.000001", 6).unwrap(), U256::from(1u64));
    }

    #[test]
    fn test_parse_units_trailing_dot() {
        assert_eq!(parse_units("3.", 6).unwrap(), U256::from(3_000_000u64));
    }

    #[test]
    fn test_parse_units_overflow() {
        let huge = format!("1{}", "0".repeat(80));
        assert!(matches!(
            parse_units(&huge, 18),
            Err(ClientError::InvalidAmount(_))
        ));
        assert!(parse_units("1", 80).is_err());
    }

    #[test]
    fn test_format_units() {
        let one_eth = U256::from(1_000_000_000_000_000_000u64);
        assert_eq!(from_wei(one_eth), "1");

        let one_and_half = U256::from(1_500_000_000_000_000_000u64);
        assert_eq!(from_wei(one_and_half), "1.5");

        assert_eq!(from_wei(U256::ZERO), "0");
        assert_eq!(from_wei(U256::from(1u64)), "0.000000000000000001");
    }

    #[test]
    fn test_format_units_usdc() {
        let one_usdc = U256::from(1_000_000u64);
        assert_eq!(format_units(one_usdc, 6), "1");

        assert_eq!(format_units(U256::from(1_234_567u64), 6), "1.234567");
        assert_eq!(format_units(U256::from(10u64), 6), "0.00001");
        assert_eq!(format_units(U256::from(7u64), 0), "7");
    }

    #[test]
    fn test_wei_round_trip() {
        let samples = [
            U256::ZERO,
            U256::from(1u64),
            U256::from(10_000_000_000_000u64),
            U256::from(1_234_567_890_123_456_789u128),
            U256::MAX,
        ];
        for wei in samples {
            assert_eq!(to_wei(&from_wei(wei)).unwrap(), wei);
        }
    }

    #[test]
    fn test_token_scaling_both_directions() {
        for decimals in [1u8, 6, 8, 18] {
            let raw = parse_units("12.5", decimals).unwrap();
            let shown = format_units(raw, decimals);
            assert_eq!(shown, "12.5");
            assert_eq!(parse_units(&shown, decimals).unwrap(), raw);
        }
    }
}
