// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Human-readable amounts and addresses

use bigdecimal::num_bigint::{BigInt, Sign};

use crate::types::asset::{AssetDecimals, AssetMetadata};

/// Addresses longer than this are shortened for display
const MAX_DISPLAY_ADDRESS_LEN: usize = 12;

/// Render a raw integer amount with `decimals` fractional digits
///
/// Exact integer arithmetic only: the amount is split by `10^decimals` into
/// quotient and remainder, the remainder is zero-padded and stripped of
/// trailing zeros, and the fraction is omitted when nothing is left. Zero
/// decimals and unparsable input return the input unchanged.
///
/// # Examples
///
/// ```
/// use aptscan::{format_amount, AssetDecimals};
///
/// assert_eq!(format_amount("123456789", AssetDecimals::new(8)), "1.23456789");
/// assert_eq!(format_amount("100000000", AssetDecimals::new(8)), "1");
/// assert_eq!(format_amount("5", AssetDecimals::new(2)), "0.05");
/// assert_eq!(format_amount("5", AssetDecimals::ZERO), "5");
/// ```
pub fn format_amount(raw: &str, decimals: AssetDecimals) -> String {
    if decimals == AssetDecimals::ZERO {
        return raw.to_string();
    }
    let Ok(value) = raw.trim().parse::<BigInt>() else {
        return raw.to_string();
    };

    let magnitude = BigInt::from_biguint(Sign::Plus, value.magnitude().clone());
    let scale = decimals.scale();
    let quotient = &magnitude / &scale;
    let remainder = &magnitude % &scale;

    let width = usize::from(decimals.as_u8());
    let padded = format!("{:0>width$}", remainder.to_string());
    let fraction = padded.trim_end_matches('0');

    let sign = if value.sign() == Sign::Minus { "-" } else { "" };
    if fraction.is_empty() {
        format!("{sign}{quotient}")
    } else {
        format!("{sign}{quotient}.{fraction}")
    }
}

/// Shorten long addresses to `0x1234..abcd`
pub fn truncate_address(address: &str) -> String {
    if address.len() <= MAX_DISPLAY_ADDRESS_LEN || !address.is_ascii() {
        return address.to_string();
    }
    format!("{}..{}", &address[..6], &address[address.len() - 4..])
}

/// `SYMBOL (0x1234..abcd)`, or just the short address without a symbol
pub fn format_asset(asset: &str, metadata: &AssetMetadata) -> String {
    if metadata.symbol.is_empty() {
        truncate_address(asset)
    } else {
        format!("{} ({})", metadata.symbol, truncate_address(asset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        let d = AssetDecimals::new;
        assert_eq!(format_amount("0", d(8)), "0");
        assert_eq!(format_amount("1", d(8)), "0.00000001");
        assert_eq!(format_amount("100000000", d(8)), "1");
        assert_eq!(format_amount("123456789", d(8)), "1.23456789");
        assert_eq!(format_amount("150", d(2)), "1.5");
        assert_eq!(format_amount("1000000", d(6)), "1");
        assert_eq!(format_amount("1", d(18)), "0.000000000000000001");
    }

    #[test]
    fn test_format_amount_passthrough() {
        assert_eq!(format_amount("123456789", AssetDecimals::ZERO), "123456789");
        assert_eq!(format_amount("abc", AssetDecimals::new(8)), "abc");
        assert_eq!(format_amount("", AssetDecimals::new(8)), "");
    }

    #[test]
    fn test_format_amount_beyond_u128() {
        let raw = "1000000000000000000000000000000000000000001";
        assert_eq!(
            format_amount(raw, AssetDecimals::new(18)),
            "1000000000000000000000000.000000000000000001"
        );
    }

    #[test]
    fn test_format_negative_delta() {
        assert_eq!(format_amount("-150", AssetDecimals::new(2)), "-1.5");
        assert_eq!(format_amount("-5", AssetDecimals::new(2)), "-0.05");
    }

    #[test]
    fn test_truncate_address() {
        assert_eq!(truncate_address("0xa"), "0xa");
        assert_eq!(truncate_address("0x1234567890"), "0x1234567890");
        assert_eq!(
            truncate_address("0x1234567890abcdef1234567890abcdef"),
            "0x1234..cdef"
        );
    }

    #[test]
    fn test_format_asset() {
        let long = "0xbae207659db88bea0cbead6da0ed00aac12edcdda169e591cd41c94180b46f3b";
        assert_eq!(
            format_asset(long, &AssetMetadata::new("USDC", 6)),
            "USDC (0xbae2..6f3b)"
        );
        assert_eq!(format_asset(long, &AssetMetadata::default()), "0xbae2..6f3b");
        assert_eq!(format_asset("0xa", &AssetMetadata::native()), "APT (0xa)");
    }
}
