// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Asset display metadata

use bigdecimal::num_bigint::BigInt;
use serde::{Deserialize, Serialize};

use crate::config::constants::native;

/// Fungible asset decimal precision
///
/// The on-chain value is a `u8`. Most assets use 6 or 8 decimals; the native
/// asset uses 8.
///
/// # Examples
///
/// ```
/// use aptscan::AssetDecimals;
///
/// assert_eq!(AssetDecimals::NATIVE.as_u8(), 8);
/// assert_eq!(AssetDecimals::new(2).scale().to_string(), "100");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetDecimals(u8);

impl AssetDecimals {
    /// Decimals of the native asset (8)
    pub const NATIVE: Self = Self(native::DECIMALS);

    /// No fractional digits
    pub const ZERO: Self = Self(0);

    /// Create a new decimal precision value
    pub const fn new(decimals: u8) -> Self {
        Self(decimals)
    }

    /// Get the inner u8 value
    pub const fn as_u8(&self) -> u8 {
        self.0
    }

    /// Exact scale factor: 10^decimals
    pub fn scale(&self) -> BigInt {
        BigInt::from(10u8).pow(u32::from(self.0))
    }
}

impl From<u8> for AssetDecimals {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for AssetDecimals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} decimals", self.0)
    }
}

/// Symbol and decimals for one asset
///
/// An unresolved lookup leaves `symbol` empty and `decimals` at zero, which
/// makes amounts render unscaled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetMetadata {
    /// Display symbol
    pub symbol: String,
    /// Decimal count
    pub decimals: AssetDecimals,
}

impl AssetMetadata {
    /// Create metadata from a symbol and decimal count
    pub fn new(symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            symbol: symbol.into(),
            decimals: AssetDecimals::new(decimals),
        }
    }

    /// Metadata of the native asset
    pub fn native() -> Self {
        Self::new(native::SYMBOL, native::DECIMALS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_is_exact_for_large_decimals() {
        assert_eq!(
            AssetDecimals::new(18).scale().to_string(),
            "1000000000000000000"
        );
        assert_eq!(AssetDecimals::new(30).scale().to_string().len(), 31);
        assert_eq!(AssetDecimals::ZERO.scale(), BigInt::from(1u8));
    }

    #[test]
    fn test_native_metadata() {
        let meta = AssetMetadata::native();
        assert_eq!(meta.symbol, "APT");
        assert_eq!(meta.decimals, AssetDecimals::NATIVE);
        assert_ne!(meta, AssetMetadata::default());
    }

    #[test]
    fn test_display_formatting() {
        assert_eq!(AssetDecimals::new(6).to_string(), "6 decimals");
    }

    #[test]
    fn test_serialization_is_transparent() {
        let json = serde_json::to_string(&AssetDecimals::new(6)).unwrap();
        assert_eq!(json, "6");
    }
}
