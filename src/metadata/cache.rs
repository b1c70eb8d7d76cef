// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Read-through cache of asset symbol and decimals
//!
//! Entries live as long as the cache instance. Each key owns a
//! [`OnceCell`], so concurrent lookups of one asset share a single in-flight
//! fetch while lookups of different assets proceed independently. The map
//! lock is held only long enough to find or create the cell.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use serde_json::Value;
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, warn, Instrument};

use crate::client::{LedgerClient, ViewRequest};
use crate::config::constants::{framework, native, type_tags};
use crate::spans;
use crate::types::asset::{AssetDecimals, AssetMetadata};
use crate::value::{parse_u64, PayloadExt};

/// True for the native asset in any spelling: `0xa`, its long form, or the coin type
pub fn is_native_asset(asset: &str) -> bool {
    if asset == native::ASSET || asset == native::COIN_TYPE {
        return true;
    }
    asset
        .strip_prefix("0x")
        .map(|hex| hex.trim_start_matches('0') == "a")
        .unwrap_or(false)
}

/// Coin types are Move struct tags; fungible assets are bare metadata addresses
fn is_coin_type(asset: &str) -> bool {
    asset.contains("::")
}

/// Hex account address, with or without the `0x` prefix, at most 32 bytes
fn is_account_address(asset: &str) -> bool {
    let hex = asset.strip_prefix("0x").unwrap_or(asset);
    !hex.is_empty() && hex.len() <= 64 && hex.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Asset metadata cache backed by a [`LedgerClient`]
pub struct AssetMetadataCache<C: ?Sized> {
    client: Arc<C>,
    entries: Mutex<HashMap<String, Arc<OnceCell<AssetMetadata>>>>,
}

impl<C: LedgerClient + ?Sized> AssetMetadataCache<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Symbol and decimals for `asset`, fetched on first use
    ///
    /// Never fails: a lookup that cannot be completed yields an empty symbol
    /// and/or zero decimals, and that partial result is what gets cached.
    /// Identifiers that are neither a coin type nor an address, including the
    /// empty asset of an unresolved store, return defaults without a call.
    pub async fn lookup(&self, asset: &str) -> AssetMetadata {
        if is_native_asset(asset) {
            return AssetMetadata::native();
        }
        if !is_coin_type(asset) && !is_account_address(asset) {
            debug!(asset, "Not an asset identifier, skipping metadata lookup");
            return AssetMetadata::default();
        }

        let cell = {
            let mut entries = self.entries.lock().await;
            Arc::clone(entries.entry(asset.to_string()).or_default())
        };

        cell.get_or_init(|| self.fetch(asset)).await.clone()
    }

    /// Look up several assets concurrently, keyed by asset
    pub async fn lookup_many<'a, I>(&self, assets: I) -> HashMap<String, AssetMetadata>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut unique: Vec<&str> = Vec::new();
        for asset in assets {
            if !unique.contains(&asset) {
                unique.push(asset);
            }
        }

        let results = join_all(unique.iter().map(|asset| self.lookup(asset))).await;
        unique
            .into_iter()
            .map(str::to_string)
            .zip(results)
            .collect()
    }

    /// Number of assets with an entry, resolved or in flight
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn fetch(&self, asset: &str) -> AssetMetadata {
        let span = spans::lookup_asset_metadata(asset);
        async {
            let metadata = if is_coin_type(asset) {
                self.fetch_coin_info(asset).await
            } else {
                self.fetch_fungible_asset(asset).await
            };
            debug!(symbol = %metadata.symbol, decimals = metadata.decimals.as_u8(), "Resolved asset metadata");
            metadata
        }
        .instrument(span)
        .await
    }

    async fn fetch_fungible_asset(&self, asset: &str) -> AssetMetadata {
        let view = |function: &str| {
            ViewRequest::new(framework::ADDRESS, framework::FUNGIBLE_ASSET_MODULE, function)
                .with_type_argument(type_tags::FUNGIBLE_METADATA)
                .with_argument(asset)
        };
        let symbol_request = view("symbol");
        let decimals_request = view("decimals");

        let (symbol, decimals) = tokio::join!(
            self.client.invoke_view(&symbol_request),
            self.client.invoke_view(&decimals_request),
        );

        let symbol = match symbol {
            Ok(values) => values
                .first()
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            Err(error) => {
                warn!(asset, error = %error, "Symbol lookup failed");
                String::new()
            }
        };
        let decimals = match decimals {
            Ok(values) => values.first().map(decimals_from).unwrap_or_default(),
            Err(error) => {
                warn!(asset, error = %error, "Decimals lookup failed");
                AssetDecimals::ZERO
            }
        };

        AssetMetadata { symbol, decimals }
    }

    async fn fetch_coin_info(&self, coin_type: &str) -> AssetMetadata {
        let issuer = coin_type.split("::").next().unwrap_or_default();
        if issuer.is_empty() {
            return AssetMetadata::default();
        }

        let resource_type = format!("{}<{coin_type}>", type_tags::COIN_INFO);
        match self
            .client
            .fetch_resource_at(issuer, &resource_type, None)
            .await
        {
            Ok(resource) => AssetMetadata {
                symbol: resource.data.string_at(&["symbol"]),
                decimals: resource
                    .data
                    .at_path(&["decimals"])
                    .map(decimals_from)
                    .unwrap_or_default(),
            },
            Err(error) => {
                warn!(coin_type, error = %error, "CoinInfo lookup failed");
                AssetMetadata::default()
            }
        }
    }
}

/// Decimals from a number or decimal string; out-of-range or unparsable is zero
fn decimals_from(value: &Value) -> AssetDecimals {
    parse_u64(value)
        .and_then(|d| u8::try_from(d).ok())
        .map(AssetDecimals::new)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_native_asset() {
        assert!(is_native_asset("0xa"));
        assert!(is_native_asset(
            "0x000000000000000000000000000000000000000000000000000000000000000a"
        ));
        assert!(is_native_asset("0x1::aptos_coin::AptosCoin"));
        assert!(!is_native_asset("0xab"));
        assert!(!is_native_asset("0x0"));
        assert!(!is_native_asset(""));
    }

    #[test]
    fn test_is_coin_type() {
        assert!(is_coin_type("0xf22b::asset::USDT"));
        assert!(!is_coin_type("0xbae207"));
    }

    #[test]
    fn test_is_account_address() {
        assert!(is_account_address("0xbae207"));
        assert!(is_account_address("bae207"));
        assert!(is_account_address(
            "0x000000000000000000000000000000000000000000000000000000000000000a"
        ));
        assert!(!is_account_address(""));
        assert!(!is_account_address("0x"));
        assert!(!is_account_address("0xnothex"));
        assert!(!is_account_address(&format!("0x{}", "1".repeat(65))));
    }

    #[test]
    fn test_decimals_from() {
        assert_eq!(decimals_from(&json!(6)), AssetDecimals::new(6));
        assert_eq!(decimals_from(&json!("8")), AssetDecimals::new(8));
        assert_eq!(decimals_from(&json!(300)), AssetDecimals::ZERO);
        assert_eq!(decimals_from(&json!("x")), AssetDecimals::ZERO);
        assert_eq!(decimals_from(&json!(null)), AssetDecimals::ZERO);
    }
}
