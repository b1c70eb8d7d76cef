// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Fallback resolution for stores the write set did not touch
//!
//! A withdraw or deposit can reference a store whose `FungibleStore` and
//! `ObjectCore` were not rewritten by the transaction. Owner and asset are then
//! read from ledger state at the transaction's version, or from current state
//! for the uncommitted sentinel version `0`.
//!
//! Lookups are enrichment only. A failed, timed out or undecodable read leaves
//! the corresponding field empty and is never returned as an error.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use tracing::{debug, warn, Instrument};

use super::classifier::ClassifiedEvent;
use super::scanner::{StoreInfo, StoreRecord};
use crate::client::LedgerClient;
use crate::config::constants::type_tags;
use crate::errors::RpcError;
use crate::spans;
use crate::types::transaction::Resource;
use crate::value::{inner_or_string, PayloadExt};
use crate::AptscanConfig;

/// Ledger version filter for a transaction version; `0` means current state
pub fn ledger_version(version: u64) -> Option<u64> {
    (version > 0).then_some(version)
}

/// Resolves store owner and asset from ledger state
pub struct StoreResolver<C: ?Sized> {
    client: Arc<C>,
    concurrency: usize,
    call_timeout: Duration,
}

impl<C: ?Sized> Clone for StoreResolver<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            concurrency: self.concurrency,
            call_timeout: self.call_timeout,
        }
    }
}

impl<C: LedgerClient + ?Sized> StoreResolver<C> {
    pub fn new(client: Arc<C>, config: &AptscanConfig) -> Self {
        Self::with_limits(client, config.resolver_concurrency, config.resolver_call_timeout)
    }

    /// Resolver with an explicit fan-out width and per-call deadline
    pub fn with_limits(client: Arc<C>, concurrency: usize, call_timeout: Duration) -> Self {
        Self {
            client,
            concurrency: concurrency.max(1),
            call_timeout,
        }
    }

    /// Resolve one store with two resource reads
    ///
    /// An empty store address is never queried.
    pub async fn resolve_store(&self, store: &str, version: u64) -> StoreInfo {
        if store.is_empty() {
            return StoreInfo::default();
        }

        let span = spans::resolve_store(store, version);
        async {
            let at = ledger_version(version);
            let (object_core, fungible_store) = tokio::join!(
                self.fetch(store, type_tags::OBJECT_CORE, at),
                self.fetch(store, type_tags::FUNGIBLE_STORE, at),
            );

            let owner = object_core
                .map(|resource| resource.data.string_at(&["owner"]))
                .unwrap_or_default();
            let asset = fungible_store
                .map(|resource| {
                    resource
                        .data
                        .at_path(&["metadata"])
                        .map(inner_or_string)
                        .unwrap_or_default()
                })
                .unwrap_or_default();

            debug!(owner = %owner, asset = %asset, "Resolved store from ledger state");
            StoreInfo {
                owner,
                asset,
                balance: String::new(),
            }
        }
        .instrument(span)
        .await
    }

    /// Complete `local` with every store referenced by `events` but missing from it
    ///
    /// Each missing store is queried once, with at most `concurrency` lookups
    /// in flight. The returned record keeps local stores first, then resolved
    /// stores in the order events first reference them.
    pub async fn resolve_missing(
        &self,
        events: &[ClassifiedEvent],
        local: &StoreRecord,
        version: u64,
    ) -> StoreRecord {
        let mut missing: Vec<&str> = Vec::new();
        for event in events {
            let store = event.store.as_str();
            if store.is_empty() || local.contains(store) || missing.contains(&store) {
                continue;
            }
            missing.push(store);
        }

        let mut directory = local.clone();
        if missing.is_empty() {
            return directory;
        }

        let span = spans::resolve_missing_stores(version, missing.len());
        let mut resolved: HashMap<&str, StoreInfo> = stream::iter(missing.iter().copied())
            .map(|store| async move { (store, self.resolve_store(store, version).await) })
            .buffer_unordered(self.concurrency)
            .collect::<HashMap<_, _>>()
            .instrument(span)
            .await;

        for store in missing {
            let info = resolved.remove(store).unwrap_or_default();
            directory.insert(store.to_string(), info);
        }
        directory
    }

    async fn fetch(&self, store: &str, resource_type: &str, at: Option<u64>) -> Option<Resource> {
        let result = tokio::time::timeout(
            self.call_timeout,
            self.client.fetch_resource_at(store, resource_type, at),
        )
        .await
        .unwrap_or_else(|_| {
            Err(RpcError::timeout(
                format!("read {resource_type} at {store}"),
                self.call_timeout,
            ))
        });

        match result {
            Ok(resource) => Some(resource),
            Err(error) if error.is_not_found() => {
                debug!(store, resource_type, "Resource absent, leaving field empty");
                None
            }
            Err(error) => {
                warn!(store, resource_type, error = %error, "Store lookup failed, leaving field empty");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_version_sentinel() {
        assert_eq!(ledger_version(0), None);
        assert_eq!(ledger_version(42), Some(42));
    }
}
