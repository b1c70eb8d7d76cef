// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Resource-change scanning
//!
//! Extraction runs as two explicit phases over the same write set. Ownership
//! is collected first from `ObjectCore` writes, then fungible stores are read
//! and joined against it. A store whose `ObjectCore` was not rewritten by this
//! transaction gets an empty owner.

use std::collections::HashMap;

use crate::config::constants::{native, type_tags};
use crate::types::transaction::WriteSetChange;
use crate::value::{inner_or_string, PayloadExt};

/// Object address → owner address, from `ObjectCore` writes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnershipRecord {
    owners: HashMap<String, String>,
}

impl OwnershipRecord {
    /// Phase one: collect owners from every `ObjectCore` write
    pub fn scan(changes: &[WriteSetChange]) -> Self {
        let owners = changes
            .iter()
            .filter(|change| change.is_resource_write())
            .filter(|change| change.resource_type() == type_tags::OBJECT_CORE)
            .filter(|change| !change.address.is_empty())
            .map(|change| {
                let owner = change.resource_payload().string_at(&["owner"]);
                (change.address.clone(), owner)
            })
            .collect();
        Self { owners }
    }

    /// Owner of `object`, if its `ObjectCore` was written
    pub fn owner_of(&self, object: &str) -> Option<&str> {
        self.owners.get(object).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

/// What is known about one fungible store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreInfo {
    /// Owning account, empty if unknown
    pub owner: String,
    /// Asset metadata address, empty if unknown
    pub asset: String,
    /// Balance after the transaction, empty when resolved from ledger state
    pub balance: String,
}

/// Store address → [`StoreInfo`], from `FungibleStore` writes
///
/// Iteration follows the order stores first appear in the write set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreRecord {
    stores: HashMap<String, StoreInfo>,
    order: Vec<String>,
}

impl StoreRecord {
    /// Phase two: collect fungible stores, taking owners from `ownership`
    pub fn scan(changes: &[WriteSetChange], ownership: &OwnershipRecord) -> Self {
        let mut record = Self::default();
        for change in changes {
            if !change.is_resource_write() || change.address.is_empty() {
                continue;
            }
            if !is_fungible_store(change.resource_type()) {
                continue;
            }

            let payload = change.resource_payload();
            let info = StoreInfo {
                owner: ownership
                    .owner_of(&change.address)
                    .unwrap_or_default()
                    .to_string(),
                asset: payload
                    .at_path(&["metadata"])
                    .map(inner_or_string)
                    .unwrap_or_default(),
                balance: payload.string_at(&["balance"]),
            };
            record.insert(change.address.clone(), info);
        }
        record
    }

    /// Insert or replace a store; a replaced store keeps its original position
    pub fn insert(&mut self, store: String, info: StoreInfo) {
        if !self.stores.contains_key(&store) {
            self.order.push(store.clone());
        }
        self.stores.insert(store, info);
    }

    pub fn get(&self, store: &str) -> Option<&StoreInfo> {
        self.stores.get(store)
    }

    pub fn contains(&self, store: &str) -> bool {
        self.stores.contains_key(store)
    }

    /// Stores in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StoreInfo)> {
        self.order
            .iter()
            .filter_map(|store| self.stores.get(store).map(|info| (store.as_str(), info)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// First store written in this transaction that holds the native asset for `owner`
    pub fn find_native_store(&self, owner: &str) -> Option<&str> {
        self.iter()
            .find(|(_, info)| info.owner == owner && info.asset == native::ASSET)
            .map(|(store, _)| store)
    }
}

/// Both phases of a write-set scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    pub ownership: OwnershipRecord,
    pub stores: StoreRecord,
}

/// Scan a write set: ownership first, then stores
pub fn scan_changes(changes: &[WriteSetChange]) -> ScanResult {
    let ownership = OwnershipRecord::scan(changes);
    let stores = StoreRecord::scan(changes, &ownership);
    ScanResult { ownership, stores }
}

/// True for `FungibleStore` type tags, tolerating generic parameters and re-exports
fn is_fungible_store(resource_type: &str) -> bool {
    resource_type == type_tags::FUNGIBLE_STORE
        || resource_type.contains(type_tags::FUNGIBLE_STORE_SUFFIX)
}
