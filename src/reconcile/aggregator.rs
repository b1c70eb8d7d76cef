// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Balance entries and net deltas
//!
//! Aggregation works on the flat entry list alone and never looks at the
//! transfer graph, so the two views can be checked against each other.

use std::collections::HashMap;

use bigdecimal::num_bigint::BigInt;
use bigdecimal::Zero;

use super::classifier::ClassifiedEvent;
use super::scanner::StoreRecord;
use crate::config::constants::native;
use crate::types::balance::{BalanceEntry, EntryKind, NetDelta};
use crate::types::transaction::Transaction;
use crate::value::parse_amount;

/// Gas paid by the sender: `gas_used * gas_unit_price`, exact
pub fn gas_fee(tx: &Transaction) -> BigInt {
    parse_amount(&tx.gas_used) * parse_amount(&tx.gas_unit_price)
}

/// Gas fee entry, if the fee is strictly positive
///
/// The store is the sender's native asset store when the write set touched
/// it, otherwise empty.
pub fn gas_fee_entry(tx: &Transaction, stores: &StoreRecord) -> Option<BalanceEntry> {
    let fee = gas_fee(tx);
    if fee <= BigInt::zero() {
        return None;
    }

    Some(BalanceEntry {
        kind: EntryKind::GasFee,
        account: tx.sender.clone(),
        fungible_store: stores
            .find_native_store(&tx.sender)
            .unwrap_or_default()
            .to_string(),
        asset: native::ASSET.to_string(),
        amount: fee.to_string(),
    })
}

/// One entry per withdraw/deposit, in event order, with owner and asset from `directory`
pub fn flow_entries(events: &[ClassifiedEvent], directory: &StoreRecord) -> Vec<BalanceEntry> {
    events
        .iter()
        .map(|event| {
            let (account, asset) = directory
                .get(&event.store)
                .map(|info| (info.owner.clone(), info.asset.clone()))
                .unwrap_or_default();
            BalanceEntry {
                kind: event.direction.entry_kind(),
                account,
                fungible_store: event.store.clone(),
                asset,
                amount: event.amount.clone(),
            }
        })
        .collect()
}

/// Full entry list: the gas fee (if any) first, then every store flow
///
/// Gas is located with the locally scanned stores only; `directory` adds the
/// fallback-resolved stores for events.
pub fn build_entries(
    tx: &Transaction,
    local: &StoreRecord,
    events: &[ClassifiedEvent],
    directory: &StoreRecord,
) -> Vec<BalanceEntry> {
    let mut entries = Vec::with_capacity(events.len() + 1);
    entries.extend(gas_fee_entry(tx, local));
    entries.extend(flow_entries(events, directory));
    entries
}

/// Fold entries into signed totals per (account, asset), in first-seen order
///
/// Debits (withdraw, gas fee) subtract and deposits add. Unparsable amounts
/// count as zero.
pub fn aggregate(entries: &[BalanceEntry]) -> Vec<NetDelta> {
    let mut totals: HashMap<(&str, &str), BigInt> = HashMap::new();
    let mut order: Vec<(&str, &str)> = Vec::new();

    for entry in entries {
        let key = (entry.account.as_str(), entry.asset.as_str());
        let total = totals.entry(key).or_insert_with(|| {
            order.push(key);
            BigInt::zero()
        });

        let amount = parse_amount(&entry.amount);
        if entry.kind.is_debit() {
            *total -= amount;
        } else {
            *total += amount;
        }
    }

    order
        .into_iter()
        .map(|key| NetDelta {
            account: key.0.to_string(),
            asset: key.1.to_string(),
            amount: totals
                .get(&key)
                .map(ToString::to_string)
                .unwrap_or_else(|| "0".to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::scanner::StoreInfo;

    fn entry(kind: EntryKind, account: &str, asset: &str, amount: &str) -> BalanceEntry {
        BalanceEntry {
            kind,
            account: account.to_string(),
            fungible_store: String::new(),
            asset: asset.to_string(),
            amount: amount.to_string(),
        }
    }

    fn gas_tx(gas_used: &str, gas_unit_price: &str) -> Transaction {
        Transaction {
            kind: "user_transaction".to_string(),
            version: Some(1),
            sender: "0xsender".to_string(),
            gas_used: gas_used.to_string(),
            gas_unit_price: gas_unit_price.to_string(),
            ..Transaction::default()
        }
    }

    #[test]
    fn test_gas_fee_entry() {
        let entry = gas_fee_entry(&gas_tx("1000", "100"), &StoreRecord::default()).unwrap();
        assert_eq!(entry.kind, EntryKind::GasFee);
        assert_eq!(entry.account, "0xsender");
        assert_eq!(entry.asset, "0xa");
        assert_eq!(entry.amount, "100000");
        assert_eq!(entry.fungible_store, "");
    }

    #[test]
    fn test_no_gas_fee_when_zero_or_missing() {
        assert!(gas_fee_entry(&gas_tx("0", "100"), &StoreRecord::default()).is_none());
        assert!(gas_fee_entry(&gas_tx("", ""), &StoreRecord::default()).is_none());
    }

    #[test]
    fn test_gas_fee_is_exact_beyond_u64() {
        let fee = gas_fee(&gas_tx("18446744073709551615", "18446744073709551615"));
        assert_eq!(fee.to_string(), "340282366920938463426481119284349108225");
    }

    #[test]
    fn test_gas_fee_uses_sender_native_store() {
        let mut stores = StoreRecord::default();
        stores.insert(
            "0xaptstore".to_string(),
            StoreInfo {
                owner: "0xsender".to_string(),
                asset: "0xa".to_string(),
                balance: "1".to_string(),
            },
        );
        let entry = gas_fee_entry(&gas_tx("2", "3"), &stores).unwrap();
        assert_eq!(entry.fungible_store, "0xaptstore");
    }

    #[test]
    fn test_aggregate_first_seen_order_and_signs() {
        let entries = vec![
            entry(EntryKind::GasFee, "0xb", "0xa", "10"),
            entry(EntryKind::Withdraw, "0xb", "0xa", "100"),
            entry(EntryKind::Deposit, "0xa", "0xa", "100"),
            entry(EntryKind::Deposit, "0xb", "0xusd", "5"),
            entry(EntryKind::Deposit, "0xb", "0xa", "1"),
        ];

        let deltas = aggregate(&entries);
        let flat: Vec<_> = deltas
            .iter()
            .map(|d| (d.account.as_str(), d.asset.as_str(), d.amount.as_str()))
            .collect();
        assert_eq!(
            flat,
            vec![("0xb", "0xa", "-109"), ("0xa", "0xa", "100"), ("0xb", "0xusd", "5")]
        );
    }

    #[test]
    fn test_aggregate_treats_garbage_as_zero() {
        let deltas = aggregate(&[
            entry(EntryKind::Deposit, "0xa", "0xa", "not-a-number"),
            entry(EntryKind::Withdraw, "0xa", "0xa", ""),
        ]);
        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].amount, "0");
    }
}
