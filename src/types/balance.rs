// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Balance-affecting entries and aggregated net deltas

use serde::{Deserialize, Serialize};

/// What produced a balance entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Gas paid by the sender in the native asset
    GasFee,
    /// Fungible store balance decrease
    Withdraw,
    /// Fungible store balance increase
    Deposit,
}

impl EntryKind {
    /// True for kinds that reduce the account's balance
    pub const fn is_debit(self) -> bool {
        matches!(self, EntryKind::GasFee | EntryKind::Withdraw)
    }

    /// Stable lowercase name, as serialized
    pub const fn as_str(self) -> &'static str {
        match self {
            EntryKind::GasFee => "gas_fee",
            EntryKind::Withdraw => "withdraw",
            EntryKind::Deposit => "deposit",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One balance-affecting effect of a transaction
///
/// `amount` is the raw unsigned integer in the asset's smallest unit, kept as
/// a decimal string so it survives arbitrarily large values. Owner and asset
/// may be empty when metadata could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceEntry {
    /// Entry kind
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Account whose balance changed
    pub account: String,
    /// Fungible store that held the balance
    pub fungible_store: String,
    /// Asset metadata address
    pub asset: String,
    /// Raw unsigned amount
    pub amount: String,
}

/// Aggregated signed balance change for one (account, asset)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetDelta {
    /// Account
    pub account: String,
    /// Asset metadata address
    pub asset: String,
    /// Signed net amount, e.g. `-100` or `250`
    pub amount: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_serializes_with_stable_names() {
        let entry = BalanceEntry {
            kind: EntryKind::GasFee,
            account: "0x1".into(),
            fungible_store: "0xs".into(),
            asset: "0xa".into(),
            amount: "100".into(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "gas_fee");
        assert_eq!(json["fungible_store"], "0xs");
        assert_eq!(json["amount"], "100");
    }

    #[test]
    fn test_debit_kinds() {
        assert!(EntryKind::GasFee.is_debit());
        assert!(EntryKind::Withdraw.is_debit());
        assert!(!EntryKind::Deposit.is_debit());
    }
}
