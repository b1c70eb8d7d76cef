// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Transfer graph output types

use serde::{Deserialize, Serialize};

/// A matched withdraw → deposit pair
///
/// `amount` always comes from the deposit side of the match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferEdge {
    /// Owner of the withdrawing store
    pub from: String,
    /// Owner of the depositing store
    pub to: String,
    /// Asset metadata address
    pub asset: String,
    /// Raw amount deposited
    pub amount: String,
}

/// Which side of a transfer an orphan is missing its counterpart on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrphanDirection {
    /// Deposit with no earlier withdraw of the same asset
    In,
    /// Withdraw never consumed by a deposit of the same asset
    Out,
}

/// A withdraw or deposit that could not be paired
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrphanEvent {
    /// Store owner
    pub account: String,
    /// Asset metadata address
    pub asset: String,
    /// Raw amount
    pub amount: String,
    /// Conveyed by the `in`/`out` grouping in serialized output
    #[serde(skip)]
    pub direction: Option<OrphanDirection>,
}

/// Orphans grouped by direction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Orphans {
    /// Deposits without a pending withdraw
    #[serde(rename = "in")]
    pub inbound: Vec<OrphanEvent>,
    /// Withdraws left pending after all events
    #[serde(rename = "out")]
    pub outbound: Vec<OrphanEvent>,
}

impl Orphans {
    /// True if every withdraw and deposit was matched
    pub fn is_empty(&self) -> bool {
        self.inbound.is_empty() && self.outbound.is_empty()
    }
}

/// Transfer edges plus unmatched records for one transaction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferGraph {
    /// Matched transfers in deposit order
    pub transfers: Vec<TransferEdge>,
    /// Unmatched withdraws and deposits
    pub orphans: Orphans,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_serialization_shape() {
        let graph = TransferGraph {
            transfers: vec![],
            orphans: Orphans {
                inbound: vec![OrphanEvent {
                    account: "0x2".into(),
                    asset: "0xa".into(),
                    amount: "1".into(),
                    direction: Some(OrphanDirection::In),
                }],
                outbound: vec![],
            },
        };
        let json = serde_json::to_value(&graph).unwrap();
        assert!(json["transfers"].as_array().unwrap().is_empty());
        assert_eq!(json["orphans"]["in"][0]["account"], "0x2");
        assert!(json["orphans"]["in"][0].get("direction").is_none());
        assert!(json["orphans"]["out"].as_array().unwrap().is_empty());
    }
}
