// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! FIFO flow matching
//!
//! Withdraws and deposits carry no correlation id, so they are paired greedily
//! per asset in emission order: each deposit consumes the oldest pending
//! withdraw of the same asset. This is an approximation. Two unrelated
//! transfers of one asset that interleave can be cross-paired, and the edge
//! amount is the deposit's even if the paired withdraw differs (routed or
//! fee-adjusted flows).
//!
//! Every withdraw and deposit ends up in exactly one place: as one side of a
//! transfer edge, as an inbound orphan (deposit with nothing pending, recorded
//! immediately) or as an outbound orphan (withdraw still pending at the end).

use std::collections::{HashMap, VecDeque};

use super::classifier::{ClassifiedEvent, FlowDirection};
use super::scanner::{StoreInfo, StoreRecord};
use crate::types::graph::{OrphanDirection, OrphanEvent, TransferEdge, TransferGraph};

#[derive(Debug)]
struct PendingWithdraw {
    owner: String,
    amount: String,
}

/// Per-asset FIFO queues of pending withdraws
///
/// Assets are remembered in first-seen order so leftover withdraws are
/// reported deterministically.
#[derive(Debug, Default)]
struct PendingQueues {
    queues: HashMap<String, VecDeque<PendingWithdraw>>,
    order: Vec<String>,
}

impl PendingQueues {
    fn push(&mut self, asset: &str, pending: PendingWithdraw) {
        let queue = self.queues.entry(asset.to_string()).or_insert_with(|| {
            self.order.push(asset.to_string());
            VecDeque::new()
        });
        queue.push_back(pending);
    }

    fn pop(&mut self, asset: &str) -> Option<PendingWithdraw> {
        self.queues.get_mut(asset).and_then(VecDeque::pop_front)
    }

    fn into_orphans(mut self) -> Vec<OrphanEvent> {
        let mut orphans = Vec::new();
        for asset in self.order {
            let Some(queue) = self.queues.remove(&asset) else {
                continue;
            };
            orphans.extend(queue.into_iter().map(|pending| OrphanEvent {
                account: pending.owner,
                asset: asset.clone(),
                amount: pending.amount,
                direction: Some(OrphanDirection::Out),
            }));
        }
        orphans
    }
}

/// Pair withdraws with deposits per asset and collect the leftovers as orphans
///
/// `directory` must already contain every store the events reference; stores
/// absent from it resolve to an empty owner and asset.
pub fn match_flows(events: &[ClassifiedEvent], directory: &StoreRecord) -> TransferGraph {
    let unknown = StoreInfo::default();
    let mut pending = PendingQueues::default();
    let mut graph = TransferGraph::default();

    for event in events {
        let info = directory.get(&event.store).unwrap_or(&unknown);
        match event.direction {
            FlowDirection::Withdraw => pending.push(
                &info.asset,
                PendingWithdraw {
                    owner: info.owner.clone(),
                    amount: event.amount.clone(),
                },
            ),
            FlowDirection::Deposit => match pending.pop(&info.asset) {
                Some(withdraw) => graph.transfers.push(TransferEdge {
                    from: withdraw.owner,
                    to: info.owner.clone(),
                    asset: info.asset.clone(),
                    amount: event.amount.clone(),
                }),
                None => graph.orphans.inbound.push(OrphanEvent {
                    account: info.owner.clone(),
                    asset: info.asset.clone(),
                    amount: event.amount.clone(),
                    direction: Some(OrphanDirection::In),
                }),
            },
        }
    }

    graph.orphans.outbound = pending.into_orphans();
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory(stores: &[(&str, &str, &str)]) -> StoreRecord {
        let mut record = StoreRecord::default();
        for (store, owner, asset) in stores {
            record.insert(
                store.to_string(),
                StoreInfo {
                    owner: owner.to_string(),
                    asset: asset.to_string(),
                    balance: String::new(),
                },
            );
        }
        record
    }

    fn flow(index: usize, direction: FlowDirection, store: &str, amount: &str) -> ClassifiedEvent {
        ClassifiedEvent {
            index,
            direction,
            store: store.to_string(),
            amount: amount.to_string(),
        }
    }

    #[test]
    fn test_withdraw_then_deposit_is_one_edge() {
        let dir = directory(&[("0xs1", "0xx", "0xa"), ("0xs2", "0xy", "0xa")]);
        let events = vec![
            flow(0, FlowDirection::Withdraw, "0xs1", "100"),
            flow(1, FlowDirection::Deposit, "0xs2", "100"),
        ];

        let graph = match_flows(&events, &dir);
        assert_eq!(
            graph.transfers,
            vec![TransferEdge {
                from: "0xx".into(),
                to: "0xy".into(),
                asset: "0xa".into(),
                amount: "100".into(),
            }]
        );
        assert!(graph.orphans.is_empty());
    }

    #[test]
    fn test_leftover_withdraw_is_outbound_orphan() {
        let dir = directory(&[("0xs1", "0xx", "0xa"), ("0xs2", "0xy", "0xa")]);
        let events = vec![
            flow(0, FlowDirection::Withdraw, "0xs1", "50"),
            flow(1, FlowDirection::Withdraw, "0xs1", "50"),
            flow(2, FlowDirection::Deposit, "0xs2", "50"),
        ];

        let graph = match_flows(&events, &dir);
        assert_eq!(graph.transfers.len(), 1);
        assert!(graph.orphans.inbound.is_empty());
        assert_eq!(graph.orphans.outbound.len(), 1);
        let orphan = &graph.orphans.outbound[0];
        assert_eq!(orphan.account, "0xx");
        assert_eq!(orphan.asset, "0xa");
        assert_eq!(orphan.amount, "50");
        assert_eq!(orphan.direction, Some(OrphanDirection::Out));
    }

    #[test]
    fn test_deposit_before_withdraw_is_inbound_orphan() {
        let dir = directory(&[("0xs1", "0xx", "0xa"), ("0xs2", "0xy", "0xa")]);
        let events = vec![
            flow(0, FlowDirection::Deposit, "0xs2", "10"),
            flow(1, FlowDirection::Withdraw, "0xs1", "10"),
        ];

        let graph = match_flows(&events, &dir);
        assert!(graph.transfers.is_empty());
        assert_eq!(graph.orphans.inbound.len(), 1);
        assert_eq!(graph.orphans.inbound[0].account, "0xy");
        assert_eq!(graph.orphans.outbound.len(), 1);
        assert_eq!(graph.orphans.outbound[0].account, "0xx");
    }

    #[test]
    fn test_assets_are_matched_independently() {
        let dir = directory(&[
            ("0xapt_x", "0xx", "0xa"),
            ("0xusd_x", "0xx", "0xusd"),
            ("0xapt_y", "0xy", "0xa"),
            ("0xusd_y", "0xy", "0xusd"),
        ]);
        let events = vec![
            flow(0, FlowDirection::Withdraw, "0xapt_x", "5"),
            flow(1, FlowDirection::Withdraw, "0xusd_x", "7"),
            flow(2, FlowDirection::Deposit, "0xusd_y", "7"),
            flow(3, FlowDirection::Deposit, "0xapt_y", "4"),
        ];

        let graph = match_flows(&events, &dir);
        assert_eq!(graph.transfers.len(), 2);
        assert_eq!(graph.transfers[0].asset, "0xusd");
        assert_eq!(graph.transfers[1].asset, "0xa");
        // Amount comes from the deposit side
        assert_eq!(graph.transfers[1].amount, "4");
        assert!(graph.orphans.is_empty());
    }

    #[test]
    fn test_fifo_pairs_oldest_withdraw() {
        let dir = directory(&[
            ("0xs1", "0xfirst", "0xa"),
            ("0xs2", "0xsecond", "0xa"),
            ("0xs3", "0xdest", "0xa"),
        ]);
        let events = vec![
            flow(0, FlowDirection::Withdraw, "0xs1", "1"),
            flow(1, FlowDirection::Withdraw, "0xs2", "2"),
            flow(2, FlowDirection::Deposit, "0xs3", "2"),
        ];

        let graph = match_flows(&events, &dir);
        assert_eq!(graph.transfers[0].from, "0xfirst");
        assert_eq!(graph.orphans.outbound[0].account, "0xsecond");
    }

    #[test]
    fn test_outbound_orphans_follow_first_seen_asset_order() {
        let dir = directory(&[("0xz", "0xo", "0xzzz"), ("0xb", "0xo", "0xbbb")]);
        let events = vec![
            flow(0, FlowDirection::Withdraw, "0xz", "1"),
            flow(1, FlowDirection::Withdraw, "0xb", "2"),
            flow(2, FlowDirection::Withdraw, "0xz", "3"),
        ];

        let graph = match_flows(&events, &dir);
        let amounts: Vec<_> = graph.orphans.outbound.iter().map(|o| o.amount.as_str()).collect();
        assert_eq!(amounts, vec!["1", "3", "2"]);
    }

    #[test]
    fn test_unknown_store_still_matches_on_empty_asset() {
        let events = vec![
            flow(0, FlowDirection::Withdraw, "", "9"),
            flow(1, FlowDirection::Deposit, "0xnowhere", "9"),
        ];

        let graph = match_flows(&events, &StoreRecord::default());
        assert_eq!(graph.transfers.len(), 1);
        assert_eq!(graph.transfers[0].from, "");
        assert_eq!(graph.transfers[0].asset, "");
    }
}
