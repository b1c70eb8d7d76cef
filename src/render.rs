// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Text rendering for terminal output

use std::collections::HashMap;
use std::fmt;

use crate::metadata::{format_amount, format_asset, truncate_address};
use crate::sends::AccountSend;
use crate::types::asset::AssetMetadata;
use crate::types::graph::{OrphanEvent, TransferEdge, TransferGraph};

/// Every asset the graph mentions, in first-seen order
pub fn graph_assets(graph: &TransferGraph) -> Vec<&str> {
    let mut assets: Vec<&str> = Vec::new();
    let mentioned = graph
        .transfers
        .iter()
        .map(|edge| edge.asset.as_str())
        .chain(graph.orphans.inbound.iter().map(|o| o.asset.as_str()))
        .chain(graph.orphans.outbound.iter().map(|o| o.asset.as_str()));
    for asset in mentioned {
        if !assets.contains(&asset) {
            assets.push(asset);
        }
    }
    assets
}

/// Transfer graph grouped by sender, with formatted amounts
///
/// ```text
/// 0x1234..abcd
///   → 0x9876..0fed   1.5 APT (0xa)
///
/// Orphans:
///   IN:  0x5555..6666  10 USDC (0xbae2..6f3b)
/// ```
pub struct PrettyGraph<'a> {
    graph: &'a TransferGraph,
    metadata: &'a HashMap<String, AssetMetadata>,
}

impl<'a> PrettyGraph<'a> {
    pub fn new(graph: &'a TransferGraph, metadata: &'a HashMap<String, AssetMetadata>) -> Self {
        Self { graph, metadata }
    }

    fn amount_and_asset(&self, asset: &str, amount: &str) -> (String, String) {
        let unknown = AssetMetadata::default();
        let metadata = self.metadata.get(asset).unwrap_or(&unknown);
        (
            format_amount(amount, metadata.decimals),
            format_asset(asset, metadata),
        )
    }

    fn senders(&self) -> Vec<(&'a str, Vec<&'a TransferEdge>)> {
        let graph: &'a TransferGraph = self.graph;
        let mut groups: Vec<(&'a str, Vec<&'a TransferEdge>)> = Vec::new();
        for edge in &graph.transfers {
            match groups.iter_mut().find(|(from, _)| *from == edge.from) {
                Some((_, edges)) => edges.push(edge),
                None => groups.push((edge.from.as_str(), vec![edge])),
            }
        }
        groups
    }

    fn write_orphan(
        &self,
        f: &mut fmt::Formatter<'_>,
        label: &str,
        orphan: &OrphanEvent,
    ) -> fmt::Result {
        let (amount, asset) = self.amount_and_asset(&orphan.asset, &orphan.amount);
        writeln!(
            f,
            "  {label} {}  {amount} {asset}",
            truncate_address(&orphan.account)
        )
    }
}

impl fmt::Display for PrettyGraph<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (sender, edges) in self.senders() {
            writeln!(f, "{}", truncate_address(sender))?;
            for edge in edges {
                let (amount, asset) = self.amount_and_asset(&edge.asset, &edge.amount);
                writeln!(f, "  → {}   {amount} {asset}", truncate_address(&edge.to))?;
            }
            writeln!(f)?;
        }

        if !self.graph.orphans.is_empty() {
            writeln!(f, "Orphans:")?;
            for orphan in &self.graph.orphans.inbound {
                self.write_orphan(f, "IN: ", orphan)?;
            }
            for orphan in &self.graph.orphans.outbound {
                self.write_orphan(f, "OUT:", orphan)?;
            }
        }
        Ok(())
    }
}

/// One aligned line per send: `[version] amount asset → to`
pub struct PrettySends<'a>(pub &'a [AccountSend]);

impl fmt::Display for PrettySends<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount_width = self.0.iter().map(|s| s.amount.len()).max().unwrap_or(0);
        let asset_width = self.0.iter().map(|s| s.asset.len()).max().unwrap_or(0);
        for send in self.0 {
            writeln!(
                f,
                "[{}] {:>amount_width$} {:<asset_width$} → {}",
                send.version, send.amount, send.asset, send.to
            )?;
        }
        Ok(())
    }
}
