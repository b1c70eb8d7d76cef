// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Ledger effect reconciliation.
//!
//! Turns one transaction's write set and events into balance entries, net
//! deltas per (account, asset) and a transfer graph. The pipeline is:
//!
//! 1. [`scan_changes`]: ownership records, then fungible store records
//! 2. [`classify_events`]: withdraw/deposit records in emission order
//! 3. [`StoreResolver`]: ledger lookups for stores the write set missed
//! 4. [`match_flows`] or [`build_entries`] / [`aggregate`]
//!
//! Everything except step 3 is a synchronous transform over the transaction.
//! Step 3 never fails: unresolvable stores surface as empty owner/asset.
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use aptscan::{AptscanConfig, Reconciler, RestClient, TransactionRef};
//!
//! let config = AptscanConfig::from_env()?;
//! let client = Arc::new(RestClient::new(&config)?);
//! let reconciler = Reconciler::new(client, &config);
//!
//! let (tx, version) = reconciler
//!     .fetch_transaction(&TransactionRef::parse("2658869495"))
//!     .await?;
//! for delta in reconciler.reconcile_aggregated(&tx, version).await {
//!     println!("{} {} {}", delta.account, delta.asset, delta.amount);
//! }
//! ```

mod aggregator;
mod classifier;
mod matcher;
mod resolver;
mod scanner;

pub use aggregator::{aggregate, build_entries, flow_entries, gas_fee, gas_fee_entry};
pub use classifier::{classify_events, ClassifiedEvent, FlowDirection};
pub use matcher::match_flows;
pub use resolver::{ledger_version, StoreResolver};
pub use scanner::{scan_changes, OwnershipRecord, ScanResult, StoreInfo, StoreRecord};

use std::sync::Arc;

use tracing::{debug, info, Instrument};

use crate::client::LedgerClient;
use crate::errors::ReconcileError;
use crate::spans;
use crate::types::balance::{BalanceEntry, NetDelta};
use crate::types::graph::TransferGraph;
use crate::types::transaction::{Transaction, TransactionRef};
use crate::AptscanConfig;

/// Fetch a transaction and require it to be committed
///
/// Returns the transaction with its ledger version. Fetch failures carry the
/// requested reference; pending or version-less transactions are rejected.
pub async fn fetch_committed_transaction<C: LedgerClient + ?Sized>(
    client: &C,
    tx_ref: &TransactionRef,
) -> Result<(Transaction, u64), ReconcileError> {
    let span = spans::fetch_transaction(&tx_ref.to_string());
    async {
        let raw = client
            .fetch_transaction(tx_ref)
            .await
            .map_err(|source| ReconcileError::transaction_fetch(tx_ref.to_string(), source))?;
        let tx = Transaction::from_value(raw)?;

        match tx.version {
            Some(version) if tx.is_committed() => {
                debug!(version, kind = %tx.kind, "Fetched committed transaction");
                Ok((tx, version))
            }
            _ => Err(ReconcileError::not_committed(tx_ref.to_string())),
        }
    }
    .instrument(span)
    .await
}

/// Per-transaction working set shared by every output view
struct Prepared {
    scan: ScanResult,
    events: Vec<ClassifiedEvent>,
    directory: StoreRecord,
}

/// Reconciles transactions against one node
///
/// Holds no per-transaction state; a single instance can serve any number of
/// transactions, concurrently.
pub struct Reconciler<C: ?Sized> {
    client: Arc<C>,
    resolver: StoreResolver<C>,
}

impl<C: LedgerClient + ?Sized> Reconciler<C> {
    pub fn new(client: Arc<C>, config: &AptscanConfig) -> Self {
        let resolver = StoreResolver::new(Arc::clone(&client), config);
        Self { client, resolver }
    }

    /// Reconciler with a preconfigured store resolver
    pub fn with_resolver(client: Arc<C>, resolver: StoreResolver<C>) -> Self {
        Self { client, resolver }
    }

    /// See [`fetch_committed_transaction`]
    pub async fn fetch_transaction(
        &self,
        tx_ref: &TransactionRef,
    ) -> Result<(Transaction, u64), ReconcileError> {
        fetch_committed_transaction(self.client.as_ref(), tx_ref).await
    }

    /// Flat list of balance entries: gas fee first, then withdraws and deposits in event order
    ///
    /// `version` is the committed version, or `0` to resolve stores against
    /// current state.
    pub async fn reconcile(&self, tx: &Transaction, version: u64) -> Vec<BalanceEntry> {
        let span = spans::reconcile(version, false);
        async {
            let prepared = self.prepare(tx, version).await;
            let entries = build_entries(
                tx,
                &prepared.scan.stores,
                &prepared.events,
                &prepared.directory,
            );
            info!(entries = entries.len(), "Reconciled transaction");
            entries
        }
        .instrument(span)
        .await
    }

    /// Net signed delta per (account, asset), in first-seen order
    pub async fn reconcile_aggregated(&self, tx: &Transaction, version: u64) -> Vec<NetDelta> {
        let span = spans::reconcile(version, true);
        async {
            let prepared = self.prepare(tx, version).await;
            let entries = build_entries(
                tx,
                &prepared.scan.stores,
                &prepared.events,
                &prepared.directory,
            );
            let deltas = aggregate(&entries);
            info!(entries = entries.len(), deltas = deltas.len(), "Aggregated transaction");
            deltas
        }
        .instrument(span)
        .await
    }

    /// Withdraw and deposit entries only, without the gas fee
    pub async fn transfers(&self, tx: &Transaction, version: u64) -> Vec<BalanceEntry> {
        let span = spans::reconcile(version, false);
        async {
            let prepared = self.prepare(tx, version).await;
            flow_entries(&prepared.events, &prepared.directory)
        }
        .instrument(span)
        .await
    }

    /// Transfer edges and orphans
    pub async fn build_transfer_graph(&self, tx: &Transaction, version: u64) -> TransferGraph {
        let span = spans::build_transfer_graph(version, tx.events.len());
        async {
            let prepared = self.prepare(tx, version).await;
            let graph = match_flows(&prepared.events, &prepared.directory);
            info!(
                transfers = graph.transfers.len(),
                orphans_in = graph.orphans.inbound.len(),
                orphans_out = graph.orphans.outbound.len(),
                "Built transfer graph"
            );
            graph
        }
        .instrument(span)
        .await
    }

    async fn prepare(&self, tx: &Transaction, version: u64) -> Prepared {
        let scan = scan_changes(&tx.changes);
        let events = classify_events(&tx.events);
        debug!(
            owners = scan.ownership.len(),
            stores = scan.stores.len(),
            flows = events.len(),
            "Scanned transaction"
        );

        let directory = self
            .resolver
            .resolve_missing(&events, &scan.stores, version)
            .await;
        Prepared {
            scan,
            events,
            directory,
        }
    }
}
