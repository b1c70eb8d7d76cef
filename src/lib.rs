// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Ledger effect reconciliation for Aptos transactions.
//!
//! Given one transaction, aptscan derives:
//!
//! - a flat list of balance entries (gas fee, fungible store withdraws and deposits)
//! - the net signed change per (account, asset), in first-seen order
//! - a transfer graph pairing withdraws with deposits, plus unmatched orphans
//!
//! Owners and assets come from the transaction's own write set where possible
//! and from ledger state at the transaction's version otherwise. Amounts are
//! exact integers throughout; symbol and decimal metadata is only used for
//! display.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use aptscan::{AptscanConfig, Reconciler, RestClient, TransactionRef};
//!
//! let config = AptscanConfig::default();
//! let client = Arc::new(RestClient::new(&config)?);
//! let reconciler = Reconciler::new(client, &config);
//!
//! let (tx, version) = reconciler.fetch_transaction(&TransactionRef::Version(42)).await?;
//! let graph = reconciler.build_transfer_graph(&tx, version).await;
//! println!("{}", serde_json::to_string_pretty(&graph)?);
//! ```

pub mod bootstrap;
pub mod cli;
pub mod client;
pub mod config;
pub mod errors;
pub mod metadata;
pub mod reconcile;
pub mod render;
pub mod sends;
pub mod source_code;
mod spans;
pub mod types;
pub mod value;

pub use client::{LedgerClient, RateLimiter, RestClient, RetryPolicy, ViewRequest};
pub use config::{AptscanConfig, AptscanConfigBuilder};
pub use errors::{AptscanError, ConfigError, ReconcileError, RpcError, SourceCodeError};
pub use metadata::{format_amount, format_asset, truncate_address, AssetMetadataCache};
pub use reconcile::{fetch_committed_transaction, Reconciler, StoreResolver};
pub use types::asset::{AssetDecimals, AssetMetadata};
pub use types::balance::{BalanceEntry, EntryKind, NetDelta};
pub use types::graph::{OrphanDirection, OrphanEvent, Orphans, TransferEdge, TransferGraph};
pub use types::transaction::{Event, Resource, Transaction, TransactionRef, WriteSetChange};
