// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the aptscan library.
//!
//! Errors follow a hybrid layout:
//!
//! - **Concern-specific errors** for fine-grained handling ([`RpcError`],
//!   [`ReconcileError`], [`SourceCodeError`], [`ConfigError`])
//! - **Unified error type** ([`AptscanError`]) for callers that only need to
//!   report a failure
//!
//! Only failures that prevent producing *any* output are represented here.
//! Metadata enrichment failures (store owner, asset identifier, symbol,
//! decimals) degrade a single field to its empty/default value and are logged
//! instead of returned.
//!
//! # Examples
//!
//! ```rust,ignore
//! use aptscan::{ReconcileError, Reconciler, TransactionRef};
//!
//! match reconciler.fetch_transaction(&TransactionRef::parse("12345")).await {
//!     Ok((tx, version)) => println!("fetched {version}"),
//!     Err(ReconcileError::NotCommitted { tx_ref }) => {
//!         eprintln!("{tx_ref} is still pending");
//!     }
//!     Err(e) => eprintln!("Other error: {e}"),
//! }
//! ```

mod config;
mod reconcile;
mod rpc;
mod source_code;

pub use config::ConfigError;
pub use reconcile::ReconcileError;
pub use rpc::RpcError;
pub use source_code::SourceCodeError;

/// Unified error type for all aptscan operations.
///
/// All concern-specific error types convert into `AptscanError` via `From`,
/// so `?` propagates them naturally.
#[derive(Debug, thiserror::Error)]
pub enum AptscanError {
    /// Error from a node REST call.
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    /// Error that prevented reconciling a transaction.
    #[error("Reconciliation error: {0}")]
    Reconcile(#[from] ReconcileError),

    /// Published source could not be produced.
    #[error("Source code error: {0}")]
    SourceCode(#[from] SourceCodeError),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
