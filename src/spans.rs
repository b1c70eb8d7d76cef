// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Span creation helpers for aptscan operations.
//!
//! Telemetry is kept out of the business logic: instead of `#[instrument]`
//! attributes, each instrumented operation has a helper here and enters or
//! instruments its span explicitly.
//!
//! Usage pattern:
//! ```rust,ignore
//! pub async fn my_operation(&self, param: Type) -> Result<T> {
//!     let span = spans::my_operation(param_value);
//!     async move {
//!         // Business logic here
//!     }
//!     .instrument(span)
//!     .await
//! }
//! ```

use tracing::Span;

/// Span for fetching a single transaction and checking it is committed.
///
/// Parent: reconcile / build_transfer_graph, or None from the CLI
/// Children: rest_request
#[inline]
pub(crate) fn fetch_transaction(tx_ref: &str) -> Span {
    tracing::info_span!("aptscan.fetch_transaction", tx_ref = %tx_ref)
}

/// Span for producing balance entries (and optionally net deltas) for one transaction.
///
/// Parent: None (root span for this operation)
/// Children: resolve_missing_stores
#[inline]
pub(crate) fn reconcile(version: u64, aggregated: bool) -> Span {
    tracing::info_span!(
        "aptscan.reconcile",
        version = version,
        aggregated = aggregated,
    )
}

/// Span for building the transfer graph of one transaction.
///
/// Parent: None (root span for this operation)
/// Children: resolve_missing_stores
#[inline]
pub(crate) fn build_transfer_graph(version: u64, events: usize) -> Span {
    tracing::info_span!(
        "aptscan.build_transfer_graph",
        version = version,
        events = events,
    )
}

/// Span for the fallback lookup of every store missing from the write set.
///
/// Parent: reconcile or build_transfer_graph
/// Children: resolve_store spans (one per store)
#[inline]
pub(crate) fn resolve_missing_stores(version: u64, stores: usize) -> Span {
    tracing::debug_span!(
        "aptscan.resolve_missing_stores",
        version = version,
        stores = stores,
    )
}

/// Span for resolving the owner and asset of one store from ledger state.
///
/// Parent: resolve_missing_stores
/// Children: rest_request spans (ObjectCore and FungibleStore reads)
#[inline]
pub(crate) fn resolve_store(store: &str, version: u64) -> Span {
    tracing::debug_span!("aptscan.resolve_store", store = %store, version = version)
}

/// Span for a read-through metadata lookup.
///
/// Parent: whichever command is formatting amounts
/// Children: rest_request spans on a cache miss
#[inline]
pub(crate) fn lookup_asset_metadata(asset: &str) -> Span {
    tracing::debug_span!("aptscan.lookup_asset_metadata", asset = %asset)
}

/// Span for reading an account's published module sources.
///
/// Children: rest_request span for the package registry read
#[inline]
pub(crate) fn source_code(address: &str) -> Span {
    tracing::info_span!("aptscan.source_code", address = %address)
}

/// Span for a single HTTP request to the node, retries included.
#[inline]
pub(crate) fn rest_request(method: &str, path: &str) -> Span {
    tracing::trace_span!("aptscan.rest_request", method = %method, path = %path)
}
