// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for transaction reconciliation.
//!
//! These are the *fatal* failures: the target transaction could not be
//! obtained or parsed. Anything that only affects metadata enrichment is
//! recovered locally and never reaches this type.

use super::RpcError;

/// Errors that abort a reconciliation before any output is produced.
///
/// # Examples
///
/// ```rust
/// use aptscan::ReconcileError;
///
/// let error = ReconcileError::not_committed("0xabc");
/// assert_eq!(error.to_string(), "Transaction 0xabc is not committed yet");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    /// Fetching the transaction itself failed.
    #[error("Failed to fetch transaction {tx_ref}")]
    TransactionFetch {
        /// Version or hash that was requested
        tx_ref: String,
        /// The underlying REST failure
        #[source]
        source: RpcError,
    },

    /// The transaction exists but has no committed ledger version.
    #[error("Transaction {tx_ref} is not committed yet")]
    NotCommitted {
        /// Version or hash that was requested
        tx_ref: String,
    },

    /// The transaction JSON could not be parsed.
    #[error("Malformed transaction: {details}")]
    MalformedTransaction {
        /// What was wrong with the input
        details: String,
    },

    /// No transaction was supplied on stdin or as an argument.
    #[error("No transaction provided")]
    MissingTransaction,
}

impl ReconcileError {
    /// Wrap a REST failure with the transaction reference that was requested.
    pub fn transaction_fetch(tx_ref: impl Into<String>, source: RpcError) -> Self {
        ReconcileError::TransactionFetch {
            tx_ref: tx_ref.into(),
            source,
        }
    }

    /// Create a `NotCommitted` error.
    pub fn not_committed(tx_ref: impl Into<String>) -> Self {
        ReconcileError::NotCommitted {
            tx_ref: tx_ref.into(),
        }
    }

    /// Create a `MalformedTransaction` error with details.
    pub fn malformed(details: impl Into<String>) -> Self {
        ReconcileError::MalformedTransaction {
            details: details.into(),
        }
    }
}
