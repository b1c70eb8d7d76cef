// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Shared error types for node REST operations.

use std::time::Duration;

/// Errors that can occur while talking to an Aptos node's REST API.
///
/// Each variant carries the request path or a description of the operation so
/// that a failure can be traced back to the exact call that produced it.
///
/// # Examples
///
/// ```rust
/// use aptscan::RpcError;
///
/// let error = RpcError::not_found("/transactions/by_version/42");
/// assert!(error.is_not_found());
/// println!("Error: {}", error);
/// ```
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The node answered 404 for the requested path.
    ///
    /// Resources that were never written at the requested ledger version, and
    /// unknown transaction hashes, both surface this way.
    #[error("Not found: {path}")]
    NotFound {
        /// Request path that was not found
        path: String,
    },

    /// The node answered with a non-success status other than 404.
    #[error("API error (status {status}) for {path}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Request path
        path: String,
        /// Response body as returned by the node
        body: String,
    },

    /// The request could not be sent or the response could not be read.
    #[error("Request failed during {operation}")]
    Transport {
        /// Description of the operation that failed
        operation: String,
        /// The underlying error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The response body was not the JSON shape we expected.
    #[error("Failed to decode response for {operation}")]
    Decode {
        /// Description of the operation whose response failed to decode
        operation: String,
        /// The underlying error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The call did not complete within its deadline.
    #[error("{operation} timed out after {timeout:?}")]
    Timeout {
        /// Description of the operation that timed out
        operation: String,
        /// Deadline that was exceeded
        timeout: Duration,
    },

    /// A request URL could not be constructed.
    #[error("Invalid URL {url}")]
    InvalidUrl {
        /// The offending URL or path
        url: String,
        /// The underlying parse error
        #[source]
        source: url::ParseError,
    },
}

impl RpcError {
    /// Create a `NotFound` error for a request path.
    pub fn not_found(path: impl Into<String>) -> Self {
        RpcError::NotFound { path: path.into() }
    }

    /// Create an `Api` error from a status code and response body.
    pub fn api(status: u16, path: impl Into<String>, body: impl Into<String>) -> Self {
        RpcError::Api {
            status,
            path: path.into(),
            body: body.into(),
        }
    }

    /// Helper to create a `Transport` error from any error type.
    pub fn transport(
        operation: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::Transport {
            operation: operation.into(),
            source: Box::new(source),
        }
    }

    /// Helper to create a `Decode` error from any error type.
    pub fn decode(
        operation: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::Decode {
            operation: operation.into(),
            source: Box::new(source),
        }
    }

    /// Create a `Timeout` error.
    pub fn timeout(operation: impl Into<String>, timeout: Duration) -> Self {
        RpcError::Timeout {
            operation: operation.into(),
            timeout,
        }
    }

    /// Returns true if the node reported the path as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RpcError::NotFound { .. })
    }

    /// Returns true if retrying the same request may succeed.
    ///
    /// Transport failures, timeouts, 429 and 5xx responses are transient.
    /// Everything else is a definitive answer from the node.
    pub fn is_retryable(&self) -> bool {
        match self {
            RpcError::Transport { .. } | RpcError::Timeout { .. } => true,
            RpcError::Api { status, .. } => *status == 429 || *status >= 500,
            RpcError::NotFound { .. } | RpcError::Decode { .. } | RpcError::InvalidUrl { .. } => {
                false
            }
        }
    }
}
