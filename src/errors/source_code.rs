// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for reading published Move source.

use super::RpcError;

/// Why no source could be produced for an account or module.
///
/// # Examples
///
/// ```rust
/// use aptscan::SourceCodeError;
///
/// let error = SourceCodeError::module_not_found("coin");
/// assert_eq!(error.to_string(), "module \"coin\" not found");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum SourceCodeError {
    /// The account has no package registry.
    #[error("no code metadata found at address {address}")]
    NoCodeMetadata {
        /// Account that was queried
        address: String,
    },

    /// Reading the package registry failed for another reason.
    #[error("failed to read package registry at {address}")]
    RegistryFetch {
        /// Account that was queried
        address: String,
        /// The underlying REST failure
        #[source]
        source: RpcError,
    },

    /// The registry payload has no package list.
    #[error("failed to parse package registry resource")]
    MalformedRegistry,

    /// Matching modules exist but were published without source.
    #[error("no source code available (compiled without --save-metadata)")]
    NoSourceAvailable,

    /// No module with the requested name is published.
    #[error("module {name:?} not found")]
    ModuleNotFound {
        /// Requested module name
        name: String,
    },

    /// A module's source blob is not hex-encoded gzip text.
    #[error("failed to decode module source: {details}")]
    Decode {
        /// What went wrong while decoding
        details: String,
    },
}

impl SourceCodeError {
    /// Map a registry read failure, treating 404 as "no code here".
    pub fn registry_fetch(address: impl Into<String>, source: RpcError) -> Self {
        let address = address.into();
        if source.is_not_found() {
            SourceCodeError::NoCodeMetadata { address }
        } else {
            SourceCodeError::RegistryFetch { address, source }
        }
    }

    /// Create a `ModuleNotFound` error.
    pub fn module_not_found(name: impl Into<String>) -> Self {
        SourceCodeError::ModuleNotFound { name: name.into() }
    }

    /// Create a `Decode` error with details.
    pub fn decode(details: impl Into<String>) -> Self {
        SourceCodeError::Decode {
            details: details.into(),
        }
    }
}
