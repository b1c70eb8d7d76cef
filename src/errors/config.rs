// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for configuration loading.

/// Invalid configuration supplied through the environment or the builder.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A configuration value could not be used.
    #[error("Invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        /// Configuration key (environment variable name)
        key: String,
        /// The rejected value
        value: String,
        /// Why it was rejected
        reason: String,
    },
}

impl ConfigError {
    /// Create an `InvalidValue` error.
    pub fn invalid_value(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ConfigError::InvalidValue {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}
