// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration for aptscan operations
//!
//! This module controls the node endpoint, request timeouts, retry and rate
//! limiting behaviour, and the fan-out used when resolving stores that are not
//! part of a transaction's own write set.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use aptscan::AptscanConfig;
//!
//! let config = AptscanConfig::default();
//! assert_eq!(config.resolver_concurrency, 8);
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use aptscan::AptscanConfigBuilder;
//! use std::time::Duration;
//!
//! let config = AptscanConfigBuilder::with_defaults()
//!     .node_url("https://api.testnet.aptoslabs.com/v1")
//!     .rate_limit_per_second(5)
//!     .resolver_call_timeout(Duration::from_secs(3))
//!     .build();
//! ```

use std::str::FromStr;
use std::time::Duration;

use crate::errors::ConfigError;

pub mod constants;

/// Environment variable holding the node REST base URL
pub const ENV_NODE_URL: &str = "APTSCAN_NODE_URL";
/// Environment variable holding the request timeout in seconds
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "APTSCAN_REQUEST_TIMEOUT_SECS";
/// Environment variable holding the maximum number of retries
pub const ENV_MAX_RETRIES: &str = "APTSCAN_MAX_RETRIES";
/// Environment variable holding the requests-per-second limit
pub const ENV_RATE_LIMIT_PER_SECOND: &str = "APTSCAN_RATE_LIMIT_PER_SECOND";
/// Environment variable holding the store resolver fan-out
pub const ENV_RESOLVER_CONCURRENCY: &str = "APTSCAN_RESOLVER_CONCURRENCY";

/// Configuration for aptscan operations
///
/// Use [`AptscanConfigBuilder`] for a fluent API to construct instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AptscanConfig {
    /// Node REST base URL, including the `/v1` prefix
    pub node_url: String,

    /// Timeout applied to every HTTP request
    /// Default: 30 seconds
    pub request_timeout: Duration,

    /// Retry attempts after the initial request for transient failures
    /// Default: 3
    pub max_retries: u32,

    /// Base delay for exponential backoff
    /// Default: 100ms
    pub retry_base_delay: Duration,

    /// Upper bound on a single backoff delay
    /// Default: 10 seconds
    pub retry_max_delay: Duration,

    /// Requests per second allowed against the node (None for unlimited)
    pub rate_limit_per_second: Option<u32>,

    /// Maximum number of store lookups in flight at once
    /// Default: 8
    pub resolver_concurrency: usize,

    /// Deadline for resolving a single store's owner and asset
    /// Default: 10 seconds
    pub resolver_call_timeout: Duration,
}

impl Default for AptscanConfig {
    fn default() -> Self {
        Self {
            node_url: constants::DEFAULT_NODE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_base_delay: Duration::from_millis(100),
            retry_max_delay: Duration::from_secs(10),
            rate_limit_per_second: None,
            resolver_concurrency: 8,
            resolver_call_timeout: Duration::from_secs(10),
        }
    }
}

impl AptscanConfig {
    /// Load configuration from the environment, falling back to defaults
    ///
    /// A `.env` file in the working directory is honoured. Unset variables keep
    /// their default values; set but unparsable variables are an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = AptscanConfigBuilder::with_defaults();

        if let Some(url) = lookup(ENV_NODE_URL) {
            let trimmed = url.trim();
            if trimmed.is_empty() {
                return Err(ConfigError::invalid_value(
                    ENV_NODE_URL,
                    url.clone(),
                    "node URL must not be empty",
                ));
            }
            builder = builder.node_url(trimmed);
        }
        if let Some(secs) = parse_var::<u64>(&lookup, ENV_REQUEST_TIMEOUT_SECS)? {
            builder = builder.request_timeout(Duration::from_secs(secs));
        }
        if let Some(retries) = parse_var::<u32>(&lookup, ENV_MAX_RETRIES)? {
            builder = builder.max_retries(retries);
        }
        if let Some(rps) = parse_var::<u32>(&lookup, ENV_RATE_LIMIT_PER_SECOND)? {
            if rps == 0 {
                return Err(ConfigError::invalid_value(
                    ENV_RATE_LIMIT_PER_SECOND,
                    "0",
                    "rate limit must be positive",
                ));
            }
            builder = builder.rate_limit_per_second(rps);
        }
        if let Some(concurrency) = parse_var::<usize>(&lookup, ENV_RESOLVER_CONCURRENCY)? {
            builder = builder.resolver_concurrency(concurrency);
        }

        Ok(builder.build())
    }

    /// Node URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.node_url.trim_end_matches('/')
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::invalid_value(key, raw.clone(), e.to_string())),
    }
}

/// Builder for [`AptscanConfig`]
#[derive(Debug, Clone, Default)]
pub struct AptscanConfigBuilder {
    config: AptscanConfig,
}

impl AptscanConfigBuilder {
    /// Start from [`AptscanConfig::default`]
    pub fn with_defaults() -> Self {
        Self {
            config: AptscanConfig::default(),
        }
    }

    /// Set the node REST base URL
    pub fn node_url(mut self, url: impl Into<String>) -> Self {
        self.config.node_url = url.into();
        self
    }

    /// Set the per-request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Set the maximum number of retries for transient failures
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set the exponential backoff bounds
    pub fn retry_delays(mut self, base: Duration, max: Duration) -> Self {
        self.config.retry_base_delay = base;
        self.config.retry_max_delay = max;
        self
    }

    /// Limit requests per second against the node
    pub fn rate_limit_per_second(mut self, requests: u32) -> Self {
        self.config.rate_limit_per_second = Some(requests);
        self
    }

    /// Set the store resolver fan-out (clamped to at least 1)
    pub fn resolver_concurrency(mut self, concurrency: usize) -> Self {
        self.config.resolver_concurrency = concurrency.max(1);
        self
    }

    /// Set the deadline for resolving a single store
    pub fn resolver_call_timeout(mut self, timeout: Duration) -> Self {
        self.config.resolver_call_timeout = timeout;
        self
    }

    /// Build the configuration
    pub fn build(self) -> AptscanConfig {
        self.config
    }
}
