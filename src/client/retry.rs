// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Retry with exponential backoff for node REST calls.
//!
//! Every request the [`RestClient`](super::RestClient) sends goes through a
//! [`RetryPolicy`]. Transient failures (transport errors, timeouts, 429 and
//! 5xx responses) are retried; definitive answers such as 404 are returned
//! immediately. The backoff formula is:
//!
//! ```text
//! delay = min(base_delay * 2^attempt, max_delay)
//! ```

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::errors::RpcError;
use crate::AptscanConfig;

/// Default maximum number of retry attempts.
const DEFAULT_MAX_RETRIES: u32 = 3;
/// Default base delay for exponential backoff (100ms).
const DEFAULT_BASE_DELAY_MS: u64 = 100;
/// Default maximum delay between retries (10 seconds).
const DEFAULT_MAX_DELAY_MS: u64 = 10_000;

/// Retry behaviour for a single logical request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts (not including the initial request).
    pub max_retries: u32,
    /// Base delay for exponential backoff.
    pub base_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: Duration::from_millis(DEFAULT_BASE_DELAY_MS),
            max_delay: Duration::from_millis(DEFAULT_MAX_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    /// Policy derived from the crate configuration
    pub fn from_config(config: &AptscanConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            base_delay: config.retry_base_delay,
            max_delay: config.retry_max_delay,
        }
    }

    /// Backoff before retry number `attempt + 1`
    pub fn backoff(&self, attempt: u32) -> Duration {
        let multiplier = 2u64.saturating_pow(attempt);
        let delay_ms = self
            .base_delay
            .as_millis()
            .saturating_mul(multiplier as u128);
        let capped_delay_ms = delay_ms.min(self.max_delay.as_millis()) as u64;
        Duration::from_millis(capped_delay_ms)
    }

    /// Run `call` until it succeeds, fails definitively, or retries run out
    pub async fn run<T, F, Fut>(&self, operation: &str, mut call: F) -> Result<T, RpcError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, RpcError>>,
    {
        let mut attempt = 0u32;
        loop {
            match call().await {
                Ok(response) => {
                    if attempt > 0 {
                        debug!(operation, attempt, "Request succeeded after retry");
                    }
                    return Ok(response);
                }
                Err(error) => {
                    if !error.is_retryable() {
                        debug!(operation, error = %error, "Non-retryable error, not retrying");
                        return Err(error);
                    }

                    if attempt >= self.max_retries {
                        warn!(
                            operation,
                            error = %error,
                            attempts = attempt + 1,
                            "Max retries exceeded"
                        );
                        return Err(error);
                    }

                    let delay = self.backoff(attempt);
                    warn!(
                        operation,
                        error = %error,
                        attempt = attempt + 1,
                        max_retries = self.max_retries,
                        delay_ms = delay.as_millis(),
                        "Retryable error, backing off"
                    );

                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
