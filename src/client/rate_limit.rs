// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Token bucket rate limiting for node REST calls.
//!
//! Tokens are replenished at a fixed rate and each request consumes one. If no
//! token is available the caller waits until one is. The limiter is shared by
//! every request a client issues, including concurrent store lookups.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

/// Shared token bucket limiter
#[derive(Clone, Debug)]
pub struct RateLimiter {
    state: Arc<Mutex<RateLimitState>>,
}

impl RateLimiter {
    /// Allow `requests` per `period`
    pub fn new(requests: u32, period: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(RateLimitState::new(requests, period))),
        }
    }

    /// Allow `requests` per second
    pub fn per_second(requests: u32) -> Self {
        Self::new(requests, Duration::from_secs(1))
    }

    /// Wait until a request may be sent
    pub async fn acquire(&self) {
        loop {
            let wait_time = {
                let mut state = self.state.lock().await;
                state.try_acquire()
            };

            match wait_time {
                None => break,
                Some(duration) => tokio::time::sleep(duration).await,
            }
        }
    }
}

/// Internal state for the token bucket rate limiter.
#[derive(Debug)]
struct RateLimitState {
    /// Maximum number of tokens (requests) available
    capacity: u32,
    /// Current number of available tokens
    tokens: f64,
    /// Token replenishment rate (tokens per nanosecond)
    refill_rate: f64,
    /// Last time tokens were refilled
    last_refill: Instant,
}

impl RateLimitState {
    fn new(requests: u32, period: Duration) -> Self {
        let requests = requests.max(1);
        let refill_rate = requests as f64 / period.as_nanos().max(1) as f64;
        Self {
            capacity: requests,
            tokens: requests as f64,
            refill_rate,
            last_refill: Instant::now(),
        }
    }

    /// Try to acquire a token, returning the wait time if not available.
    fn try_acquire(&mut self) -> Option<Duration> {
        self.refill();

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            None
        } else {
            let needed = 1.0 - self.tokens;
            let wait_nanos = needed / self.refill_rate;
            Some(Duration::from_nanos(wait_nanos as u64))
        }
    }

    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_refill);
        let new_tokens = elapsed.as_nanos() as f64 * self.refill_rate;

        self.tokens = (self.tokens + new_tokens).min(self.capacity as f64);
        self.last_refill = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_exhaustion() {
        let mut state = RateLimitState::new(2, Duration::from_secs(1));

        assert!(state.try_acquire().is_none());
        assert!(state.try_acquire().is_none());
        assert!(state.try_acquire().is_some());
    }

    #[test]
    fn test_zero_requests_clamped() {
        let mut state = RateLimitState::new(0, Duration::from_secs(1));
        assert_eq!(state.capacity, 1);
        assert!(state.try_acquire().is_none());
    }

    #[tokio::test]
    async fn test_limiter_enforces_rate() {
        // 5 requests per second means ~200ms between requests once the burst is spent
        let limiter = RateLimiter::per_second(5);
        let start = Instant::now();

        for _ in 0..6 {
            limiter.acquire().await;
        }

        assert!(start.elapsed() >= Duration::from_millis(180));
    }

    #[tokio::test]
    async fn test_limiter_burst_is_immediate() {
        let limiter = RateLimiter::per_second(10);
        let start = Instant::now();

        for _ in 0..10 {
            limiter.acquire().await;
        }

        assert!(start.elapsed() < Duration::from_millis(100));
    }
}
