//! Process-wide request rate limiting using the governor crate.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::clock::{Clock, DefaultClock};
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovernorRateLimiter};

type DirectRateLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per window.
    pub max_requests: u32,
    /// Window duration.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 200,
            window: Duration::from_secs(60),
        }
    }
}

/// GCRA limiter shared across all requests of this process.
///
/// Limits are per-instance, not distributed.
#[derive(Clone)]
pub struct RequestRateLimiter {
    limiter: Arc<DirectRateLimiter>,
    clock: DefaultClock,
}

impl RequestRateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        let max_requests = NonZeroU32::new(config.max_requests.max(1)).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::with_period(config.window / max_requests.get())
            .unwrap_or_else(|| Quota::per_minute(max_requests))
            .allow_burst(max_requests);

        Self {
            limiter: Arc::new(DirectRateLimiter::direct(quota)),
            clock: DefaultClock::default(),
        }
    }

    /// Accepts the request or says how long the caller must wait.
    pub fn check(&self) -> Result<(), Duration> {
        self.limiter
            .check()
            .map_err(|not_until| not_until.wait_time_from(self.clock.now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_within_the_burst_are_accepted() {
        let limiter = RequestRateLimiter::new(&RateLimitConfig {
            max_requests: 3,
            window: Duration::from_secs(60),
        });

        assert!(limiter.check().is_ok());
        assert!(limiter.check().is_ok());
        assert!(limiter.check().is_ok());
    }

    #[test]
    fn exhausted_quota_reports_a_wait_time() {
        let limiter = RequestRateLimiter::new(&RateLimitConfig {
            max_requests: 1,
            window: Duration::from_secs(60),
        });

        assert!(limiter.check().is_ok());
        let wait = limiter.check().unwrap_err();
        assert!(wait > Duration::ZERO);
    }
}
