//! Upstream request-rate governance
//!
//! The upstream provider enforces a hard per-second quota. Every request
//! that reached the upstream is stretched to at least the minimum interval;
//! cache hits issue no upstream call and are never delayed. The governor
//! only computes delays, the caller decides where to wait.

use crate::error::{Error, Result};
use std::time::{Duration, Instant};

/// Computes how long to hold back after a request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateGovernor {
    min_interval: Duration,
}

impl RateGovernor {
    /// Create a governor for a requests-per-second ceiling
    ///
    /// Fails with [`Error::Config`] for non-positive or non-finite rates.
    pub fn new(requests_per_sec: f64) -> Result<Self> {
        if !requests_per_sec.is_finite() || requests_per_sec <= 0.0 {
            return Err(Error::Config(format!(
                "requests_per_sec must be positive, got {}",
                requests_per_sec
            )));
        }

        Ok(Self {
            min_interval: Duration::from_nanos((1e9 / requests_per_sec).round() as u64),
        })
    }

    /// Minimum time between two upstream requests
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Delay owed by a request that started at `started`
    pub fn delay(&self, started: Instant, cache_hit: bool) -> Duration {
        self.delay_for(started.elapsed(), cache_hit)
    }

    /// Delay owed by a request that has been running for `elapsed`
    ///
    /// Zero on cache hits, otherwise the remainder of the minimum interval
    /// (never negative).
    pub fn delay_for(&self, elapsed: Duration, cache_hit: bool) -> Duration {
        if cache_hit {
            return Duration::ZERO;
        }
        self.min_interval.saturating_sub(elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_interval() {
        let governor = RateGovernor::new(1.25).unwrap();
        assert_eq!(governor.min_interval(), Duration::from_millis(800));

        let governor = RateGovernor::new(1.0).unwrap();
        assert_eq!(governor.min_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_invalid_rate() {
        assert!(matches!(RateGovernor::new(0.0), Err(Error::Config(_))));
        assert!(matches!(RateGovernor::new(-1.0), Err(Error::Config(_))));
        assert!(matches!(RateGovernor::new(f64::NAN), Err(Error::Config(_))));
        assert!(matches!(RateGovernor::new(f64::INFINITY), Err(Error::Config(_))));
    }

    #[test]
    fn test_cache_hit_is_never_delayed() {
        let governor = RateGovernor::new(1.0).unwrap();
        assert_eq!(governor.delay_for(Duration::ZERO, true), Duration::ZERO);
        assert_eq!(governor.delay_for(Duration::from_millis(10), true), Duration::ZERO);
        assert_eq!(governor.delay_for(Duration::from_secs(5), true), Duration::ZERO);
    }

    #[test]
    fn test_miss_pads_to_interval() {
        let governor = RateGovernor::new(1.0).unwrap();
        assert_eq!(
            governor.delay_for(Duration::from_millis(300), false),
            Duration::from_millis(700)
        );
        assert_eq!(governor.delay_for(Duration::ZERO, false), Duration::from_secs(1));
    }

    #[test]
    fn test_slow_miss_is_not_delayed() {
        let governor = RateGovernor::new(1.0).unwrap();
        assert_eq!(governor.delay_for(Duration::from_secs(1), false), Duration::ZERO);
        assert_eq!(governor.delay_for(Duration::from_secs(3), false), Duration::ZERO);
    }

    #[test]
    fn test_delay_from_instant() {
        let governor = RateGovernor::new(1.0).unwrap();
        let started = Instant::now();

        assert_eq!(governor.delay(started, true), Duration::ZERO);

        let delay = governor.delay(started, false);
        assert!(delay <= Duration::from_secs(1));
        assert!(delay > Duration::from_millis(500));
    }
}
