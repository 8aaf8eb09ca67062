use crate::error::AppError;
use dashmap::DashMap;
use std::time::Instant;

#[derive(Clone)]
struct Bucket {
    capacity: u32,
    tokens: f64,
    refill_rate: f64,
    last_update: Instant,
}

impl Bucket {
    fn new(capacity: u32, refill_rate: f64) -> Self {
        Self {
            capacity,
            tokens: capacity as f64,
            refill_rate,
            last_update: Instant::now(),
        }
    }

    fn allow_request(&mut self, tokens: u32) -> bool {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update).as_secs_f64();

        self.tokens = f64::min(
            self.capacity as f64,
            self.tokens + elapsed * self.refill_rate,
        );
        self.last_update = now;

        if self.tokens >= tokens as f64 {
            self.tokens -= tokens as f64;
            true
        } else {
            false
        }
    }
}

/// Token bucket per key, e.g. `"<user id>:assessments"`
pub struct RateLimiter {
    buckets: DashMap<String, Bucket>,
    capacity: u32,
    refill_per_sec: f64,
}

impl RateLimiter {
    /// Bursts up to `limit` requests, refilling `limit` per minute
    pub fn per_minute(limit: u32) -> Self {
        Self {
            buckets: DashMap::new(),
            capacity: limit,
            refill_per_sec: f64::from(limit) / 60.0,
        }
    }

    pub fn check_rate_limit(&self, key: &str) -> Result<(), AppError> {
        let mut bucket = self
            .buckets
            .entry(key.to_string())
            .or_insert_with(|| Bucket::new(self.capacity, self.refill_per_sec));

        if bucket.allow_request(1) {
            Ok(())
        } else {
            tracing::debug!(key, "rate limit exceeded");
            Err(AppError::RateLimitExceeded(format!("Rate limit for {}", key)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_then_reject() {
        let limiter = RateLimiter::per_minute(2);
        assert!(limiter.check_rate_limit("u:assessments").is_ok());
        assert!(limiter.check_rate_limit("u:assessments").is_ok());
        assert!(matches!(
            limiter.check_rate_limit("u:assessments"),
            Err(AppError::RateLimitExceeded(_))
        ));
    }

    #[test]
    fn test_keys_are_independent() {
        let limiter = RateLimiter::per_minute(1);
        assert!(limiter.check_rate_limit("a").is_ok());
        assert!(limiter.check_rate_limit("b").is_ok());
        assert!(limiter.check_rate_limit("a").is_err());
    }
}
