//! Rate limiter for preventing brute-force login attempts

use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::info;

/// Rate limiter configuration
#[derive(Debug, Clone)]
pub struct RateLimiterConfig {
    /// Maximum number of attempts allowed within the window
    pub max_attempts: u32,
    /// Time window in seconds
    pub window_seconds: u64,
    /// Ban duration in seconds once the limit is exceeded
    pub ban_duration_seconds: u64,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            window_seconds: 300,        // 5 minutes
            ban_duration_seconds: 3600, // 1 hour
        }
    }
}

#[derive(Debug)]
struct RateLimiterEntry {
    attempts: u32,
    last_attempt: Instant,
    ban_expires: Option<Instant>,
}

/// In-process rate limiter keyed by login identifier
#[derive(Debug, Clone)]
pub struct RateLimiter {
    config: RateLimiterConfig,
    entries: Arc<Mutex<HashMap<String, RateLimiterEntry>>>,
}

impl RateLimiter {
    /// Create a new rate limiter
    pub fn new(config: RateLimiterConfig) -> Self {
        Self {
            config,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Check if a key is allowed to make another attempt
    pub async fn is_allowed(&self, key: &str) -> Result<bool> {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();

        let entry = entries.entry(key.to_string()).or_insert(RateLimiterEntry {
            attempts: 0,
            last_attempt: now,
            ban_expires: None,
        });

        if let Some(ban_expires) = entry.ban_expires {
            if now >= ban_expires {
                entry.attempts = 0;
                entry.ban_expires = None;
            } else {
                return Ok(false);
            }
        }

        if now.duration_since(entry.last_attempt) >= Duration::from_secs(self.config.window_seconds)
        {
            entry.attempts = 0;
        }

        if entry.attempts >= self.config.max_attempts {
            entry.ban_expires = Some(now + Duration::from_secs(self.config.ban_duration_seconds));
            info!(
                "Banned key {} for {} seconds",
                key, self.config.ban_duration_seconds
            );
            return Ok(false);
        }

        entry.attempts += 1;
        entry.last_attempt = now;

        Ok(true)
    }

    /// Clear the attempt history for a key, used after a successful login
    pub async fn reset(&self, key: &str) {
        let mut entries = self.entries.lock().await;
        entries.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max_attempts: u32, window_seconds: u64, ban_duration_seconds: u64) -> RateLimiter {
        RateLimiter::new(RateLimiterConfig {
            max_attempts,
            window_seconds,
            ban_duration_seconds,
        })
    }

    #[tokio::test]
    async fn test_allows_up_to_max_attempts() {
        let limiter = limiter(3, 300, 3600);

        assert!(limiter.is_allowed("alice").await.unwrap());
        assert!(limiter.is_allowed("alice").await.unwrap());
        assert!(limiter.is_allowed("alice").await.unwrap());
        assert!(!limiter.is_allowed("alice").await.unwrap());
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let limiter = limiter(1, 300, 3600);

        assert!(limiter.is_allowed("alice").await.unwrap());
        assert!(!limiter.is_allowed("alice").await.unwrap());
        assert!(limiter.is_allowed("bob").await.unwrap());
    }

    #[tokio::test]
    async fn test_reset_clears_history() {
        let limiter = limiter(1, 300, 3600);

        assert!(limiter.is_allowed("alice").await.unwrap());
        assert!(!limiter.is_allowed("alice").await.unwrap());

        limiter.reset("alice").await;
        assert!(limiter.is_allowed("alice").await.unwrap());
    }

    #[tokio::test]
    async fn test_ban_expires_after_duration() {
        let limiter = limiter(1, 1, 1);

        assert!(limiter.is_allowed("alice").await.unwrap());
        assert!(!limiter.is_allowed("alice").await.unwrap());

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert!(limiter.is_allowed("alice").await.unwrap());
    }
}
