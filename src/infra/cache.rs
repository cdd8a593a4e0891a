//! Redis-backed rate limit counters.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError};

use common::{AppError, AppResult, CacheConfig};

use super::health::HealthCheck;

/// Outcome of counting one request against a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitStatus {
    /// Requests seen in the current window, including this one
    pub count: u64,
    pub allowed: bool,
    /// Seconds until the window resets
    pub retry_after: u64,
}

/// Fixed-window request counter.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    async fn check_rate_limit(
        &self,
        key: &str,
        max_requests: u64,
        window_seconds: u64,
    ) -> AppResult<RateLimitStatus>;
}

/// Redis connection wrapper.
#[derive(Clone)]
pub struct Cache {
    connection: ConnectionManager,
}

impl Cache {
    /// Connect to Redis.
    pub async fn connect(config: &CacheConfig) -> AppResult<Self> {
        let client = Client::open(config.url.as_str()).map_err(cache_error)?;
        let connection = ConnectionManager::new(client).await.map_err(cache_error)?;

        tracing::info!("Redis connected");

        Ok(Self { connection })
    }
}

#[async_trait]
impl RateLimiter for Cache {
    async fn check_rate_limit(
        &self,
        key: &str,
        max_requests: u64,
        window_seconds: u64,
    ) -> AppResult<RateLimitStatus> {
        let mut conn = self.connection.clone();

        // Count before arming the expiry so concurrent first requests cannot reset the window
        let (count, ttl): (u64, i64) = redis::pipe()
            .atomic()
            .incr(key, 1u64)
            .ttl(key)
            .query_async(&mut conn)
            .await
            .map_err(cache_error)?;

        // A new key, or one whose EXPIRE was lost, has no TTL yet
        if ttl < 0 {
            let _: () = conn
                .expire(key, window_seconds as i64)
                .await
                .map_err(cache_error)?;
        }

        Ok(window_status(count, ttl, max_requests, window_seconds))
    }
}

fn window_status(count: u64, ttl: i64, max_requests: u64, window_seconds: u64) -> RateLimitStatus {
    RateLimitStatus {
        count,
        allowed: count <= max_requests,
        retry_after: if ttl > 0 { ttl as u64 } else { window_seconds },
    }
}

#[async_trait]
impl HealthCheck for Cache {
    async fn ping(&self) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(cache_error)?;
        Ok(())
    }
}

fn cache_error(e: RedisError) -> AppError {
    AppError::Cache(e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_within_the_limit_are_allowed() {
        let status = window_status(3, 40, 5, 60);
        assert!(status.allowed);
        assert_eq!(status.retry_after, 40);
    }

    #[test]
    fn counts_past_the_limit_are_denied() {
        let status = window_status(6, 12, 5, 60);
        assert!(!status.allowed);
        assert_eq!(status.retry_after, 12);
    }

    #[test]
    fn key_without_expiry_reports_a_full_window() {
        let status = window_status(9, -1, 5, 60);
        assert!(!status.allowed);
        assert_eq!(status.retry_after, 60);
    }
}
