//! Redis-backed user index cache.
//!
//! Uses a `bb8` pool of multiplexed Redis connections. Keys are written
//! without expiry.

use async_trait::async_trait;
use bb8_redis::RedisConnectionManager;
use bb8_redis::bb8::{Pool, RunError};
use bb8_redis::redis::{self, AsyncCommands, RedisError};
use tracing::{debug, info};

use crate::domain::UserId;
use crate::domain::ports::{CacheError, UserCacheKey, UserIndexCache};

/// Prefix a bare `host:port` address with the `redis://` scheme.
///
/// # Examples
/// ```
/// use userhub::outbound::cache::redis_url;
///
/// assert_eq!(redis_url("localhost:6379"), "redis://localhost:6379");
/// assert_eq!(redis_url("rediss://cache:6380"), "rediss://cache:6380");
/// ```
pub fn redis_url(addr: &str) -> String {
    if addr.contains("://") {
        addr.to_owned()
    } else {
        format!("redis://{addr}")
    }
}

/// Cache adapter storing `email -> id` entries.
#[derive(Clone)]
pub struct RedisUserIndexCache {
    pool: Pool<RedisConnectionManager>,
}

impl RedisUserIndexCache {
    /// Build a pool for `addr` and check it answers `PING`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Backend`] when the address is invalid or the
    /// server cannot be reached.
    pub async fn connect(addr: &str) -> Result<Self, CacheError> {
        let url = redis_url(addr);
        let manager = RedisConnectionManager::new(url.as_str()).map_err(map_redis_error)?;
        let pool = Pool::builder()
            .build(manager)
            .await
            .map_err(map_redis_error)?;

        let cache = Self { pool };
        cache.ping().await?;
        info!(addr, "user cache connected");
        Ok(cache)
    }

    async fn ping(&self) -> Result<(), CacheError> {
        let mut conn = self.pool.get().await.map_err(map_run_error)?;
        let _: String = redis::cmd("PING")
            .query_async(&mut *conn)
            .await
            .map_err(map_redis_error)?;
        Ok(())
    }
}

fn map_run_error(error: RunError<RedisError>) -> CacheError {
    match error {
        RunError::User(err) => map_redis_error(err),
        RunError::TimedOut => {
            debug!("user cache pool checkout timed out");
            CacheError::backend("timed out waiting for a connection")
        }
    }
}

fn map_redis_error(error: RedisError) -> CacheError {
    debug!(%error, "user cache call failed");
    if error.is_timeout()
        || error.is_connection_refusal()
        || error.is_connection_dropped()
        || error.is_io_error()
    {
        CacheError::backend(error.to_string())
    } else {
        CacheError::command(error.to_string())
    }
}

#[async_trait]
impl UserIndexCache for RedisUserIndexCache {
    async fn set(&self, key: &UserCacheKey, value: UserId) -> Result<(), CacheError> {
        let mut conn = self.pool.get().await.map_err(map_run_error)?;
        conn.set::<_, _, ()>(key.as_str(), value.get())
            .await
            .map_err(map_redis_error)
    }

    async fn del(&self, key: &UserCacheKey) -> Result<(), CacheError> {
        let mut conn = self.pool.get().await.map_err(map_run_error)?;
        conn.del::<_, ()>(key.as_str())
            .await
            .map_err(map_redis_error)
    }
}
