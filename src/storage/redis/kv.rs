use async_trait::async_trait;
use bb8::PooledConnection;
use bb8_redis::RedisConnectionManager;
use bb8_redis::redis;
use tracing::debug;
use tracing::error;

use crate::Result;
use crate::err_with_loc;
use crate::error::RedisClientError;
use crate::storage::CacheStore;
use crate::storage::redis::RedisPool;

#[derive(Debug, Clone)]
pub struct RedisKv {
  pub pool: RedisPool,
}

impl RedisKv {
  pub fn new(pool: RedisPool) -> Self { Self { pool } }

  pub async fn get_connection(&self) -> Result<PooledConnection<'_, RedisConnectionManager>> {
    self.pool.get().await.map_err(|e| {
      error!("failed_to_get_redis_connection: {}", e);
      err_with_loc!(RedisClientError::GetConnectionError(e))
    })
  }

  pub async fn ping(&self) -> Result<()> {
    let mut conn = self.get_connection().await?;
    let _: String = redis::cmd("PING").query_async(&mut *conn).await.map_err(|e| {
      error!("redis_ping_failed: {}", e);
      err_with_loc!(RedisClientError::RedisError(e))
    })?;
    Ok(())
  }
}

#[async_trait]
impl CacheStore for RedisKv {
  async fn get(
    &self,
    key: &str,
  ) -> Result<Option<String>> {
    let mut conn = self.get_connection().await?;

    let value: Option<String> = redis::cmd("GET").arg(key).query_async(&mut *conn).await.map_err(|e| {
      error!("redis_get_failed::{}: {}", key, e);
      err_with_loc!(RedisClientError::RedisError(e))
    })?;

    debug!("redis_get_done::{}::hit={}", key, value.is_some());
    Ok(value)
  }

  async fn set(
    &self,
    key: &str,
    value: &str,
    ttl_secs: u64,
  ) -> Result<()> {
    let mut conn = self.get_connection().await?;

    let _: () = redis::cmd("SET")
      .arg(key)
      .arg(value)
      .arg("EX")
      .arg(ttl_secs)
      .query_async(&mut *conn)
      .await
      .map_err(|e| {
        error!("redis_set_failed::{}: {}", key, e);
        err_with_loc!(RedisClientError::RedisError(e))
      })?;

    debug!("redis_set_done::{}::ttl={}", key, ttl_secs);
    Ok(())
  }
}
