pub mod kv;

use std::sync::Arc;

use bb8::Pool;
use bb8_redis::RedisConnectionManager;
use tracing::error;
use tracing::info;
use tracing::instrument;

pub use kv::RedisKv;

use crate::Result;
use crate::config::StorageRedisConfig;
use crate::err_with_loc;
use crate::error::RedisClientError;

pub type RedisPool = Arc<Pool<RedisConnectionManager>>;

#[instrument(level = "debug", skip(config))]
pub async fn make_redis_pool(
  engine_name: &str,
  config: &StorageRedisConfig,
) -> Result<RedisPool> {
  let manager = RedisConnectionManager::new(config.url()).map_err(|e| {
    error!("failed_to_create_redis_connection_manager: {}", e);
    err_with_loc!(RedisClientError::CreateConnectionManagerError(e))
  })?;

  let pool = Pool::builder().max_size(config.pool_size).build(manager).await.map_err(|e| {
    error!("failed_to_build_redis_pool: {}", e);
    err_with_loc!(RedisClientError::PoolError(e))
  })?;

  info!("{}::redis::connection_established::{}:{}", engine_name, config.host, config.port);
  Ok(Arc::new(pool))
}

pub async fn make_redis_cache(
  engine_name: &str,
  config: &StorageRedisConfig,
) -> Result<Arc<RedisKv>> {
  let pool = make_redis_pool(engine_name, config).await?;
  let kv = RedisKv::new(pool);
  kv.ping().await?;
  Ok(Arc::new(kv))
}
