pub mod cache;
pub mod in_memory;
pub mod migration;
pub mod popularity;
pub mod postgres;
pub mod redis;

use std::sync::Arc;

use anyhow::Result;
use postgres::PostgresClient;
use tracing::info;
use tracing::instrument;

pub use cache::CacheStore;
pub use popularity::PopularityStore;

use crate::config::CacheBackend;
use crate::config::Config;
use crate::storage::in_memory::InMemoryCache;
use crate::storage::migration::Migrator;
use crate::storage::postgres::make_postgres_client;
use crate::storage::redis::make_redis_cache;

#[derive(Clone)]
pub struct StorageEngine {
  pub postgres: Arc<PostgresClient>,
  pub cache:    Arc<dyn CacheStore>,
}

impl StorageEngine {
  pub fn new(
    postgres: Arc<PostgresClient>,
    cache: Arc<dyn CacheStore>,
  ) -> Self {
    Self { postgres, cache }
  }

  pub fn popularity(&self) -> Arc<dyn PopularityStore> { self.postgres.popularity.clone() }

  // Run migrations on the storage engine
  pub async fn run_migrations(&self) -> Result<i64> {
    let migrator = Migrator::new(self.postgres.pool.clone());
    migrator.run_migrations().await
  }
}

#[instrument(level = "info", skip(config))]
pub async fn make_storage_engine(
  engine_name: &str,
  config: &Config,
) -> Result<StorageEngine> {
  let postgres = make_postgres_client(engine_name, &config.storage_postgres).await?;
  info!("postgres::created");

  let cache: Arc<dyn CacheStore> = match config.cache.backend {
    CacheBackend::Redis => {
      let redis = make_redis_cache(engine_name, &config.storage_redis).await?;
      info!("redis::created");
      redis
    },
    CacheBackend::Memory => {
      info!("cache::in_memory");
      Arc::new(InMemoryCache::new())
    },
  };

  let storage = StorageEngine::new(postgres, cache);

  let version = storage.run_migrations().await?;
  info!("migrations::completed::schema_v{}", version);

  Ok(storage)
}

/// Applies pending migrations without building the rest of the engine.
pub async fn run_database_migrations(
  engine_name: &str,
  config: &Config,
) -> Result<()> {
  let postgres = make_postgres_client(engine_name, &config.storage_postgres).await?;
  let version = Migrator::new(postgres.pool.clone()).run_migrations().await?;
  info!("{}::migrations::completed::schema_v{}", engine_name, version);
  Ok(())
}
