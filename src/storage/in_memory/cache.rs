use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::Result;
use crate::storage::CacheStore;

#[derive(Debug, Clone)]
struct CachedEntry {
  value:      String,
  expires_at: Instant,
}

impl CachedEntry {
  fn is_expired(
    &self,
    now: Instant,
  ) -> bool {
    now >= self.expires_at
  }
}

/// Process-local cache with the same expiry semantics as the Redis one.
/// Expired entries read as absent and are purged on the next write.
#[derive(Debug, Default)]
pub struct InMemoryCache {
  entries: RwLock<HashMap<String, CachedEntry>>,
}

impl InMemoryCache {
  pub fn new() -> Self { Self::default() }

  pub async fn len(&self) -> usize {
    let now = Instant::now();
    self.entries.read().await.values().filter(|entry| !entry.is_expired(now)).count()
  }

  pub async fn is_empty(&self) -> bool { self.len().await == 0 }
}

#[async_trait]
impl CacheStore for InMemoryCache {
  async fn get(
    &self,
    key: &str,
  ) -> Result<Option<String>> {
    let entries = self.entries.read().await;
    Ok(entries.get(key).filter(|entry| !entry.is_expired(Instant::now())).map(|entry| entry.value.clone()))
  }

  async fn set(
    &self,
    key: &str,
    value: &str,
    ttl_secs: u64,
  ) -> Result<()> {
    let now = Instant::now();
    let mut entries = self.entries.write().await;
    entries.retain(|_, entry| !entry.is_expired(now));
    entries.insert(key.to_string(), CachedEntry {
      value:      value.to_string(),
      expires_at: now + Duration::from_secs(ttl_secs),
    });
    Ok(())
  }
}
