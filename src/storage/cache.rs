use async_trait::async_trait;

use crate::Result;

/// Key-value store with per-key expiry.
#[async_trait]
pub trait CacheStore: Send + Sync {
  async fn get(
    &self,
    key: &str,
  ) -> Result<Option<String>>;

  async fn set(
    &self,
    key: &str,
    value: &str,
    ttl_secs: u64,
  ) -> Result<()>;
}
