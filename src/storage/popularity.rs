use async_trait::async_trait;

use crate::Result;
use crate::model::SearchCount;
use crate::model::SearchSubject;

/// Per-entity search counters backing the leaderboards.
#[async_trait]
pub trait PopularityStore: Send + Sync {
  /// Creates the counter at 1 or adds 1, atomically. Returns the new count.
  async fn increment_search_count(
    &self,
    subject: SearchSubject,
    key: &str,
  ) -> Result<u64>;

  /// Highest counters first, ties by key ascending.
  async fn top(
    &self,
    subject: SearchSubject,
    limit: usize,
  ) -> Result<Vec<SearchCount>>;
}
