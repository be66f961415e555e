use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::Result;
use crate::model::SearchCount;
use crate::model::SearchSubject;
use crate::storage::PopularityStore;

#[derive(Debug, Default)]
pub struct InMemoryPopularityStore {
  counters: Mutex<HashMap<(SearchSubject, String), u64>>,
}

impl InMemoryPopularityStore {
  pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl PopularityStore for InMemoryPopularityStore {
  async fn increment_search_count(
    &self,
    subject: SearchSubject,
    key: &str,
  ) -> Result<u64> {
    let mut counters = self.counters.lock().await;
    let count = counters.entry((subject, key.to_string())).or_insert(0);
    *count += 1;
    Ok(*count)
  }

  async fn top(
    &self,
    subject: SearchSubject,
    limit: usize,
  ) -> Result<Vec<SearchCount>> {
    let counters = self.counters.lock().await;
    let mut rows: Vec<SearchCount> = counters
      .iter()
      .filter(|((s, _), _)| *s == subject)
      .map(|((_, key), count)| SearchCount { key: key.clone(), search_count: *count })
      .collect();

    rows.sort_by(|a, b| b.search_count.cmp(&a.search_count).then_with(|| a.key.cmp(&b.key)));
    rows.truncate(limit);
    Ok(rows)
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use pretty_assertions::assert_eq;

  use super::*;

  #[tokio::test]
  async fn counters_are_separate_per_subject() {
    let store = InMemoryPopularityStore::new();
    assert_eq!(store.increment_search_count(SearchSubject::Address, "ab").await.unwrap(), 1);
    assert_eq!(store.increment_search_count(SearchSubject::Address, "ab").await.unwrap(), 2);
    assert_eq!(store.increment_search_count(SearchSubject::Transaction, "ab").await.unwrap(), 1);
  }

  #[tokio::test]
  async fn ties_are_ordered_by_key() {
    let store = InMemoryPopularityStore::new();
    for key in ["c", "a", "b", "b"] {
      store.increment_search_count(SearchSubject::Address, key).await.unwrap();
    }

    let top = store.top(SearchSubject::Address, 5).await.unwrap();
    let keys: Vec<&str> = top.iter().map(|row| row.key.as_str()).collect();
    assert_eq!(keys, vec!["b", "a", "c"]);
  }

  #[tokio::test]
  async fn concurrent_increments_are_not_lost() {
    let store = Arc::new(InMemoryPopularityStore::new());
    let handles: Vec<_> = (0..50)
      .map(|_| {
        let store = store.clone();
        tokio::spawn(async move { store.increment_search_count(SearchSubject::Transaction, "hot").await })
      })
      .collect();
    for handle in handles {
      handle.await.unwrap().unwrap();
    }

    let top = store.top(SearchSubject::Transaction, 1).await.unwrap();
    assert_eq!(top, vec![SearchCount { key: "hot".to_string(), search_count: 50 }]);
  }
}
