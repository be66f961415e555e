use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use tracing::error;

use super::PostgresPool;
use crate::err_with_loc;
use crate::error::PostgresClientError;
use crate::error::Result;
use crate::model::SearchCount;
use crate::model::SearchSubject;
use crate::storage::PopularityStore;

/// Search counters in `address_searches` and `transaction_searches`.
#[derive(Debug, Clone)]
pub struct PostgresPopularityStore {
  pub pool: Arc<PostgresPool>,
}

// Table and key column per subject; both are static, never user input
fn table(subject: SearchSubject) -> (&'static str, &'static str) {
  match subject {
    SearchSubject::Address => ("address_searches", "address"),
    SearchSubject::Transaction => ("transaction_searches", "tx_hash"),
  }
}

fn increment_sql(subject: SearchSubject) -> String {
  let (table, column) = table(subject);
  format!(
    "INSERT INTO {table} ({column}, search_count, first_searched_at, last_searched_at)
     VALUES ($1, 1, NOW(), NOW())
     ON CONFLICT ({column}) DO UPDATE SET
         search_count = {table}.search_count + 1,
         last_searched_at = NOW()
     RETURNING search_count"
  )
}

fn top_sql(subject: SearchSubject) -> String {
  let (table, column) = table(subject);
  format!(
    "SELECT {column}, search_count FROM {table}
     ORDER BY search_count DESC, {column} ASC
     LIMIT $1"
  )
}

impl PostgresPopularityStore {
  pub fn new(pool: Arc<PostgresPool>) -> Self { Self { pool } }
}

#[async_trait]
impl PopularityStore for PostgresPopularityStore {
  async fn increment_search_count(
    &self,
    subject: SearchSubject,
    key: &str,
  ) -> Result<u64> {
    let conn = self.pool.get().await.map_err(|e| {
      error!("failed_to_get_client_pool_connection: {}", e);
      err_with_loc!(PostgresClientError::PoolError(e))
    })?;

    let row = conn.query_one(increment_sql(subject).as_str(), &[&key]).await.map_err(|e| {
      error!("failed_to_increment_search_count::{}::{}: {}", subject, key, e);
      err_with_loc!(PostgresClientError::QueryError(format!("failed_to_increment_search_count: {}", e)))
    })?;

    let count: i64 = row.get(0);
    debug!("increment_search_count::{}::{}::{}", subject, key, count);
    Ok(count.max(0) as u64)
  }

  async fn top(
    &self,
    subject: SearchSubject,
    limit: usize,
  ) -> Result<Vec<SearchCount>> {
    let conn = self.pool.get().await.map_err(|e| {
      error!("failed_to_get_client_pool_connection: {}", e);
      err_with_loc!(PostgresClientError::PoolError(e))
    })?;

    let limit = limit as i64;
    let rows = conn.query(top_sql(subject).as_str(), &[&limit]).await.map_err(|e| {
      error!("failed_to_query_top_searches::{}: {}", subject, e);
      err_with_loc!(PostgresClientError::QueryError(format!("failed_to_query_top_searches: {}", e)))
    })?;

    Ok(
      rows
        .iter()
        .map(|row| SearchCount { key: row.get(0), search_count: row.get::<_, i64>(1).max(0) as u64 })
        .collect(),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn increment_is_a_single_upsert_statement() {
    let sql = increment_sql(SearchSubject::Transaction);
    assert!(sql.contains("INSERT INTO transaction_searches (tx_hash,"));
    assert!(sql.contains("ON CONFLICT (tx_hash) DO UPDATE"));
    assert!(sql.contains("search_count = transaction_searches.search_count + 1"));
    assert!(sql.trim_end().ends_with("RETURNING search_count"));
  }

  #[test]
  fn top_breaks_ties_by_key() {
    let sql = top_sql(SearchSubject::Address);
    assert!(sql.contains("FROM address_searches"));
    assert!(sql.contains("ORDER BY search_count DESC, address ASC"));
  }
}
