use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// What a search counter is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchSubject {
  Address,
  Transaction,
}

impl fmt::Display for SearchSubject {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      SearchSubject::Address => write!(f, "address"),
      SearchSubject::Transaction => write!(f, "transaction"),
    }
  }
}

/// A search counter as stored, keyed by address or transaction hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCount {
  pub key:          String,
  pub search_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopAddress {
  pub address:      String,
  pub search_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopTransaction {
  pub tx_hash:      String,
  pub search_count: u64,
}

impl From<SearchCount> for TopAddress {
  fn from(count: SearchCount) -> Self { TopAddress { address: count.key, search_count: count.search_count } }
}

impl From<SearchCount> for TopTransaction {
  fn from(count: SearchCount) -> Self { TopTransaction { tx_hash: count.key, search_count: count.search_count } }
}
