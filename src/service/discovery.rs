use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use futures::TryStreamExt;
use futures::stream;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::instrument;

use crate::config::DiscoveryConfig;
use crate::constants::ADDRESSES_CACHE_KEY;
use crate::constants::ADDRESSES_CACHE_TTL_SECS;
use crate::err_with_loc;
use crate::error::DiscoveryError;
use crate::error::ProviderError;
use crate::error::Result;
use crate::model::EsploraTransaction;
use crate::provider::BlockSource;
use crate::provider::TransactionSource;
use crate::storage::CacheStore;

/// Addresses active in the most recent block.
///
/// A cache hit answers without any upstream call. On a miss the block, its
/// transaction hashes and every transaction are fetched; the deduplicated
/// address list is cached for [`ADDRESSES_CACHE_TTL_SECS`]. Any failure aborts
/// the whole refresh and leaves the cache untouched.
pub struct RecentAddressDiscovery {
  cache:        Arc<dyn CacheStore>,
  blocks:       Arc<dyn BlockSource>,
  transactions: Arc<dyn TransactionSource>,
  config:       DiscoveryConfig,
  // One fan-out at a time; waiters re-read the cache once it is filled
  refresh:      Mutex<()>,
}

impl RecentAddressDiscovery {
  pub fn new(
    cache: Arc<dyn CacheStore>,
    blocks: Arc<dyn BlockSource>,
    transactions: Arc<dyn TransactionSource>,
    config: DiscoveryConfig,
  ) -> Self {
    Self { cache, blocks, transactions, config, refresh: Mutex::new(()) }
  }

  #[instrument(level = "debug", skip(self))]
  pub async fn discover_recent_addresses(&self) -> Result<Vec<String>> {
    if let Some(addresses) = self.cached_addresses().await? {
      debug!("discovery::cache_hit::{}_addresses", addresses.len());
      return Ok(addresses);
    }

    let _refresh = self.refresh.lock().await;

    if let Some(addresses) = self.cached_addresses().await? {
      debug!("discovery::cache_filled_while_waiting::{}_addresses", addresses.len());
      return Ok(addresses);
    }

    let deadline = Duration::from_millis(self.config.fanout_timeout_ms);
    match timeout(deadline, self.refresh_addresses()).await {
      Ok(result) => result,
      Err(_) => {
        error!("discovery::deadline_exceeded::{:?}", deadline);
        Err(err_with_loc!(DiscoveryError::DeadlineExceeded(deadline)))
      },
    }
  }

  async fn cached_addresses(&self) -> Result<Option<Vec<String>>> {
    let raw = self.cache.get(ADDRESSES_CACHE_KEY).await.map_err(|e| {
      error!("discovery::cache_read_failed::{}: {:#}", ADDRESSES_CACHE_KEY, e);
      err_with_loc!(DiscoveryError::CacheRead(e.root_cause().to_string()))
    })?;

    let Some(raw) = raw else {
      return Ok(None);
    };

    let addresses = serde_json::from_str::<Vec<String>>(&raw).map_err(|e| {
      error!("discovery::cached_value_undecodable::{}: {}", ADDRESSES_CACHE_KEY, e);
      err_with_loc!(DiscoveryError::CacheRead(format!("cached value is not a list of addresses: {}", e)))
    })?;

    Ok(Some(addresses))
  }

  async fn refresh_addresses(&self) -> Result<Vec<String>> {
    let block = self.blocks.latest_block().await.map_err(|e| {
      error!("discovery::latest_block_failed: {}", e);
      err_with_loc!(DiscoveryError::BlockFetch(e.to_string()))
    })?;

    let hashes = self.blocks.block_transaction_hashes(block.id).await.map_err(|e| {
      error!("discovery::block_transactions_failed::{}: {}", block.id, e);
      err_with_loc!(DiscoveryError::BlockFetch(e.to_string()))
    })?;

    info!("discovery::fan_out::block_{}::{}_transactions", block.id, hashes.len());

    let addresses = self.collect_addresses(hashes).await?;
    let addresses: Vec<String> = addresses.into_iter().collect();

    let encoded = serde_json::to_string(&addresses).map_err(|e| {
      error!("discovery::encode_failed: {}", e);
      err_with_loc!(DiscoveryError::CacheWrite(e.to_string()))
    })?;

    self.cache.set(ADDRESSES_CACHE_KEY, &encoded, ADDRESSES_CACHE_TTL_SECS).await.map_err(|e| {
      error!("discovery::cache_write_failed::{}: {:#}", ADDRESSES_CACHE_KEY, e);
      err_with_loc!(DiscoveryError::CacheWrite(e.root_cause().to_string()))
    })?;

    info!("discovery::cached::block_{}::{}_addresses", block.id, addresses.len());
    Ok(addresses)
  }

  // Fails on the first transaction error; requests still in flight are dropped
  async fn collect_addresses(
    &self,
    hashes: Vec<String>,
  ) -> Result<BTreeSet<String>> {
    let transactions = self.transactions.clone();

    let addresses = stream::iter(hashes)
      .map(|txid| {
        let transactions = transactions.clone();
        async move {
          let result = transactions.transaction(&txid).await;
          result.map_err(|e| transaction_error(txid, e))
        }
      })
      .buffer_unordered(self.config.max_concurrent_requests.max(1))
      .try_fold(BTreeSet::new(), |mut addresses, transaction: EsploraTransaction| async move {
        addresses.extend(transaction.addresses().map(str::to_string));
        Ok(addresses)
      })
      .await?;

    Ok(addresses)
  }
}

fn transaction_error(
  txid: String,
  err: ProviderError,
) -> anyhow::Error {
  error!("discovery::transaction_failed::{}: {}", txid, err);
  if err.is_decode() {
    err_with_loc!(DiscoveryError::AddressExtraction { txid, reason: err.to_string() })
  } else {
    err_with_loc!(DiscoveryError::TransactionFetch { txid, reason: err.to_string() })
  }
}
