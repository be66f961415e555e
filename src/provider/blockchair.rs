use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use tracing::warn;
use url::Url;

use super::BlockSource;
use super::get_json;
use super::join_segments;
use super::parse_base_url;
use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::model::BlockchairBlock;
use crate::model::BlockchairDashboard;
use crate::model::BlockchairResponse;

/// Blockchair API. The newest block comes from the `blocks` table and the
/// block's transaction hashes from `dashboards/block/<id>`.
#[derive(Debug, Clone)]
pub struct BlockchairClient {
  client:             Client,
  base:               Url,
  api_key:            Option<String>,
  transactions_limit: usize,
}

impl BlockchairClient {
  pub const NAME: &'static str = "blockchair";

  pub fn new(
    client: Client,
    config: &ProviderConfig,
  ) -> Result<Self, ProviderError> {
    Ok(Self {
      client,
      base: parse_base_url(Self::NAME, &config.blockchair_url)?,
      api_key: config.blockchair_api_key.clone(),
      transactions_limit: config.block_transactions_limit,
    })
  }

  fn query(
    &self,
    segments: &[&str],
    params: &[(&str, String)],
  ) -> Result<Url, ProviderError> {
    let mut url = join_segments(Self::NAME, &self.base, segments)?;
    {
      let mut query = url.query_pairs_mut();
      for (name, value) in params {
        query.append_pair(name, value);
      }
      if let Some(key) = &self.api_key {
        query.append_pair("key", key);
      }
    }
    Ok(url)
  }
}

#[async_trait]
impl BlockSource for BlockchairClient {
  async fn latest_block(&self) -> Result<BlockchairBlock, ProviderError> {
    let url = self.query(&["blocks"], &[("s", "id(desc)".to_string()), ("limit", "1".to_string())])?;
    let endpoint = url.path().to_string();

    // Blockchair answers with an array even for limit=1
    let response: BlockchairResponse<BlockchairBlock> = get_json(&self.client, Self::NAME, url).await?;
    let block = response
      .data
      .into_iter()
      .next()
      .ok_or(ProviderError::Empty { provider: Self::NAME, endpoint })?;

    debug!("blockchair::latest_block::{}", block.id);
    Ok(block)
  }

  async fn block_transaction_hashes(
    &self,
    block_id: u64,
  ) -> Result<Vec<String>, ProviderError> {
    let id = block_id.to_string();
    let url = self.query(&["dashboards", "block", id.as_str()], &[("limit", self.transactions_limit.to_string())])?;
    let endpoint = url.path().to_string();

    let mut response: BlockchairDashboard = get_json(&self.client, Self::NAME, url).await?;
    let dashboard = response
      .data
      .remove(&id)
      .ok_or_else(|| ProviderError::Empty { provider: Self::NAME, endpoint: endpoint.clone() })?;

    // Every block carries at least its coinbase transaction; no hashes means the
    // block isn't indexed yet and must not be cached as an empty block
    if dashboard.transactions.is_empty() {
      return Err(ProviderError::Empty { provider: Self::NAME, endpoint });
    }

    let expected = dashboard.block.transaction_count.or(response.context.total_rows);
    if let Some(expected) = expected {
      let received = dashboard.transactions.len() as u64;
      if received < expected {
        warn!("blockchair::block_transactions_incomplete::{}::{}_of_{}", block_id, received, expected);
        return Err(ProviderError::Incomplete { provider: Self::NAME, endpoint, received, expected });
      }
    }

    debug!("blockchair::block_transactions::{}::{}", block_id, dashboard.transactions.len());
    Ok(dashboard.transactions)
  }
}
