pub mod blockchair;
pub mod blockcypher;
pub mod esplora;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use tracing::warn;
use url::Url;

pub use blockchair::BlockchairClient;
pub use blockcypher::BlockcypherClient;
pub use esplora::EsploraClient;

use crate::config::ProviderConfig;
use crate::constants::USER_AGENT;
use crate::err_with_loc;
use crate::error::ProviderError;
use crate::model::AddressDetail;
use crate::model::BlockchairBlock;
use crate::model::EsploraTransaction;
use crate::model::TransactionLookup;

/// Newest block and the transactions it contains.
#[async_trait]
pub trait BlockSource: Send + Sync {
  async fn latest_block(&self) -> Result<BlockchairBlock, ProviderError>;
  async fn block_transaction_hashes(
    &self,
    block_id: u64,
  ) -> Result<Vec<String>, ProviderError>;
}

/// Inputs and outputs of a single transaction.
#[async_trait]
pub trait TransactionSource: Send + Sync {
  async fn transaction(
    &self,
    txid: &str,
  ) -> Result<EsploraTransaction, ProviderError>;
}

/// Full detail for user driven address and transaction lookups.
#[async_trait]
pub trait ChainLookup: Send + Sync {
  async fn address_detail(
    &self,
    address: &str,
  ) -> Result<AddressDetail, ProviderError>;
  async fn transaction_detail(
    &self,
    hash: &str,
  ) -> Result<TransactionLookup, ProviderError>;
}

#[derive(Clone)]
pub struct Providers {
  pub blocks:       Arc<dyn BlockSource>,
  pub transactions: Arc<dyn TransactionSource>,
  pub lookup:       Arc<dyn ChainLookup>,
}

pub fn make_providers(config: &ProviderConfig) -> crate::Result<Providers> {
  let client = make_http_client(config)?;

  let blocks = BlockchairClient::new(client.clone(), config).map_err(|e| err_with_loc!(e))?;
  let transactions = EsploraClient::new(client.clone(), config).map_err(|e| err_with_loc!(e))?;
  let lookup = BlockcypherClient::new(client, config).map_err(|e| err_with_loc!(e))?;

  Ok(Providers { blocks: Arc::new(blocks), transactions: Arc::new(transactions), lookup: Arc::new(lookup) })
}

pub fn make_http_client(config: &ProviderConfig) -> crate::Result<Client> {
  Client::builder()
    .user_agent(USER_AGENT)
    .timeout(Duration::from_millis(config.request_timeout_ms))
    .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
    .build()
    .map_err(|e| err_with_loc!(format!("failed_to_build_http_client: {}", e)))
}

pub(crate) fn parse_base_url(
  provider: &'static str,
  raw: &str,
) -> Result<Url, ProviderError> {
  let url = Url::parse(raw).map_err(|e| ProviderError::InvalidUrl {
    provider,
    url: raw.to_string(),
    reason: e.to_string(),
  })?;
  if url.cannot_be_a_base() {
    return Err(ProviderError::InvalidUrl { provider, url: raw.to_string(), reason: "cannot be a base".to_string() });
  }
  Ok(url)
}

// Segments are percent-encoded, so user input can't escape the path
pub(crate) fn join_segments(
  provider: &'static str,
  base: &Url,
  segments: &[&str],
) -> Result<Url, ProviderError> {
  let mut url = base.clone();
  url
    .path_segments_mut()
    .map_err(|_| ProviderError::InvalidUrl {
      provider,
      url: base.to_string(),
      reason: "cannot be a base".to_string(),
    })?
    .pop_if_empty()
    .extend(segments);
  Ok(url)
}

pub(crate) async fn get_json<T: DeserializeOwned>(
  client: &Client,
  provider: &'static str,
  url: Url,
) -> Result<T, ProviderError> {
  let endpoint = redact(&url);

  let response = client.get(url).send().await.map_err(|e| request_error(provider, &endpoint, e))?;

  let status = response.status();
  if !status.is_success() {
    warn!("{}::request_failed::{}::{}", provider, endpoint, status);
    return Err(ProviderError::Status { provider, endpoint, status });
  }

  let body = response.bytes().await.map_err(|e| request_error(provider, &endpoint, e))?;
  debug!("{}::response::{}::{}_bytes", provider, endpoint, body.len());

  serde_json::from_slice(&body).map_err(|source| {
    warn!("{}::decode_failed::{}::{}", provider, endpoint, source);
    ProviderError::Decode { provider, endpoint, source }
  })
}

fn request_error(
  provider: &'static str,
  endpoint: &str,
  source: reqwest::Error,
) -> ProviderError {
  warn!("{}::request_error::{}::{}", provider, endpoint, source);
  if source.is_timeout() {
    ProviderError::Timeout { provider, endpoint: endpoint.to_string() }
  } else {
    ProviderError::Request { provider, endpoint: endpoint.to_string(), source }
  }
}

// API keys travel in the query string and must not end up in logs or responses
fn redact(url: &Url) -> String {
  let mut redacted = url.clone();
  redacted.set_query(None);
  redacted.to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn joins_segments_onto_a_base_with_a_path() {
    let base = parse_base_url("esplora", "https://blockstream.info/api/").unwrap();
    let url = join_segments("esplora", &base, &["tx", "abc"]).unwrap();
    assert_eq!(url.as_str(), "https://blockstream.info/api/tx/abc");
  }

  #[test]
  fn user_input_is_escaped_inside_its_segment() {
    let base = parse_base_url("blockcypher", "https://api.blockcypher.com/v1/btc/main").unwrap();
    let url = join_segments("blockcypher", &base, &["addrs", "../../eth"]).unwrap();
    assert_eq!(url.as_str(), "https://api.blockcypher.com/v1/btc/main/addrs/..%2F..%2Feth");
  }

  #[test]
  fn redacts_query_string() {
    let url = Url::parse("https://api.blockchair.com/bitcoin/blocks?limit=1&key=secret").unwrap();
    assert_eq!(redact(&url), "https://api.blockchair.com/bitcoin/blocks");
  }

  #[test]
  fn rejects_non_base_urls() {
    assert!(matches!(parse_base_url("esplora", "mailto:ops@example.com"), Err(ProviderError::InvalidUrl { .. })));
    assert!(matches!(parse_base_url("esplora", "not a url"), Err(ProviderError::InvalidUrl { .. })));
  }
}
