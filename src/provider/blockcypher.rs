use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use super::ChainLookup;
use super::get_json;
use super::join_segments;
use super::parse_base_url;
use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::model::AddressDetail;
use crate::model::TransactionLookup;

/// BlockCypher chain API, `https://api.blockcypher.com/v1/btc/main`.
#[derive(Debug, Clone)]
pub struct BlockcypherClient {
  client: Client,
  base:   Url,
  token:  Option<String>,
}

impl BlockcypherClient {
  pub const NAME: &'static str = "blockcypher";

  pub fn new(
    client: Client,
    config: &ProviderConfig,
  ) -> Result<Self, ProviderError> {
    Ok(Self {
      client,
      base: parse_base_url(Self::NAME, &config.blockcypher_url)?,
      token: config.blockcypher_token.clone(),
    })
  }

  fn resource(
    &self,
    collection: &str,
    id: &str,
  ) -> Result<Url, ProviderError> {
    let mut url = join_segments(Self::NAME, &self.base, &[collection, id])?;
    if let Some(token) = &self.token {
      url.query_pairs_mut().append_pair("token", token);
    }
    Ok(url)
  }
}

#[async_trait]
impl ChainLookup for BlockcypherClient {
  async fn address_detail(
    &self,
    address: &str,
  ) -> Result<AddressDetail, ProviderError> {
    let url = self.resource("addrs", address)?;
    get_json(&self.client, Self::NAME, url).await
  }

  async fn transaction_detail(
    &self,
    hash: &str,
  ) -> Result<TransactionLookup, ProviderError> {
    let url = self.resource("txs", hash)?;
    get_json(&self.client, Self::NAME, url).await
  }
}
