use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use super::TransactionSource;
use super::get_json;
use super::join_segments;
use super::parse_base_url;
use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::model::EsploraTransaction;

/// Esplora REST API (Blockstream), `GET /tx/{txid}`.
#[derive(Debug, Clone)]
pub struct EsploraClient {
  client: Client,
  base:   Url,
}

impl EsploraClient {
  pub const NAME: &'static str = "esplora";

  pub fn new(
    client: Client,
    config: &ProviderConfig,
  ) -> Result<Self, ProviderError> {
    Ok(Self { client, base: parse_base_url(Self::NAME, &config.esplora_url)? })
  }
}

#[async_trait]
impl TransactionSource for EsploraClient {
  async fn transaction(
    &self,
    txid: &str,
  ) -> Result<EsploraTransaction, ProviderError> {
    let url = join_segments(Self::NAME, &self.base, &["tx", txid])?;
    get_json(&self.client, Self::NAME, url).await
  }
}
