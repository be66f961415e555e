use std::sync::Arc;

use tracing::error;
use tracing::info;
use tracing::instrument;

use crate::err_with_loc;
use crate::error::PopularityError;
use crate::error::Result;
use crate::model::AddressDetail;
use crate::model::SearchSubject;
use crate::model::TransactionLookup;
use crate::provider::ChainLookup;
use crate::storage::PopularityStore;

/// Provider payload plus the result of bumping its search counter.
#[derive(Debug)]
pub struct LookupOutcome<T> {
  pub detail:       T,
  pub search_count: Result<u64>,
}

impl<T> LookupOutcome<T> {
  /// Fails when the counter update failed, dropping the payload.
  pub fn into_result(self) -> Result<T> {
    self.search_count?;
    Ok(self.detail)
  }
}

pub struct LookupService {
  lookup:     Arc<dyn ChainLookup>,
  popularity: Arc<dyn PopularityStore>,
}

impl LookupService {
  pub fn new(
    lookup: Arc<dyn ChainLookup>,
    popularity: Arc<dyn PopularityStore>,
  ) -> Self {
    Self { lookup, popularity }
  }

  #[instrument(level = "debug", skip(self))]
  pub async fn lookup_address(
    &self,
    address: &str,
  ) -> Result<LookupOutcome<AddressDetail>> {
    let detail = self.lookup.address_detail(address).await.map_err(|e| {
      error!("lookup::address_failed::{}: {}", address, e);
      err_with_loc!(e)
    })?;

    let search_count = self.record_search(SearchSubject::Address, address).await;
    Ok(LookupOutcome { detail, search_count })
  }

  #[instrument(level = "debug", skip(self))]
  pub async fn lookup_transaction(
    &self,
    hash: &str,
  ) -> Result<LookupOutcome<TransactionLookup>> {
    let detail = self.lookup.transaction_detail(hash).await.map_err(|e| {
      error!("lookup::transaction_failed::{}: {}", hash, e);
      err_with_loc!(e)
    })?;

    let search_count = self.record_search(SearchSubject::Transaction, hash).await;
    Ok(LookupOutcome { detail, search_count })
  }

  async fn record_search(
    &self,
    subject: SearchSubject,
    key: &str,
  ) -> Result<u64> {
    match self.popularity.increment_search_count(subject, key).await {
      Ok(count) => {
        info!("lookup::searched::{}::{}::{}", subject, key, count);
        Ok(count)
      },
      Err(e) => {
        error!("lookup::search_count_failed::{}::{}: {:#}", subject, key, e);
        Err(err_with_loc!(PopularityError::Increment {
          subject,
          key: key.to_string(),
          reason: e.root_cause().to_string(),
        }))
      },
    }
  }
}
