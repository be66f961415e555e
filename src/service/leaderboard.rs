use std::sync::Arc;

use tracing::debug;
use tracing::error;

use crate::constants::LEADERBOARD_SIZE;
use crate::err_with_loc;
use crate::error::PopularityError;
use crate::error::Result;
use crate::model::SearchCount;
use crate::model::SearchSubject;
use crate::model::TopAddress;
use crate::model::TopTransaction;
use crate::storage::PopularityStore;

/// Most searched addresses and transactions.
pub struct LeaderboardService {
  popularity: Arc<dyn PopularityStore>,
}

impl LeaderboardService {
  pub fn new(popularity: Arc<dyn PopularityStore>) -> Self { Self { popularity } }

  pub async fn top_addresses(&self) -> Result<Vec<TopAddress>> {
    Ok(self.top(SearchSubject::Address).await?.into_iter().map(TopAddress::from).collect())
  }

  pub async fn top_transactions(&self) -> Result<Vec<TopTransaction>> {
    Ok(self.top(SearchSubject::Transaction).await?.into_iter().map(TopTransaction::from).collect())
  }

  async fn top(
    &self,
    subject: SearchSubject,
  ) -> Result<Vec<SearchCount>> {
    let mut counts = self.popularity.top(subject, LEADERBOARD_SIZE).await.map_err(|e| {
      error!("leaderboard::read_failed::{}: {:#}", subject, e);
      err_with_loc!(PopularityError::Top { subject, reason: e.root_cause().to_string() })
    })?;

    counts.truncate(LEADERBOARD_SIZE);
    debug!("leaderboard::{}::{}_entries", subject, counts.len());
    Ok(counts)
  }
}
