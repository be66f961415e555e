use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

/// Envelope of every Blockchair `/bitcoin/<table>` query. `data` is an array
/// even when the query asks for a single row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockchairResponse<T> {
  pub data:    Vec<T>,
  #[serde(default)]
  pub context: BlockchairContext,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockchairContext {
  pub code:         Option<u16>,
  pub limit:        Option<u64>,
  pub offset:       Option<u64>,
  pub rows:         Option<u64>,
  pub total_rows:   Option<u64>,
  pub state:        Option<u64>,
  pub request_cost: Option<f64>,
  pub error:        Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockchairBlock {
  pub id:                u64,
  #[serde(default)]
  pub hash:              Option<String>,
  #[serde(default)]
  pub time:              Option<String>,
  #[serde(default)]
  pub transaction_count: Option<u64>,
}

/// `dashboards/block/<id>` keys its single entry by the requested block id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockchairDashboard {
  pub data:    HashMap<String, BlockchairBlockDashboard>,
  #[serde(default)]
  pub context: BlockchairContext,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockchairBlockDashboard {
  pub block:        BlockchairBlock,
  #[serde(default)]
  pub transactions: Vec<String>,
}
