use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

/// BlockCypher `GET /addrs/{address}`.
///
/// Fields the service reads are typed; everything else is kept in `extra` and
/// handed back to the client untouched. Absent optionals stay absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressDetail {
  pub address:             String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub total_received:      Option<u64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub total_sent:          Option<u64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub balance:             Option<i64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub unconfirmed_balance: Option<i64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub final_balance:       Option<i64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub n_tx:                Option<u64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub final_n_tx:          Option<u64>,
  #[serde(flatten)]
  pub extra:               Map<String, Value>,
}

/// BlockCypher `GET /txs/{hash}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionLookup {
  pub hash:          String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub block_hash:    Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub block_height:  Option<i64>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub addresses:     Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub total:         Option<u64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub fees:          Option<u64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub confirmations: Option<u64>,
  #[serde(flatten)]
  pub extra:         Map<String, Value>,
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;
  use serde_json::json;

  use super::*;

  #[test]
  fn unknown_fields_survive_a_pass_through() {
    let upstream = json!({
      "address": "bc1qexample",
      "balance": 1200,
      "n_tx": 3,
      "txrefs": [{ "tx_hash": "abc", "value": 1200 }],
      "tx_url": "https://api.blockcypher.com/v1/btc/main/txs/"
    });

    let detail: AddressDetail = serde_json::from_value(upstream.clone()).unwrap();
    assert_eq!(detail.balance, Some(1200));
    assert!(detail.extra.contains_key("txrefs"));

    assert_eq!(serde_json::to_value(&detail).unwrap(), upstream);
  }

  #[test]
  fn unconfirmed_transaction_echoes_without_nulls() {
    let upstream = json!({
      "hash": "f4184fc596403b9d638783cf57adfe4c75c605f6356fbc91338530e9831e9e16",
      "block_height": -1,
      "total": 1000000000,
      "inputs": [{ "prev_hash": "0437cd7f", "output_index": 0 }],
      "double_spend": false
    });

    let lookup: TransactionLookup = serde_json::from_value(upstream.clone()).unwrap();
    assert_eq!(lookup.block_hash, None);
    assert!(lookup.addresses.is_empty());

    assert_eq!(serde_json::to_value(&lookup).unwrap(), upstream);
  }
}
