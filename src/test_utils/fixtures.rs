use reqwest::StatusCode;

use crate::error::ProviderError;
use crate::model::AddressDetail;
use crate::model::BlockchairBlock;
use crate::model::EsploraTransaction;
use crate::model::TransactionLookup;
use crate::model::transaction::EsploraInput;
use crate::model::transaction::EsploraOutput;

pub fn block(id: u64) -> BlockchairBlock {
    BlockchairBlock { id, hash: None, time: None, transaction_count: None }
}

pub fn output(address: Option<&str>) -> EsploraOutput {
    EsploraOutput { scriptpubkey_address: address.map(str::to_string), scriptpubkey_type: None, value: Some(1_000) }
}

/// `None` inputs are coinbase inputs, `None` outputs are non-standard ones.
pub fn transaction(
    txid: &str,
    inputs: &[Option<&str>],
    outputs: &[Option<&str>],
) -> EsploraTransaction {
    EsploraTransaction {
        txid: Some(txid.to_string()),
        vin:  inputs
            .iter()
            .map(|source| match source {
                Some(address) => EsploraInput { prevout: Some(output(Some(address))), is_coinbase: false },
                None => EsploraInput { prevout: None, is_coinbase: true },
            })
            .collect(),
        vout: outputs.iter().map(|address| output(*address)).collect(),
    }
}

pub fn hashes(txids: &[&str]) -> Vec<String> { txids.iter().map(|txid| txid.to_string()).collect() }

pub fn address_detail(address: &str) -> AddressDetail {
    serde_json::from_value(serde_json::json!({
        "address": address,
        "balance": 5000,
        "n_tx": 2,
        "txrefs": [{ "tx_hash": "aa", "value": 5000 }]
    }))
    .unwrap()
}

pub fn transaction_lookup(hash: &str) -> TransactionLookup {
    serde_json::from_value(serde_json::json!({
        "hash": hash,
        "block_height": 840000,
        "addresses": ["A", "B"],
        "inputs": [],
        "outputs": []
    }))
    .unwrap()
}

pub fn upstream_status(
    provider: &'static str,
    status: StatusCode,
) -> ProviderError {
    ProviderError::Status { provider, endpoint: format!("https://{}.test/resource", provider), status }
}

pub fn undecodable(provider: &'static str) -> ProviderError {
    let source = serde_json::from_str::<EsploraTransaction>("{\"vin\": 7}").unwrap_err();
    ProviderError::Decode { provider, endpoint: format!("https://{}.test/resource", provider), source }
}
