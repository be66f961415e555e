use serde::Deserialize;
use serde::Serialize;

use crate::constants::BLOCKCHAIR_BASE_URL;
use crate::constants::BLOCKCHAIR_MAX_LIMIT;
use crate::constants::BLOCKCYPHER_BASE_URL;
use crate::constants::ESPLORA_BASE_URL;

/// Endpoints of the three upstream data sources.
///
/// * Blockchair serves the newest block and the transaction hashes of a block.
/// * Esplora (Blockstream) serves per-transaction inputs and outputs.
/// * BlockCypher serves the full address and transaction detail for lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub blockchair_url: String,
    pub blockchair_api_key: Option<String>,
    pub esplora_url: String,
    pub blockcypher_url: String,
    pub blockcypher_token: Option<String>,
    // Deadline of every single outbound request
    pub request_timeout_ms: u64,
    pub connect_timeout_ms: u64,
    // Transaction hashes requested from the Blockchair block dashboard
    pub block_transactions_limit: usize,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            blockchair_url: BLOCKCHAIR_BASE_URL.to_string(),
            blockchair_api_key: None,
            esplora_url: ESPLORA_BASE_URL.to_string(),
            blockcypher_url: BLOCKCYPHER_BASE_URL.to_string(),
            blockcypher_token: None,
            request_timeout_ms: 10_000,
            connect_timeout_ms: 3_000,
            block_transactions_limit: BLOCKCHAIR_MAX_LIMIT,
        }
    }
}
