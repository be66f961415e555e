use std::time::Duration;

use thiserror::Error;

/// Faults of the recent-address discovery. Every variant aborts the whole
/// operation; nothing is cached when one is raised after a cache miss.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("[Discovery] Failed to read cached addresses: {0}")]
    CacheRead(String),

    #[error("[Discovery] Failed to fetch transactions of the most recent block: {0}")]
    BlockFetch(String),

    #[error("[Discovery] Failed to fetch transaction {txid}: {reason}")]
    TransactionFetch { txid: String, reason: String },

    #[error("[Discovery] Failed to extract addresses from transaction {txid}: {reason}")]
    AddressExtraction { txid: String, reason: String },

    #[error("[Discovery] Failed to store addresses in cache: {0}")]
    CacheWrite(String),

    #[error("[Discovery] Fan-out did not complete within {0:?}")]
    DeadlineExceeded(Duration),
}
