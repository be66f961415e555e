use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    // Transaction detail requests allowed in flight at once
    pub max_concurrent_requests: usize,
    // Deadline of the whole fan-out, from the latest block call to the cache write
    pub fanout_timeout_ms: u64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            max_concurrent_requests: 8,
            fanout_timeout_ms: 120_000,
        }
    }
}
