/// ======================= Recent address cache =======================
pub const ADDRESSES_CACHE_KEY: &str = "addresses";
/// 15 minutes
pub const ADDRESSES_CACHE_TTL_SECS: u64 = 60 * 15;

/// ======================= Leaderboard =======================
pub const LEADERBOARD_SIZE: usize = 5;

/// ======================= Providers =======================
pub const BLOCKCHAIR_BASE_URL: &str = "https://api.blockchair.com/bitcoin";
pub const ESPLORA_BASE_URL: &str = "https://blockstream.info/api";
pub const BLOCKCYPHER_BASE_URL: &str = "https://api.blockcypher.com/v1/btc/main";

/// Blockchair caps the transactions listed by a block dashboard at 10,000
pub const BLOCKCHAIR_MAX_LIMIT: usize = 10_000;

pub const USER_AGENT: &str = concat!("kashif/", env!("CARGO_PKG_VERSION"));
