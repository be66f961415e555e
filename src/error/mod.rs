pub mod api;
pub mod config;
pub mod discovery;
pub mod engine;
pub mod popularity;
pub mod postgres;
pub mod provider;
pub mod redis;

pub use anyhow::anyhow;
pub use anyhow::Context;
pub use anyhow::Error;
pub use anyhow::Result;
pub use api::ApiError;
pub use config::ConfigError;
pub use discovery::DiscoveryError;
pub use engine::EngineError;
pub use popularity::PopularityError;
pub use postgres::PostgresClientError;
pub use provider::ProviderError;
pub use redis::RedisClientError;

// For consistent error handling with location info
#[macro_export]
macro_rules! err_with_loc {
  ($err:expr) => {
    anyhow::anyhow!($err).context(format!("at {}:{}", file!(), line!()))
  };
}
