pub mod cache;
pub mod discovery;
pub mod log;
pub mod provider;
pub mod server;
pub mod storage;

use std::path::Path;

use serde::Deserialize;
use serde::Serialize;
use toml;

pub use cache::CacheBackend;
pub use cache::CacheConfig;
pub use discovery::DiscoveryConfig;
pub use log::LoggingConfig;
pub use provider::ProviderConfig;
pub use server::ServerConfig;
pub use storage::StoragePostgresConfig;
pub use storage::StorageRedisConfig;
pub use storage::TlsConfig;

use crate::constants::BLOCKCHAIR_MAX_LIMIT;
use crate::err_with_loc;
use crate::error::ConfigError;

pub const POSTGRES_PASSWORD_ENV: &str = "KASHIF_POSTGRES_PASSWORD";
pub const REDIS_PASSWORD_ENV: &str = "KASHIF_REDIS_PASSWORD";
pub const BLOCKCHAIR_API_KEY_ENV: &str = "KASHIF_BLOCKCHAIR_API_KEY";
pub const BLOCKCYPHER_TOKEN_ENV: &str = "KASHIF_BLOCKCYPHER_TOKEN";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub storage_postgres: StoragePostgresConfig,
    pub storage_redis: StorageRedisConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub providers: ProviderConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    pub fn from_toml_str(
        path: &str,
        raw: &str,
    ) -> crate::Result<Self> {
        let mut config: Config = toml::from_str(raw).map_err(|e| {
            err_with_loc!(ConfigError::ParseError { path: path.to_string(), reason: e.to_string() })
        })?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    // Secrets are kept out of Config.toml and read from the environment (or .env)
    pub fn apply_env_overrides(&mut self) {
        if let Ok(password) = std::env::var(POSTGRES_PASSWORD_ENV) {
            self.storage_postgres.password = password;
        }
        if let Ok(password) = std::env::var(REDIS_PASSWORD_ENV) {
            self.storage_redis.password = Some(password);
        }
        if let Ok(key) = std::env::var(BLOCKCHAIR_API_KEY_ENV) {
            self.providers.blockchair_api_key = Some(key);
        }
        if let Ok(token) = std::env::var(BLOCKCYPHER_TOKEN_ENV) {
            self.providers.blockcypher_token = Some(token);
        }
    }

    pub fn validate(&self) -> crate::Result<()> {
        let limit = self.providers.block_transactions_limit;
        if limit == 0 || limit > BLOCKCHAIR_MAX_LIMIT {
            return Err(err_with_loc!(ConfigError::InvalidValue {
                key:    "providers.block_transactions_limit",
                reason: format!("must be between 1 and {}, got {}", BLOCKCHAIR_MAX_LIMIT, limit),
            }));
        }
        if self.discovery.max_concurrent_requests == 0 {
            return Err(err_with_loc!(ConfigError::InvalidValue {
                key:    "discovery.max_concurrent_requests",
                reason: "must be at least 1".to_string(),
            }));
        }
        if self.discovery.fanout_timeout_ms == 0 || self.providers.request_timeout_ms == 0 {
            return Err(err_with_loc!(ConfigError::InvalidValue {
                key:    "timeouts",
                reason: "request and fan-out timeouts must be positive".to_string(),
            }));
        }
        Ok(())
    }
}

pub fn load_config(path: impl AsRef<Path>) -> crate::Result<Config> {
    let path = path.as_ref();
    let config_str = std::fs::read_to_string(path).map_err(|e| {
        err_with_loc!(ConfigError::OpenFileError { path: path.display().to_string(), reason: e.to_string() })
    })?;
    Config::from_toml_str(&path.display().to_string(), &config_str)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const MINIMAL: &str = r#"
        [storage_postgres]
        user = "kashif"
        password = "from-file"
        host = "localhost"
        port = 5432
        pool_size = 4
        db_name = "kashif"

        [storage_redis]
        host = "localhost"
        port = 6379
        pool_size = 4
    "#;

    #[test]
    fn minimal_config_gets_defaults() {
        let config = temp_env::with_vars_unset(
            [POSTGRES_PASSWORD_ENV, REDIS_PASSWORD_ENV, BLOCKCHAIR_API_KEY_ENV, BLOCKCYPHER_TOKEN_ENV],
            || Config::from_toml_str("Config.toml", MINIMAL).unwrap(),
        );

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.cache.backend, CacheBackend::Redis);
        assert_eq!(config.providers.block_transactions_limit, 10_000);
        assert_eq!(config.discovery.max_concurrent_requests, 8);
        assert_eq!(config.storage_postgres.password, "from-file");
        assert!(config.storage_postgres.tls.is_none());
        assert_eq!(config.storage_redis.url(), "redis://localhost:6379");
    }

    #[test]
    fn secrets_come_from_environment() {
        let config = temp_env::with_vars(
            [
                (POSTGRES_PASSWORD_ENV, Some("from-env")),
                (REDIS_PASSWORD_ENV, Some("p@ss")),
                (BLOCKCYPHER_TOKEN_ENV, Some("token-123")),
                (BLOCKCHAIR_API_KEY_ENV, None),
            ],
            || Config::from_toml_str("Config.toml", MINIMAL).unwrap(),
        );

        assert_eq!(config.storage_postgres.password, "from-env");
        assert_eq!(config.storage_redis.url(), "redis://:p%40ss@localhost:6379");
        assert_eq!(config.providers.blockcypher_token.as_deref(), Some("token-123"));
        assert_eq!(config.providers.blockchair_api_key, None);
    }

    #[test]
    fn memory_cache_backend_parses() {
        let raw = format!("{}\n[cache]\nbackend = \"memory\"\n", MINIMAL);
        let config = Config::from_toml_str("Config.toml", &raw).unwrap();
        assert_eq!(config.cache.backend, CacheBackend::Memory);
    }

    #[test]
    fn rejects_oversized_block_transactions_limit() {
        let raw = format!("{}\n[providers]\nblock_transactions_limit = 20000\n", MINIMAL);
        let err = Config::from_toml_str("Config.toml", &raw).unwrap_err();
        assert!(matches!(err.downcast_ref::<ConfigError>(), Some(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let err = load_config("does/not/exist/Config.toml").unwrap_err();
        assert!(matches!(err.downcast_ref::<ConfigError>(), Some(ConfigError::OpenFileError { .. })));
    }
}
