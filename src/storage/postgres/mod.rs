pub mod popularity;

use std::fs::File;
use std::io::Read;
use std::sync::Arc;

use bb8::Pool;
use bb8_postgres::PostgresConnectionManager;
use native_tls::Certificate;
use native_tls::Identity;
use native_tls::TlsConnector;
use postgres_native_tls::MakeTlsConnector;
use tokio_postgres::Config;
use tracing::error;
use tracing::info;
use tracing::instrument;

pub use popularity::PostgresPopularityStore;

use crate::config::StoragePostgresConfig;
use crate::config::TlsConfig;
use crate::err_with_loc;
use crate::error::PostgresClientError;
use crate::error::Result;

pub type PostgresPool = Pool<PostgresConnectionManager<MakeTlsConnector>>;

#[derive(Debug, Clone)]
pub struct PostgresClient {
  pub pool:       Arc<PostgresPool>,
  pub popularity: Arc<PostgresPopularityStore>,
}

#[instrument(level = "debug", skip(config))]
pub async fn make_postgres_client(
  engine_name: &str,
  config: &StoragePostgresConfig,
) -> Result<Arc<PostgresClient>> {
  let mut db_config = Config::new();
  db_config
    .user(&config.user)
    .password(&config.password)
    .host(&config.host)
    .port(config.port)
    .dbname(&config.db_name);

  let connector = make_tls_connector(config.tls.as_ref())?;

  let mgr = PostgresConnectionManager::new(db_config, connector);

  let pool = Pool::builder().max_size(config.pool_size).build(mgr).await.map_err(|e| {
    error!("failed_to_build_pool: {}", e);
    err_with_loc!(PostgresClientError::ConnectionError(e))
  })?;

  let pool = Arc::new(pool);

  info!("{}::postgres::connection_established", engine_name);

  let popularity = Arc::new(PostgresPopularityStore::new(pool.clone()));

  Ok(Arc::new(PostgresClient { pool, popularity }))
}

// Without a TLS section the connector still negotiates TLS when the server
// offers it (sslmode=prefer), trusting the system roots.
fn make_tls_connector(tls: Option<&TlsConfig>) -> Result<MakeTlsConnector> {
  let mut builder = TlsConnector::builder();

  if let Some(tls) = tls {
    let ca_data = read_file(&tls.ca_path, "root_ca")?;
    let certificate = Certificate::from_pem(&ca_data).map_err(|e| {
      error!("failed_to_parse_root_ca_file: {}", e);
      err_with_loc!(PostgresClientError::TlsError(format!("failed_to_parse_root_ca_file: {}", e)))
    })?;
    builder.add_root_certificate(certificate);

    if let Some(identity_path) = &tls.client_identity_path {
      let identity_data = read_file(identity_path, "identity")?;
      let identity = Identity::from_pkcs12(&identity_data, "").map_err(|e| {
        error!("invalid_identity_file: {}", e);
        err_with_loc!(PostgresClientError::TlsError(format!("invalid_identity_file: {}", e)))
      })?;
      builder.identity(identity);
    }
  }

  let tls = builder.build().map_err(|e| {
    error!("failed_to_build_tls_connector: {}", e);
    err_with_loc!(PostgresClientError::TlsError(format!("failed_to_build_tls_connector: {}", e)))
  })?;

  Ok(MakeTlsConnector::new(tls))
}

fn read_file(
  path: &str,
  what: &str,
) -> Result<Vec<u8>> {
  let mut file = File::open(path).map_err(|e| {
    error!("failed_to_open_{}_file::{}: {}", what, path, e);
    err_with_loc!(PostgresClientError::TlsError(format!("failed_to_open_{}_file: {}", what, e)))
  })?;

  let mut data = vec![];
  file.read_to_end(&mut data).map_err(|e| {
    error!("failed_to_read_{}_file::{}: {}", what, path, e);
    err_with_loc!(PostgresClientError::TlsError(format!("failed_to_read_{}_file: {}", what, e)))
  })?;

  Ok(data)
}
