use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoragePostgresConfig {
    pub user: String,
    pub password: String,
    pub port: u16,
    pub host: String,
    pub pool_size: u32,
    pub db_name: String,
    // Without it TLS is still used when the server offers it, trusting system roots
    #[serde(default)]
    pub tls: Option<TlsConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TlsConfig {
    pub ca_path: String,
    // PKCS#12 bundle, only needed when the server asks for client certificates
    #[serde(default)]
    pub client_identity_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageRedisConfig {
    pub host: String,
    pub port: u16,
    pub pool_size: u32,
    #[serde(default)]
    pub password: Option<String>,
}

impl StorageRedisConfig {
    pub fn url(&self) -> String {
        match &self.password {
            Some(password) => format!("redis://:{}@{}:{}", urlencoding::encode(password), self.host, self.port),
            None => format!("redis://{}:{}", self.host, self.port),
        }
    }
}
