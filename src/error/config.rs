use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to open config file {path}: {reason}")]
    OpenFileError { path: String, reason: String },

    #[error("Failed to parse config file {path}: {reason}")]
    ParseError { path: String, reason: String },

    #[error("Invalid config value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}
