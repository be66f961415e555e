use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Failed to setup tracing: {0}")]
    SetupTracingError(String),
    #[error("Failed to bind {address}: {reason}")]
    BindError { address: String, reason: String },
    #[error("Server error: {0}")]
    ServerError(String),
}
