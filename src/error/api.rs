use actix_web::HttpResponse;
use actix_web::ResponseError;
use actix_web::http::StatusCode;
use serde_json::json;
use thiserror::Error;

use crate::error::DiscoveryError;
use crate::error::PopularityError;
use crate::error::ProviderError;

/// Error surfaced at the HTTP boundary. Everything is an internal error
/// except upstream 4xx answers of the lookup provider, which keep their status.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Internal(String),

    #[error("{message}")]
    Upstream { status: StatusCode, message: String },
}

impl ApiError {
    pub fn internal(err: &anyhow::Error) -> Self { ApiError::Internal(describe(err)) }

    pub fn from_lookup(err: &anyhow::Error) -> Self {
        let upstream_status = err
            .downcast_ref::<ProviderError>()
            .and_then(ProviderError::status)
            .filter(|status| status.is_client_error())
            .and_then(|status| StatusCode::from_u16(status.as_u16()).ok());

        match upstream_status {
            Some(status) => ApiError::Upstream { status, message: describe(err) },
            None => ApiError::internal(err),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Upstream { status, .. } => *status,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

// Location contexts sit on top of the chain, so look for the domain error first.
fn describe(err: &anyhow::Error) -> String {
    if let Some(e) = err.downcast_ref::<DiscoveryError>() {
        return e.to_string();
    }
    if let Some(e) = err.downcast_ref::<PopularityError>() {
        return e.to_string();
    }
    if let Some(e) = err.downcast_ref::<ProviderError>() {
        return e.to_string();
    }
    err.root_cause().to_string()
}
