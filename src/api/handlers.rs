use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::ResponseError;
use actix_web::web;
use serde::Serialize;
use serde_json::json;

use super::AppState;
use crate::error::ApiError;
use crate::service::LookupOutcome;

pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

// Recently active addresses
pub async fn recent_addresses(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let addresses = data.discovery.discover_recent_addresses().await.map_err(|e| ApiError::internal(&e))?;
    Ok(HttpResponse::Ok().json(addresses))
}

pub async fn address_detail(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> HttpResponse {
    let address = path.into_inner();

    match data.lookup.lookup_address(&address).await {
        Ok(outcome) => lookup_response(outcome),
        Err(e) => ApiError::from_lookup(&e).error_response(),
    }
}

pub async fn transaction_detail(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> HttpResponse {
    let hash = path.into_inner();

    match data.lookup.lookup_transaction(&hash).await {
        Ok(outcome) => lookup_response(outcome),
        Err(e) => ApiError::from_lookup(&e).error_response(),
    }
}

pub async fn top_addresses(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let top = data.leaderboard.top_addresses().await.map_err(|e| ApiError::internal(&e))?;
    Ok(HttpResponse::Ok().json(top))
}

pub async fn top_transactions(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let top = data.leaderboard.top_transactions().await.map_err(|e| ApiError::internal(&e))?;
    Ok(HttpResponse::Ok().json(top))
}

// A failed counter update still hands the fetched payload back, next to the error
fn lookup_response<T: Serialize>(outcome: LookupOutcome<T>) -> HttpResponse {
    match outcome.search_count {
        Ok(_) => HttpResponse::Ok().json(outcome.detail),
        Err(e) => HttpResponse::InternalServerError().json(json!({
            "error": ApiError::internal(&e).to_string(),
            "data": outcome.detail,
        })),
    }
}
