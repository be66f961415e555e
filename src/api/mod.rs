pub mod handlers;
pub mod state;

use actix_web::Scope;
use actix_web::web;

pub use state::AppState;

use self::handlers::address_detail;
use self::handlers::health;
use self::handlers::recent_addresses;
use self::handlers::top_addresses;
use self::handlers::top_transactions;
use self::handlers::transaction_detail;

pub fn api_routes() -> Scope {
    web::scope("")
        .route("/health", web::get().to(health))
        .route("/addresses", web::get().to(recent_addresses))
        .route("/addresses/{address}", web::get().to(address_detail))
        .route("/transactions/{hash}", web::get().to(transaction_detail))
        .route("/top-addresses", web::get().to(top_addresses))
        .route("/top-transactions", web::get().to(top_transactions))
}
