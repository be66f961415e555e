use std::sync::Arc;

use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpServer;
use actix_web::middleware;
use actix_web::web;
use tracing::error;
use tracing::info;

use crate::api::AppState;
use crate::api::api_routes;
use crate::config::Config;
use crate::config::load_config;
use crate::err_with_loc;
use crate::error::EngineError;
use crate::error::Result;
use crate::provider::Providers;
use crate::provider::make_providers;
use crate::service::LeaderboardService;
use crate::service::LookupService;
use crate::service::RecentAddressDiscovery;
use crate::storage::StorageEngine;
use crate::storage::make_storage_engine;
use crate::tracing::setup_tracing;

pub const ENGINE_NAME: &str = "kashif";

#[derive(Clone)]
pub struct Kashif {
  pub config:    Config,
  pub db:        Arc<StorageEngine>,
  pub providers: Providers,
}

impl Kashif {
  pub async fn run(config_path: &str) -> Result<()> {
    // .env first so its secrets override Config.toml
    dotenvy::dotenv().ok();

    let config = load_config(config_path)?;

    let _tracing = setup_tracing(ENGINE_NAME, &config.logging)?;
    info!("Starting Kashif (كاشف): The Revealer");
    info!("kashif::run::config_loaded::{}", config_path);

    let db_engine = make_storage_engine(ENGINE_NAME, &config).await?;
    info!("kashif::run::db_engine::created");

    let providers = make_providers(&config.providers)?;
    info!("kashif::run::providers::created");

    let kashif = Kashif { config, db: Arc::new(db_engine), providers };
    kashif.serve().await?;

    info!("kashif::shutdown");
    Ok(())
  }

  pub fn app_state(&self) -> AppState {
    let discovery = RecentAddressDiscovery::new(
      self.db.cache.clone(),
      self.providers.blocks.clone(),
      self.providers.transactions.clone(),
      self.config.discovery.clone(),
    );
    let lookup = LookupService::new(self.providers.lookup.clone(), self.db.popularity());
    let leaderboard = LeaderboardService::new(self.db.popularity());

    AppState {
      discovery:   Arc::new(discovery),
      lookup:      Arc::new(lookup),
      leaderboard: Arc::new(leaderboard),
    }
  }

  // Runs until SIGINT/SIGTERM; actix drains in-flight requests before returning
  async fn serve(&self) -> Result<()> {
    let server_config = self.config.server.clone();
    let address = format!("{}:{}", server_config.host, server_config.port);

    // One state for all workers so the single-flight lock is process wide
    let state = web::Data::new(self.app_state());

    let mut server = HttpServer::new(move || {
      let cors = Cors::default().allow_any_origin().allow_any_method().allow_any_header();

      App::new()
        .wrap(middleware::Logger::default())
        .wrap(cors)
        .app_data(state.clone())
        .service(api_routes())
    });

    if let Some(workers) = server_config.workers {
      server = server.workers(workers);
    }

    let server = server.bind((server_config.host.as_str(), server_config.port)).map_err(|e| {
      error!("kashif::bind_failed::{}: {}", address, e);
      err_with_loc!(EngineError::BindError { address: address.clone(), reason: e.to_string() })
    })?;

    info!("kashif::listening::{}", address);

    server.run().await.map_err(|e| {
      error!("kashif::server_error: {}", e);
      err_with_loc!(EngineError::ServerError(e.to_string()))
    })
  }
}
