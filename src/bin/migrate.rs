// ─────────────────────────────────────────────────────────────────────────────
//  Database Migration Tool
//  Part of Kashif, the Bitcoin data aggregator.
//
//  Applies all database migrations before the service is started.
//
//  In the name of Allah, the Most Gracious, the Most Merciful.
// ─────────────────────────────────────────────────────────────────────────────

use clap::Parser;
use kashif::config::load_config;
use kashif::error::Result;
use kashif::storage::run_database_migrations;
use kashif::tracing::setup_tracing;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "migrate", version, about = "Apply pending database migrations")]
struct Args {
    #[arg(short, long, default_value = "Config.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    dotenvy::dotenv().ok();

    let config = load_config(&args.config)?;

    let _tracing = setup_tracing("migrate", &config.logging)?;

    run_database_migrations("migration-tool", &config).await?;

    info!("migrate::completed");
    Ok(())
}
