// ─────────────────────────────────────────────────────────────────────────────
//  Kashif: Bitcoin Data Aggregator
//
//  Kashif (كاشف): "The Revealer". Uncovers the addresses active in the newest
//  block and answers address and transaction lookups without exposing clients
//  to third-party chain APIs.
//
//  Keeps a short-lived cache of recent activity and a ledger of what people
//  search for most.
//
//  In the name of Allah, the Most Gracious, the Most Merciful.
// ─────────────────────────────────────────────────────────────────────────────
use clap::Parser;
use kashif::engine::Kashif;
use kashif::error::Result;

#[derive(Debug, Parser)]
#[command(name = "kashif", version, about = "Bitcoin data aggregator")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "Config.toml")]
    config: String,
}

#[actix_web::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    Kashif::run(&args.config).await?;
    Ok(())
}
