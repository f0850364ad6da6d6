use clap::Parser;
use tracing_subscriber::EnvFilter;

use courier::config::{Cli, Config};
use courier::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "courier=info".into()),
        )
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load(Cli::parse())?;

    tokio::select! {
        res = server::listener::run(&cfg) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
