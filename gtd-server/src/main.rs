//! GTD server - serves the Global Terrorism dashboard over HTTP.

use clap::Parser;
use gtd_server::config::{Cli, DATA_ENV};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    if let Err(err) = gtd_server::run(cli, std::env::var_os(DATA_ENV)).await {
        log::error!("[GTD] {:#}", err);
        return Err(err);
    }
    Ok(())
}
