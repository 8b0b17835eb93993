//! Command line options and the resolved server configuration.

use clap::Parser;
use gtd_charts::JitterConfig;
use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable read when `--data` is not given.
pub const DATA_ENV: &str = "GTD_DATA";

#[derive(Parser, Debug)]
#[command(
    name = "gtd-server",
    version,
    about = "Global Terrorism Database dashboard server"
)]
pub struct Cli {
    /// Incident CSV export (`.csv` or `.csv.gz`); falls back to $GTD_DATA
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 8050)]
    pub port: u16,

    /// Plot map markers at their exact coordinates
    #[arg(long)]
    pub no_jitter: bool,

    /// Seed for map jitter, for reproducible figures
    #[arg(long)]
    pub jitter_seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub data: PathBuf,
    pub host: String,
    pub port: u16,
    pub jitter: JitterConfig,
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Cli {
    /// Resolve the options against the value of [`DATA_ENV`].
    pub fn into_config(self, data_env: Option<OsString>) -> anyhow::Result<ServerConfig> {
        let data = match (self.data, data_env) {
            (Some(path), _) => path,
            (None, Some(value)) if !value.is_empty() => PathBuf::from(value),
            _ => anyhow::bail!("No data file given: pass --data <PATH> or set {}", DATA_ENV),
        };
        let jitter = if self.no_jitter {
            JitterConfig::disabled()
        } else {
            JitterConfig {
                enabled: true,
                seed: self.jitter_seed,
            }
        };
        Ok(ServerConfig {
            data,
            host: self.host,
            port: self.port,
            jitter,
        })
    }
}
