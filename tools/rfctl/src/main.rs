//! rfctl - command-line client for redis-facade
//!
//! Every subcommand maps onto one facade method and prints the reply the
//! way `redis-cli` does.

mod commands;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use commands::Commands;
use redis_facade::{init_logging, FacadeConfig, LogConfig, RedisFacade};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "rfctl")]
#[command(about = "Issue Redis commands through redis-facade")]
#[command(long_about = "Issue Redis commands through redis-facade

Connection settings come from defaults, then --config <file>, then
REDIS_FACADE_* environment variables, then the flags below.

Examples:
  rfctl set greeting hello --ex 60
  rfctl zrange board 0 -1 --rev --with-scores
  rfctl xadd events kind=login user=ada
  rfctl eval \"return KEYS[1]\" --keys a
  rfctl subscribe news -n 3")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML, YAML or JSON)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Redis host
    #[arg(long, global = true)]
    host: Option<String>,

    /// Redis port
    #[arg(short, long, global = true)]
    port: Option<u16>,

    /// Connect timeout in seconds (0 = wait indefinitely)
    #[arg(short, long, global = true, allow_negative_numbers = true)]
    timeout: Option<f64>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

impl Cli {
    /// Loaded configuration with command-line overrides applied
    fn facade_config(&self) -> Result<FacadeConfig> {
        let mut config =
            FacadeConfig::load(self.config.as_deref()).context("Failed to load configuration")?;

        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }

        config.validate().context("Invalid connection settings")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configure colored output
    if cli.no_color {
        colored::control::set_override(false);
    }

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    let log_config = LogConfig::default()
        .with_level(log_level)
        .with_ansi(!cli.no_color);
    let _guard = init_logging(&log_config).context("Failed to initialize logging")?;

    let config = cli.facade_config()?;
    debug!("Connecting to {}", config.display_url());
    let redis = RedisFacade::with_config(&config)
        .await
        .with_context(|| format!("Cannot reach Redis at {}", config.addr()))?;

    let result = commands::run(&redis, cli.command).await;
    redis.close();

    if let Some(reply) = result? {
        println!("{}", output::format_value(&reply));
    }
    Ok(())
}
