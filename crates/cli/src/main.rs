//! Sanctum CLI - drive the session provider against a real backend

mod commands;
mod logging;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use commands::Commands;
use sanctum_core::AuthConfig;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{Level, error, info};

#[derive(Parser)]
#[command(name = "sanctum")]
#[command(about = "Log in against a Sanctum backend and inspect the session")]
#[command(version)]
struct Cli {
    /// Set logging level
    #[arg(short = 'l', long, global = true, default_value = "info")]
    log_level: LogLevel,

    /// Configuration file (TOML or YAML)
    #[arg(short = 'c', long, global = true, env = "SANCTUM_CONFIG")]
    config: Option<PathBuf>,

    /// Backend origin, overrides the configuration
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Timeout for the whole command in seconds (0 = no timeout)
    #[arg(short = 't', long, global = true, default_value = "30")]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn auth_config(&self) -> Result<AuthConfig> {
        let mut config = AuthConfig::load(self.config.as_deref())?;
        if let Some(base_url) = &self.base_url {
            config.base_url.clone_from(base_url);
            config.validate()?;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.into())?;

    let config = cli.auth_config()?;
    info!(base_url = %config.base_url, "Starting Sanctum CLI");

    let result = if cli.timeout == 0 {
        cli.command.execute(config).await
    } else {
        let timeout_duration = Duration::from_secs(cli.timeout);
        match tokio::time::timeout(timeout_duration, cli.command.execute(config)).await {
            Ok(result) => result,
            Err(_) => {
                error!("Command timed out after {} seconds", cli.timeout);
                std::process::exit(1);
            }
        }
    };

    if let Err(e) = result {
        error!("Command failed: {e}");
        std::process::exit(1);
    }

    Ok(())
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(log_level: LogLevel) -> Self {
        match log_level {
            LogLevel::Error => Self::ERROR,
            LogLevel::Warn => Self::WARN,
            LogLevel::Info => Self::INFO,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Trace => Self::TRACE,
        }
    }
}
