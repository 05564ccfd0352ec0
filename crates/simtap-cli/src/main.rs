mod commands;
mod config;
mod output;

use clap::Parser;
use commands::Command;
use config::Config;
use std::path::PathBuf;
use tracing_subscriber::FmtSubscriber;

/// Cross-match Gaia sources against the SIMBAD TAP service.
#[derive(Debug, Parser)]
#[command(name = "simtap", version)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// TAP service base URL, overriding the configuration
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_path(path)?,
        None => Config::default(),
    };
    if let Some(url) = cli.base_url {
        config.service.base_url = url;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    config.validate()?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level()?)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    commands::run(cli.command, &config).await
}

#[cfg(test)]
mod tests;
