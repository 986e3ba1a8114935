use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod api;
mod archive;
mod cli;
mod command;
mod config;
mod domain;
mod notify;

use cli::{Cli, Commands};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();

    match cli.command.unwrap_or(Commands::Sync) {
        Commands::Sync => command::run_sync_command(config_path, cli.run_options(false)).await,
        Commands::Plan => command::run_sync_command(config_path, cli.run_options(true)).await,
        Commands::CheckConfig => command::run_check_config(config_path),
    }
}
