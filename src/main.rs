// src/main.rs
//! shamir-vault command-line entry point.
use anyhow::Result;
use clap::Parser;
use shamir_vault::cli::{run, Cli};
use shamir_vault::core::config::VaultConfig;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = VaultConfig::load(cli.config.as_deref())?;

    init_logging(&config.logging.level)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(cli.command, &config, &mut out)
}

/// Logs go to stderr so stdout carries only shares, secrets and keys.
fn init_logging(default_level: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
