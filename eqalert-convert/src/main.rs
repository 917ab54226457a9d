//! eqalert-convert - command-line bulletin converter
//!
//! Thin wrapper around eqalert-common: loads configuration, sets up logging
//! and converts the bulletin files given on the command line.

use anyhow::{Context, Result};
use clap::Parser;
use eqalert_common::config::{resolve_config_path, warn_missing, TomlConfig};
use eqalert_convert::{convert, write_records, Args};
use tracing::info;

fn main() -> Result<()> {
    let args = Args::parse();

    // Config is read before the subscriber exists so its log level can seed
    // the filter; anything worth logging about it is reported afterwards
    let config_path = resolve_config_path(args.config.as_deref());
    let config_file = TomlConfig::read(&config_path)
        .with_context(|| format!("Failed to load config {}", config_path.display()))?;
    let config_missing = config_file.is_none();
    let config = config_file.unwrap_or_default();

    // RUST_LOG overrides the configured level; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        "Starting eqalert-convert v{} (config {})",
        env!("CARGO_PKG_VERSION"),
        config_path.display()
    );
    if config_missing {
        warn_missing(&config_path);
    }

    let records = convert(&args, &config)?;
    write_records(&records, args.output.as_deref())?;

    Ok(())
}
