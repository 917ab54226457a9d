//! eqalert-convert library - bulletin file converter
//!
//! Reads bulletin documents from disk, normalizes them and writes the records
//! as one JSON array. Fetching bulletins is left to whatever drops the files
//! in place; an unreadable file is treated like a failed fetch.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use eqalert_common::config::{resolve_cache_dir, TomlConfig, TrackerConfig};
use eqalert_common::{
    convert_information, convert_reports, DuplicationTracker, FetchedDocument,
    JsonDocumentParser, NormalizedRecord,
};
use tracing::{info, warn};

/// Command-line arguments for eqalert-convert
#[derive(Parser, Debug)]
#[command(name = "eqalert-convert")]
#[command(about = "Convert earthquake bulletins into display records")]
#[command(version)]
pub struct Args {
    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Folder holding the report duplication cache
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Write records here instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub kind: BulletinKind,
}

#[derive(Subcommand, Debug)]
pub enum BulletinKind {
    /// Hypocenter and seismic intensity information bulletins
    Information {
        /// Bulletin documents, converted in the order given
        files: Vec<PathBuf>,
    },
    /// Seismic intensity reports, numbered per event
    Report {
        /// Bulletin documents, converted in the order given
        files: Vec<PathBuf>,
    },
}

/// Read each file as one fetched bulletin
pub fn read_documents(files: &[PathBuf]) -> Vec<FetchedDocument> {
    files
        .iter()
        .map(|path| {
            let url = path.display().to_string();
            match std::fs::read_to_string(path) {
                Ok(body) => FetchedDocument::fetched(url, body),
                Err(e) => {
                    warn!("Could not read {}: {}", url, e);
                    FetchedDocument::failed(url)
                }
            }
        })
        .collect()
}

/// Convert the files named by `args` using `config`
pub fn convert(args: &Args, config: &TomlConfig) -> Result<Vec<NormalizedRecord>> {
    let parser = JsonDocumentParser;

    let records = match &args.kind {
        BulletinKind::Information { files } => {
            convert_information(&read_documents(files), &parser)
        }
        BulletinKind::Report { files } => {
            let cache_dir = resolve_cache_dir(args.cache_dir.as_deref(), config);
            let tracker_config = TrackerConfig::from_toml(cache_dir, config)?;
            info!("Report cache: {}", tracker_config.store_path().display());
            let tracker = DuplicationTracker::from_config(&tracker_config);
            convert_reports(&read_documents(files), &parser, &tracker)
        }
    };

    Ok(records)
}

/// Write records as a pretty JSON array to `output`, or stdout if `None`
pub fn write_records(records: &[NormalizedRecord], output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(records).context("Failed to encode records")?;

    match output {
        Some(path) => {
            std::fs::write(path, json + "\n")
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} records to {}", records.len(), path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
