//! Configuration loading and cache folder resolution
//!
//! Bootstrap settings come from an optional TOML file. A missing file is not
//! an error: built-in defaults are used and a warning is logged.

use std::path::{Path, PathBuf};

use chrono::Duration;
use serde::Deserialize;
use tracing::warn;

use crate::{Error, Result};

/// Environment variable naming the TOML config file
pub const CONFIG_ENV_VAR: &str = "EQALERT_CONFIG";

/// Environment variable naming the cache folder
pub const CACHE_DIR_ENV_VAR: &str = "EQALERT_CACHE_DIR";

/// Default retention window for report tracking, in seconds
pub const DEFAULT_RETENTION_SECS: u64 = 3600;

/// Default file name of the report tracker store
pub const DEFAULT_CACHE_FILE: &str = "report_duplication.json";

/// Largest retention window chrono can represent
const MAX_RETENTION_SECS: u64 = (i64::MAX / 1000) as u64;

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TomlConfig {
    /// Folder holding the report tracker store (optional)
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    #[serde(default)]
    pub tracker: TrackerSection,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `[tracker]` table
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TrackerSection {
    /// Seconds an event stays remembered after its last report
    #[serde(default = "default_retention_secs")]
    pub retention_secs: u64,

    /// Store file name inside the cache folder
    #[serde(default = "default_cache_file")]
    pub cache_file: String,
}

impl Default for TrackerSection {
    fn default() -> Self {
        Self {
            retention_secs: default_retention_secs(),
            cache_file: default_cache_file(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_retention_secs() -> u64 {
    DEFAULT_RETENTION_SECS
}

fn default_cache_file() -> String {
    DEFAULT_CACHE_FILE.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Parse TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Read from `path`; `None` if the file does not exist
    ///
    /// Logs nothing, so callers can read the file before logging is set up.
    pub fn read(path: &Path) -> Result<Option<Self>> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content)
                .map(Some)
                .map_err(|e| Error::Config(format!("{}: {}", path.display(), e))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Load from `path`; a missing file yields defaults
    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::read(path)?.unwrap_or_else(|| {
            warn_missing(path);
            Self::default()
        }))
    }
}

/// Warn that the config file at `path` is absent and defaults apply
pub fn warn_missing(path: &Path) {
    warn!("Config file {} not found, using defaults", path.display());
}

/// Config file resolution priority:
/// 1. Command-line argument (highest priority)
/// 2. `EQALERT_CONFIG` environment variable
/// 3. Platform config folder (`<config_dir>/eqalert/config.toml`)
pub fn resolve_config_path(cli_arg: Option<&Path>) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return PathBuf::from(path);
    }

    dirs::config_dir()
        .map(|d| d.join("eqalert").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("eqalert.toml"))
}

/// Cache folder resolution priority:
/// 1. Command-line argument (highest priority)
/// 2. `EQALERT_CACHE_DIR` environment variable
/// 3. TOML `cache_dir`
/// 4. OS-dependent default
pub fn resolve_cache_dir(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(CACHE_DIR_ENV_VAR) {
        return PathBuf::from(path);
    }

    if let Some(path) = &config.cache_dir {
        return path.clone();
    }

    default_cache_dir()
}

/// OS-dependent default cache folder
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .map(|d| d.join("eqalert"))
        .unwrap_or_else(|| PathBuf::from("./eqalert_cache"))
}

/// Resolved settings for the report duplication tracker
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    pub cache_dir: PathBuf,
    pub cache_file: String,
    pub retention_secs: u64,
}

impl TrackerConfig {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            cache_file: default_cache_file(),
            retention_secs: DEFAULT_RETENTION_SECS,
        }
    }

    /// Combine a resolved cache folder with the `[tracker]` table
    pub fn from_toml(cache_dir: PathBuf, config: &TomlConfig) -> Result<Self> {
        if config.tracker.cache_file.trim().is_empty() {
            return Err(Error::Config("tracker.cache_file must not be empty".to_string()));
        }
        if config.tracker.retention_secs > MAX_RETENTION_SECS {
            return Err(Error::Config(format!(
                "tracker.retention_secs out of range: {}",
                config.tracker.retention_secs
            )));
        }
        Ok(Self {
            cache_dir,
            cache_file: config.tracker.cache_file.clone(),
            retention_secs: config.tracker.retention_secs,
        })
    }

    /// Full path of the tracker store
    pub fn store_path(&self) -> PathBuf {
        self.cache_dir.join(&self.cache_file)
    }

    pub fn retention(&self) -> Duration {
        Duration::seconds(self.retention_secs.min(MAX_RETENTION_SECS) as i64)
    }
}
