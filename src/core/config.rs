//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.crm/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::ids::IdPolicy;
use crate::core::query::DEFAULT_PAGE_SIZE;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CrmConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub page_size: Option<usize>,
    pub data_file: Option<String>,
    pub id_policy: Option<IdPolicy>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StoreConfig {
    pub delay_ms: Option<u64>,
    pub timeout_secs: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_STORE_DELAY_MS: u64 = 1000;
pub const DEFAULT_STORE_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub page_size: usize,
    /// None = use the bundled seed data.
    pub data_file: Option<PathBuf>,
    pub id_policy: IdPolicy,
    pub store_delay: Duration,
    pub store_timeout: Duration,
}

/// Values given on the command line (None = flag not passed).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub data_file: Option<PathBuf>,
    pub page_size: Option<usize>,
    pub delay_ms: Option<u64>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.crm/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".crm"))
}

/// Returns the path to `~/.crm/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.crm/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `CrmConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<CrmConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(CrmConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(CrmConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: CrmConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# CRM Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# page_size = 10                     # Customers per list page (or CRM_PAGE_SIZE)
# data_file = "customers.json"       # Path relative to ~/.crm/ (or CRM_DATA_FILE)
# id_policy = "sequential"           # "sequential" or "uuid"

# [store]
# delay_ms = 1000                    # Simulated save/delete latency (or CRM_DELAY_MS)
# timeout_secs = 30                  # Give up on a store call after this long
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &CrmConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Page size: CLI → env → config → default
    let page_size = cli
        .page_size
        .or_else(|| env_parse("CRM_PAGE_SIZE"))
        .or(config.general.page_size)
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .max(1);

    // Data file: CLI → env → config (relative to ~/.crm/) → bundled
    let data_file = cli
        .data_file
        .clone()
        .or_else(|| std::env::var("CRM_DATA_FILE").ok().map(PathBuf::from))
        .or_else(|| config.general.data_file.as_deref().map(config_relative));

    // Store delay: CLI → env → config → default
    let delay_ms = cli
        .delay_ms
        .or_else(|| env_parse("CRM_DELAY_MS"))
        .or(config.store.delay_ms)
        .unwrap_or(DEFAULT_STORE_DELAY_MS);

    ResolvedConfig {
        page_size,
        data_file,
        id_policy: config.general.id_policy.unwrap_or_default(),
        store_delay: Duration::from_millis(delay_ms),
        store_timeout: Duration::from_secs(
            config
                .store
                .timeout_secs
                .unwrap_or(DEFAULT_STORE_TIMEOUT_SECS),
        ),
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("Ignoring {key}={raw:?}: not a valid number");
            None
        }
    }
}

/// Config-file paths are relative to `~/.crm/` unless absolute.
fn config_relative(file: &str) -> PathBuf {
    let path = PathBuf::from(file);
    if path.is_absolute() {
        return path;
    }
    match config_dir() {
        Some(dir) => dir.join(path),
        None => path,
    }
}
