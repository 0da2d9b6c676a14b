//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.sharebook/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SharebookConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub data_dir: Option<String>,
    pub default_currency: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DisplayConfig {
    pub url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_CURRENCY: &str = "$";
pub const DISPLAY_URL_ENV: &str = "SHARE_DISPLAY_URL";
pub const DATA_DIR_ENV: &str = "SHAREBOOK_DATA_DIR";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub data_dir: PathBuf,
    pub default_currency: String,
    pub display_url: Option<String>,
}

/// Values given on the command line. `None` means not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub data_dir: Option<PathBuf>,
    pub display_url: Option<String>,
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

/// Returns `~/.sharebook/`.
pub fn home_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".sharebook"))
}

/// Returns the path to `~/.sharebook/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    home_dir().map(|dir| dir.join("config.toml"))
}

/// Load config from `~/.sharebook/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `SharebookConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<SharebookConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(SharebookConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(SharebookConfig::default());
    }
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<SharebookConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: SharebookConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG: &str = r#"# sharebook configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# data_dir = "~/.sharebook"          # Where games.json and sharebook.log live. Or SHAREBOOK_DATA_DIR.
# default_currency = "$"             # Shown until a game sets one with `banksize £12000`.

# [display]
# url = "http://localhost:3000/18sh" # Dashboard to mirror game state to. Or SHARE_DISPLAY_URL.
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Expand a leading `~/` to the home directory.
fn expand_home(raw: &str) -> PathBuf {
    match (raw.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(raw),
    }
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &SharebookConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`] with an injectable environment lookup.
pub fn resolve_with_env(
    config: &SharebookConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Data dir: CLI → env → config → ~/.sharebook → ./.sharebook
    let data_dir = cli
        .data_dir
        .clone()
        .or_else(|| env(DATA_DIR_ENV).map(|raw| expand_home(&raw)))
        .or_else(|| config.general.data_dir.as_deref().map(expand_home))
        .or_else(home_dir)
        .unwrap_or_else(|| PathBuf::from(".sharebook"));

    // Display URL: CLI → env → config. Empty means off.
    let display_url = cli
        .display_url
        .clone()
        .or_else(|| env(DISPLAY_URL_ENV))
        .or_else(|| config.display.url.clone())
        .filter(|url| !url.trim().is_empty());

    ResolvedConfig {
        data_dir,
        default_currency: config
            .general
            .default_currency
            .clone()
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        display_url,
    }
}
