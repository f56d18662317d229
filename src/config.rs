//! Configuration loading and root folder resolution
//!
//! Two-tier configuration:
//! 1. **Bootstrap** (CLI / environment / TOML): root folder, port, log level
//! 2. **Database runtime** (`settings` table): lowest-priority fallback for
//!    the TMDB API key and the sitemap base URL
//!
//! Resolution priority for each value: CLI argument, then environment
//! variable, then TOML file, then compiled default.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default HTTP listen port
pub const DEFAULT_PORT: u16 = 5740;

/// Database file name inside the root folder
pub const DATABASE_FILE: &str = "dramaboard.db";

/// Command-line arguments
#[derive(Parser, Debug, Default)]
#[command(name = "dramaboard", version, about = "Asian drama board with per-user ratings")]
pub struct Cli {
    /// Root folder holding the database
    #[arg(long, env = "DRAMABOARD_ROOT")]
    pub root_folder: Option<PathBuf>,

    /// HTTP listen port
    #[arg(long, env = "DRAMABOARD_PORT")]
    pub port: Option<u16>,

    /// Path to a TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// TMDB API key; without one the built-in sample catalog is served
    #[arg(long, env = "TMDB_API_KEY", hide_env_values = true)]
    pub tmdb_api_key: Option<String>,
}

/// Bootstrap configuration file (optional)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    #[serde(default)]
    pub port: Option<u16>,

    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// Absolute base URL used in the sitemap
    #[serde(default)]
    pub site_base_url: Option<String>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default)]
    pub level: Option<String>,
}

/// Resolved runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub root_folder: PathBuf,
    pub port: u16,
    pub tmdb_api_key: Option<String>,
    pub site_base_url: Option<String>,
    /// Fallback tracing directive when RUST_LOG is unset
    pub log_filter: String,
}

impl Config {
    /// Resolve configuration from CLI (which already folds in environment
    /// variables) and the TOML file
    pub fn resolve(cli: &Cli) -> Result<Config> {
        let toml_config = load_toml_config(cli.config.as_deref())?;

        let root_folder = cli
            .root_folder
            .clone()
            .or_else(|| toml_config.root_folder.clone())
            .unwrap_or_else(default_root_folder);

        let port = cli.port.or(toml_config.port).unwrap_or(DEFAULT_PORT);

        let tmdb_api_key = cli
            .tmdb_api_key
            .clone()
            .or_else(|| toml_config.tmdb_api_key.clone())
            .filter(|key| is_valid_key(key));

        let log_filter = match &toml_config.logging.level {
            Some(level) => format!("dramaboard={0},tower_http={0}", level),
            None => "dramaboard=info,tower_http=info".to_string(),
        };

        Ok(Config {
            root_folder,
            port,
            tmdb_api_key,
            site_base_url: toml_config.site_base_url.clone(),
            log_filter,
        })
    }

    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join(DATABASE_FILE)
    }

    pub fn ensure_root_folder(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root_folder).with_context(|| {
            format!("Failed to create root folder: {}", self.root_folder.display())
        })
    }
}

/// An API key must be a non-empty token without whitespace
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && !key.contains(char::is_whitespace)
}

/// Load the TOML config: an explicit `--config` path must parse, the default
/// platform locations are optional
fn load_toml_config(explicit_path: Option<&Path>) -> Result<TomlConfig> {
    let path = match explicit_path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            path.to_path_buf()
        }
        None => match default_config_path() {
            Some(path) => path,
            None => return Ok(TomlConfig::default()),
        },
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    tracing::debug!("Loaded config file: {}", path.display());
    Ok(config)
}

/// First existing config file among the platform defaults
fn default_config_path() -> Option<PathBuf> {
    if let Some(path) = dirs::config_dir().map(|d| d.join("dramaboard").join("config.toml")) {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/dramaboard/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        dirs::data_local_dir()
            .map(|d| d.join("dramaboard"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/dramaboard"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("dramaboard"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/dramaboard"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("dramaboard"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\dramaboard"))
    } else {
        PathBuf::from("./dramaboard_data")
    }
}
