//! Application configuration.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Directory under the platform config dir holding `config.toml`.
pub const CONFIG_DIR_NAME: &str = "staffing";
/// Prefix for environment overrides, e.g. `STAFFING_FETCH_DELAY_MS`.
pub const ENV_PREFIX: &str = "STAFFING";

const DEFAULT_FETCH_DELAY_MS: u64 = 500;

const DEFAULT_CONFIG: &str = r#"# Where collections are loaded from: "fixtures" or "json".
source = "fixtures"

# Directory holding resources.json, projects.json and seats.json when source = "json".
data_dir = "data"

# Simulated latency for fixture loads, in milliseconds.
fetch_delay_ms = 500

# Directory receiving staffing.log.
log_dir = "logs"
"#;

/// Backend used to populate the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Built-in canned data.
    #[default]
    Fixtures,
    /// JSON files in [`AppConfig::data_dir`].
    Json,
}

/// Runtime settings resolved from defaults, the config file and the environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backend used by the load operations.
    pub source: SourceKind,
    /// Directory read by the JSON source.
    pub data_dir: PathBuf,
    /// Delay applied by the fixture source before returning data.
    pub fetch_delay_ms: u64,
    /// Directory the binary appends its log file to.
    pub log_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::default(),
            data_dir: PathBuf::from("data"),
            fetch_delay_ms: DEFAULT_FETCH_DELAY_MS,
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default file location plus environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load configuration from `path` (optional) plus environment overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Self::layered(path.as_ref(), environment())
    }

    fn layered(path: &Path, env: Environment) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(env)
            .build()
            .with_context(|| format!("failed to read configuration {}", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("invalid configuration in {}", path.display()))
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX).try_parsing(true)
}

/// Location of the user's configuration file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
        .join("config.toml")
}

/// Write a commented default configuration when none exists yet.
pub fn ensure_default_config() -> Result<PathBuf> {
    let path = config_path();
    write_default_config(&path)?;
    Ok(path)
}

fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write default config {}", path.display()))
}
