//! Configuration for labrat.
//!
//! All state lives under `~/.labrat/` (override with `LABRAT_HOME`).
//! An optional `config.toml` there adds recognized project types and
//! extension categories; a missing file means defaults.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Error type for config operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Config not found: {0}")]
    NotFound(String),
}

/// Result type for config operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Project types recognized when no config overrides them.
pub const DEFAULT_PROJECT_TYPES: &[&str] = &["computational-biology", "data-science"];

/// Get the labrat home directory: `$LABRAT_HOME` or `~/.labrat`
pub fn labrat_home() -> PathBuf {
    if let Ok(override_path) = std::env::var("LABRAT_HOME") {
        return PathBuf::from(override_path);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".labrat")
}

/// Ensure the labrat home directory exists
pub fn ensure_labrat_home() -> std::io::Result<PathBuf> {
    let home = labrat_home();
    std::fs::create_dir_all(&home)?;
    Ok(home)
}

/// Get logs directory: `~/.labrat/logs`
pub fn logs_dir() -> PathBuf {
    labrat_home().join("logs")
}

/// Ensure the logs directory exists
pub fn ensure_logs_dir() -> std::io::Result<PathBuf> {
    let dir = logs_dir();
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Default archive destination: `~/.labrat/archives`
pub fn default_archive_dir() -> PathBuf {
    labrat_home().join("archives")
}

/// Path of the config file: `~/.labrat/config.toml`
pub fn config_path() -> PathBuf {
    labrat_home().join("config.toml")
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ProjectsRaw {
    /// Extra recognized project types, appended to the defaults
    #[serde(default)]
    types: Vec<String>,

    /// Root directory scanned by `project list` when --root is omitted
    #[serde(default)]
    default_root: Option<PathBuf>,

    /// Archive destination used by `project delete` when omitted
    #[serde(default)]
    archive_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct OrganizeRaw {
    /// Extra extension -> category mappings, lowest precedence
    #[serde(default)]
    categories: BTreeMap<String, String>,
}

/// Root config structure for `config.toml`
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct RootConfig {
    #[serde(default)]
    projects: Option<ProjectsRaw>,

    #[serde(default)]
    organize: Option<OrganizeRaw>,
}

/// Resolved configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Recognized project types (defaults plus config additions)
    pub project_types: Vec<String>,
    /// Root for `project list` when no --root given
    pub default_root: Option<PathBuf>,
    /// Archive destination for deletes when none given
    pub archive_dir: Option<PathBuf>,
    /// Extra extension -> category rules for the organizer
    pub extra_categories: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_types: DEFAULT_PROJECT_TYPES.iter().map(|s| s.to_string()).collect(),
            default_root: None,
            archive_dir: None,
            extra_categories: BTreeMap::new(),
        }
    }
}

impl Config {
    fn from_raw(raw: RootConfig) -> Self {
        let mut config = Config::default();
        if let Some(projects) = raw.projects {
            for ty in projects.types {
                if !config.project_types.contains(&ty) {
                    config.project_types.push(ty);
                }
            }
            config.default_root = projects.default_root;
            config.archive_dir = projects.archive_dir;
        }
        if let Some(organize) = raw.organize {
            config.extra_categories = organize.categories;
        }
        config
    }
}

/// Load configuration from a file; a missing file yields defaults.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = std::fs::read_to_string(path)?;
    let root: RootConfig = toml::from_str(&content)?;
    Ok(Config::from_raw(root))
}

/// Load configuration from the default location.
pub fn load_default_config() -> Result<Config> {
    load_config(&config_path())
}
