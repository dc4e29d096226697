//! Configuration loading and root folder resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Optional TOML configuration file contents
///
/// Read from `~/.config/linkstrat/config.toml` when present. All fields are
/// optional; higher-priority sources (environment, database) win.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Root data folder override
    pub root_folder: Option<String>,
    /// Gemini API key backup (database value is authoritative)
    pub gemini_api_key: Option<String>,
}

/// Root folder resolution priority order:
/// 1. Environment variable `LINKSTRAT_ROOT`
/// 2. `root_folder` in the TOML config file
/// 3. OS-dependent data-dir default (fallback)
pub fn resolve_root_folder() -> PathBuf {
    if let Ok(path) = std::env::var("LINKSTRAT_ROOT") {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Ok(config) = load_toml_config() {
        if let Some(root_folder) = config.root_folder {
            return PathBuf::from(root_folder);
        }
    }

    default_root_folder()
}

/// Load the optional TOML config file
///
/// Absence of the file is reported as a Config error; callers treat it as
/// "use defaults".
pub fn load_toml_config() -> Result<TomlConfig> {
    let path = config_file_path()?;
    if !path.exists() {
        return Err(Error::Config(format!("Config file not found: {}", path.display())));
    }
    let content = std::fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("Read config failed: {}", e)))?;
    toml::from_str(&content).map_err(|e| Error::Config(format!("Parse config failed: {}", e)))
}

/// Default configuration file path for the platform
fn config_file_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join("linkstrat").join("config.toml"))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
}

/// OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("linkstrat"))
        .unwrap_or_else(|| PathBuf::from("./linkstrat_data"))
}

/// Ensure the root folder exists and return the database file path inside it
pub fn prepare_root_folder(root: &std::path::Path) -> Result<PathBuf> {
    std::fs::create_dir_all(root)?;
    Ok(root.join("linkstrat.db"))
}
