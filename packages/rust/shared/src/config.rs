//! Application configuration for studypack.
//!
//! Config resolution order: an explicit `--config` path, `./studypack.toml`
//! in the working directory, `~/.studypack/studypack.toml`, then built-in
//! defaults. CLI flags override config file values.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StudypackError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "studypack.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".studypack";

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Input/output locations.
    #[serde(default)]
    pub paths: PathsConfig,
}

/// `[paths]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Root directory holding per-institution content trees.
    #[serde(default = "default_content_root")]
    pub content_root: String,

    /// Site root where `database.json` and content shards are written.
    #[serde(default = "default_site_root")]
    pub site_root: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            content_root: default_content_root(),
            site_root: default_site_root(),
        }
    }
}

fn default_content_root() -> String {
    "content/universities".into()
}
fn default_site_root() -> String {
    "docs".into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the user config directory (`~/.studypack/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| StudypackError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the user config file (`~/.studypack/studypack.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config, preferring a project-local `studypack.toml`
/// over the user-level file. Returns defaults when neither exists.
pub fn load_config() -> Result<AppConfig> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return load_config_from(&local);
    }

    let user = config_file_path()?;
    if user.exists() {
        return load_config_from(&user);
    }

    tracing::debug!("no config file found, using defaults");
    Ok(AppConfig::default())
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| StudypackError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        StudypackError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the user config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| StudypackError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| StudypackError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| StudypackError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
