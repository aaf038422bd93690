//! Configuration loading.
//!
//! Precedence, lowest to highest: built-in defaults, the YAML config file,
//! environment variables, CLI flags (applied by `main`).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Spreadsheet the municipality shares by default.
pub const DEFAULT_SHEET_ID: &str = "192FUClWxT65rRtEiJfKxPHtqemH5nK66-i165vrKldI";

/// Subsheet holding the record rows.
pub const DEFAULT_SHEET_NAME: &str = "ข้อมูล";

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_VAR: &str = "WASTE_REGISTRY_CONFIG";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Identifier of the shared spreadsheet.
    pub sheet_id: String,
    /// Name of the subsheet to query.
    pub sheet_name: String,
    /// Path of the local collection store.
    pub store_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sheet_id: DEFAULT_SHEET_ID.to_string(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            store_path: default_store_path(),
        }
    }
}

/// Default store location under the platform data directory.
fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("waste-registry").join("store.db"))
        .unwrap_or_else(|| PathBuf::from("waste-registry.db"))
}

impl Config {
    /// Load configuration: explicit path, else `WASTE_REGISTRY_CONFIG`,
    /// else the user config file when present, else defaults. Environment
    /// overrides apply last.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit
            .map(PathBuf::from)
            .or_else(|| std::env::var(CONFIG_PATH_VAR).ok().map(PathBuf::from))
            .or_else(Self::user_config_path);

        let mut config = match path {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) if explicit.is_some() => {
                anyhow::bail!("config file not found: {}", path.display())
            }
            _ => Config::default(),
        };

        config.apply_env();
        Ok(config)
    }

    fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("waste-registry").join("config.yaml"))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&text)
            .with_context(|| format!("invalid config {}", path.display()))?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(sheet_id) = std::env::var("WASTE_REGISTRY_SHEET_ID") {
            self.sheet_id = sheet_id;
        }
        if let Ok(sheet_name) = std::env::var("WASTE_REGISTRY_SHEET_NAME") {
            self.sheet_name = sheet_name;
        }
        if let Ok(store_path) = std::env::var("WASTE_REGISTRY_STORE") {
            self.store_path = store_path.into();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_point_at_the_shared_sheet() {
        let config = Config::default();
        assert_eq!(config.sheet_id, DEFAULT_SHEET_ID);
        assert_eq!(config.sheet_name, "ข้อมูล");
    }

    #[test]
    fn yaml_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "sheet_id: my-sheet\nstore_path: /tmp/waste.db").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.sheet_id, "my-sheet");
        assert_eq!(config.store_path, PathBuf::from("/tmp/waste.db"));
        // Unspecified fields keep their defaults.
        assert_eq!(config.sheet_name, DEFAULT_SHEET_NAME);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = Config::load(Some(Path::new("/definitely/not/here.yaml")));
        assert!(result.is_err());
    }
}
