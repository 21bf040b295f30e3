use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use crate::error::NeuroError;

const APP_DIR: &str = "com.neuro.assistant";
const CONFIG_FILE: &str = "neuro.toml";
const PROFILE_FILE: &str = "user_profile.json";
const CATALOG_FILE: &str = "learning_resources.json";

/// Settings handed to the assistant at startup.
/// Every field has a default, so a partial `neuro.toml` is valid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssistantConfig {
    pub assistant_name: String,
    pub username: String,
    pub data_dir: PathBuf,
    /// Number of recommendations returned per request
    pub top_k: usize,
    /// Weekly study budget used when building plans
    pub hours_per_week: u32,
    pub log_level: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        AssistantConfig {
            assistant_name: "Neuro".to_string(),
            username: "User".to_string(),
            data_dir: default_data_dir(),
            top_k: 8,
            hours_per_week: 6,
            log_level: "info".to_string(),
        }
    }
}

impl AssistantConfig {
    /// Defaults rooted at a specific data directory
    pub fn with_data_dir<P: Into<PathBuf>>(data_dir: P) -> Self {
        AssistantConfig {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Parse a TOML document. Fields absent from the document keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, NeuroError> {
        Ok(toml::from_str::<AssistantConfig>(content)?)
    }

    fn from_table(content: &str) -> Result<(Self, bool), NeuroError> {
        let table: toml::Table = toml::from_str(content)?;
        let has_data_dir = table.contains_key("data_dir");
        let config = toml::Value::Table(table).try_into::<AssistantConfig>()?;
        Ok((config, has_data_dir))
    }

    /// Load `neuro.toml` from `dir`, falling back to defaults rooted at `dir`
    /// when the file is missing or unreadable.
    pub fn load_from(dir: &Path) -> Self {
        let config_path = dir.join(CONFIG_FILE);
        match fs::read_to_string(&config_path) {
            Ok(content) => match Self::from_table(&content) {
                Ok((mut config, has_data_dir)) => {
                    // A file without data_dir lives in the directory it was read from
                    if !has_data_dir {
                        config.data_dir = dir.to_path_buf();
                    }
                    tracing::debug!(path = ?config_path, "Loaded assistant config");
                    config
                }
                Err(e) => {
                    tracing::warn!(
                        path = ?config_path,
                        error = %e,
                        "Failed to parse neuro.toml, using defaults"
                    );
                    Self::with_data_dir(dir)
                }
            },
            Err(e) => {
                tracing::debug!(
                    path = ?config_path,
                    error = %e,
                    "No neuro.toml found, using defaults"
                );
                Self::with_data_dir(dir)
            }
        }
    }

    /// Load from the platform data directory
    pub fn load() -> Self {
        Self::load_from(&default_data_dir())
    }

    pub fn profile_path(&self) -> PathBuf {
        self.data_dir.join(PROFILE_FILE)
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.data_dir.join(CATALOG_FILE)
    }
}

/// Platform-specific app data directory
pub fn default_data_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let mut dir = PathBuf::from(home);
            dir.push("Library/Application Support");
            dir.push(APP_DIR);
            return dir;
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            let mut dir = PathBuf::from(appdata);
            dir.push(APP_DIR);
            return dir;
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let mut dir = PathBuf::from(home);
            dir.push(".local/share");
            dir.push(APP_DIR);
            return dir;
        }
    }

    // Fallback
    PathBuf::from("data")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_recommender_settings() {
        let config = AssistantConfig::with_data_dir("/tmp/neuro");
        assert_eq!(config.top_k, 8);
        assert_eq!(config.hours_per_week, 6);
        assert_eq!(config.assistant_name, "Neuro");
        assert_eq!(config.profile_path(), PathBuf::from("/tmp/neuro/user_profile.json"));
        assert_eq!(config.catalog_path(), PathBuf::from("/tmp/neuro/learning_resources.json"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AssistantConfig::from_toml_str("top_k = 3\nusername = \"Ada\"\n").unwrap();
        assert_eq!(config.top_k, 3);
        assert_eq!(config.username, "Ada");
        assert_eq!(config.hours_per_week, 6);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let err = AssistantConfig::from_toml_str("top_k = \"many\"").unwrap_err();
        assert_eq!(err.stage, "config");
    }

    #[test]
    fn test_load_from_falls_back_to_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("neuro.toml"), "hours_per_week = 4\n").unwrap();

        let config = AssistantConfig::load_from(dir.path());
        assert_eq!(config.hours_per_week, 4);
        assert_eq!(config.data_dir, dir.path());

        let empty = tempfile::TempDir::new().unwrap();
        let config = AssistantConfig::load_from(empty.path());
        assert_eq!(config.data_dir, empty.path());
        assert_eq!(config.top_k, 8);
    }
}
