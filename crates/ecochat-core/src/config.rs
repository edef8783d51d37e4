use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::typewriter::TypewriterOptions;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
pub const SERVER_URL_ENV: &str = "ECOCHAT_SERVER_URL";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub server_url: Option<String>,
    pub min_delay_ms: Option<u64>,
    pub max_delay_ms: Option<u64>,
    pub default_channel: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load from a specific file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(path, config_content)?;
        Ok(())
    }

    /// Backend base URL: environment first, then the config file, then the default.
    pub fn server_url(&self) -> String {
        self.resolve_server_url(std::env::var(SERVER_URL_ENV).ok())
    }

    pub fn resolve_server_url(&self, from_env: Option<String>) -> String {
        from_env
            .filter(|url| !url.trim().is_empty())
            .or_else(|| self.server_url.clone())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
    }

    pub fn typewriter_options(&self) -> TypewriterOptions {
        let defaults = TypewriterOptions::default();
        TypewriterOptions::from_millis(
            self.min_delay_ms
                .unwrap_or(defaults.min_delay.as_millis() as u64),
            self.max_delay_ms
                .unwrap_or(defaults.max_delay.as_millis() as u64),
        )
    }

    pub fn default_channel(&self) -> &str {
        self.default_channel.as_deref().unwrap_or("general")
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("ecochat").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::new());
        assert_eq!(config.default_channel(), "general");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            server_url: Some("http://eco.local:8080".to_string()),
            min_delay_ms: Some(1),
            max_delay_ms: Some(3),
            default_channel: Some("water".to_string()),
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "max_delay_ms": 40 }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.max_delay_ms, Some(40));
        let options = config.typewriter_options();
        assert_eq!(options.min_delay, Duration::from_millis(8));
        assert_eq!(options.max_delay, Duration::from_millis(40));
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_server_url_precedence() {
        let mut config = Config::new();
        assert_eq!(config.resolve_server_url(None), DEFAULT_SERVER_URL);

        config.server_url = Some("http://file:1".to_string());
        assert_eq!(config.resolve_server_url(None), "http://file:1");
        assert_eq!(
            config.resolve_server_url(Some("http://env:2".to_string())),
            "http://env:2"
        );
        assert_eq!(config.resolve_server_url(Some("  ".to_string())), "http://file:1");
    }
}
